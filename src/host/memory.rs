// src/host/memory.rs
use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::Error;
use crate::host::{ClientIdentity, EventSink, PrivateData, WorldState};

/// In-memory world state. BTreeMap-backed, so scans come out in
/// lexicographic key order.
#[derive(Clone, Default)]
pub struct MemoryWorldState {
    entries: Arc<Mutex<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorldState for MemoryWorldState {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let entries = self.entries.lock().unwrap();
        Ok(entries.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), Error> {
        let mut entries = self.entries.lock().unwrap();
        entries.insert(key.to_string(), value);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.entries.lock().unwrap();
        entries.remove(key);
        Ok(())
    }

    async fn scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>, Error> {
        let entries = self.entries.lock().unwrap();

        let lower = if start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(start.to_string())
        };
        let upper = if end.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Excluded(end.to_string())
        };

        Ok(entries
            .range((lower, upper))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

/// In-memory private-data store: one ordered map per collection.
#[derive(Clone, Default)]
pub struct MemoryPrivateData {
    collections: Arc<Mutex<HashMap<String, BTreeMap<String, Vec<u8>>>>>,
}

impl MemoryPrivateData {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PrivateData for MemoryPrivateData {
    async fn get_private(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, Error> {
        let collections = self.collections.lock().unwrap();
        Ok(collections
            .get(collection)
            .and_then(|entries| entries.get(key).cloned()))
    }

    async fn put_private(
        &self,
        collection: &str,
        key: &str,
        value: Vec<u8>,
    ) -> Result<(), Error> {
        let mut collections = self.collections.lock().unwrap();
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(key.to_string(), value);
        Ok(())
    }

    async fn delete_private(&self, collection: &str, key: &str) -> Result<(), Error> {
        let mut collections = self.collections.lock().unwrap();
        if let Some(entries) = collections.get_mut(collection) {
            entries.remove(key);
        }
        Ok(())
    }
}

/// Fixed credential: an identity string, its issuing organization, and a
/// set of named attributes.
#[derive(Clone)]
pub struct StaticIdentity {
    identity: String,
    organization: String,
    attributes: HashMap<String, String>,
}

impl StaticIdentity {
    pub fn new(identity: &str, organization: &str) -> Self {
        Self {
            identity: identity.to_string(),
            organization: organization.to_string(),
            attributes: HashMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }
}

impl ClientIdentity for StaticIdentity {
    fn resolve_identity(&self) -> Result<String, Error> {
        Ok(self.identity.clone())
    }

    fn has_attribute(&self, name: &str, expected: &str) -> Result<bool, Error> {
        Ok(self.attributes.get(name).is_some_and(|v| v == expected))
    }

    fn organization(&self) -> Result<String, Error> {
        Ok(self.organization.clone())
    }
}

/// Captures emitted events so callers can assert on them.
#[derive(Clone, Default)]
pub struct RecordingEvents {
    emitted: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
}

impl RecordingEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emitted(&self) -> Vec<(String, Vec<u8>)> {
        self.emitted.lock().unwrap().clone()
    }

    pub fn names(&self) -> Vec<String> {
        self.emitted
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl EventSink for RecordingEvents {
    fn emit(&self, name: &str, payload: &[u8]) {
        let mut emitted = self.emitted.lock().unwrap();
        emitted.push((name.to_string(), payload.to_vec()));
    }
}
