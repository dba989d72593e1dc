// src/context.rs
use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::host::ClientIdentity;

/// Transient-map key under which private asset properties travel.
pub const TRANSIENT_PROPERTIES: &str = "asset_properties";

/// One unit of work as presented by the host.
///
/// Built fresh per invocation and passed explicitly through every
/// operation; there is no ambient transaction state. Carries the
/// submitting client's credential handle and the transient map: payloads
/// delivered alongside the invocation that must never appear in the
/// public transaction payload.
#[derive(Clone)]
pub struct TransactionContext {
    tx_id: Uuid,
    timestamp: DateTime<Utc>,
    identity: Arc<dyn ClientIdentity>,
    transient: HashMap<String, Vec<u8>>,
}

impl TransactionContext {
    pub fn new(identity: Arc<dyn ClientIdentity>) -> Self {
        Self {
            tx_id: Uuid::now_v7(),
            timestamp: Utc::now(),
            identity,
            transient: HashMap::new(),
        }
    }

    pub fn with_transient(mut self, key: &str, value: impl Into<Vec<u8>>) -> Self {
        self.transient.insert(key.to_string(), value.into());
        self
    }

    pub fn tx_id(&self) -> Uuid {
        self.tx_id
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn identity(&self) -> &dyn ClientIdentity {
        self.identity.as_ref()
    }

    pub fn transient(&self, key: &str) -> Option<&[u8]> {
        self.transient.get(key).map(|v| v.as_slice())
    }
}
