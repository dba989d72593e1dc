// src/host/mod.rs
pub mod memory;

use async_trait::async_trait;

use crate::error::Error;

/// -----------------------------
/// Host runtime contracts
/// -----------------------------
///
/// The surrounding ledger runtime injects these four capabilities into the
/// contract. Each invocation runs against a snapshot of world state; commit
/// ordering, conflict detection, and rollback belong to the host.

#[async_trait]
pub trait WorldState: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, Error>;
    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), Error>;

    /// Deleting an absent key is a no-op, not an error.
    async fn delete(&self, key: &str) -> Result<(), Error>;

    /// Scan `[start, end)` in the store's key order. Empty bounds mean the
    /// entire namespace.
    async fn scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>, Error>;
}

/// Organization-scoped side channel, addressed by (collection, key).
#[async_trait]
pub trait PrivateData: Send + Sync {
    async fn get_private(&self, collection: &str, key: &str) -> Result<Option<Vec<u8>>, Error>;
    async fn put_private(&self, collection: &str, key: &str, value: Vec<u8>) -> Result<(), Error>;
    async fn delete_private(&self, collection: &str, key: &str) -> Result<(), Error>;
}

/// The submitting client's credential, as resolved by the host.
///
/// Synchronous on purpose: resolution is a local credential decode, not
/// I/O. `resolve_identity` returns the decoded identity string, never a
/// raw credential blob.
pub trait ClientIdentity: Send + Sync {
    fn resolve_identity(&self) -> Result<String, Error>;
    fn has_attribute(&self, name: &str, expected: &str) -> Result<bool, Error>;

    /// The administrative domain that issued the credential.
    fn organization(&self) -> Result<String, Error>;
}

/// Annotates the current unit of work with a named payload. The host
/// delivers it to subscribers only if the transaction commits, so emission
/// itself cannot fail an operation.
pub trait EventSink: Send + Sync {
    fn emit(&self, name: &str, payload: &[u8]);
}
