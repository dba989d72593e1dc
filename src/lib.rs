//! # Ktema
//!
//! *κτῆμα — Ancient Greek for "a possession".*
//!
//! Ktema is the record-level logic of a permissioned asset ledger: CRUD
//! and ownership transfer over a single keyed record type, with
//! attribute-based creation control, organization-scoped private data,
//! and events that surface only when the surrounding transaction commits.
//!
//! ## What's inside
//!
//! ### Injected host boundary
//! The surrounding ledger runtime owns storage, identity issuance, and
//! commit ordering. Ktema consumes them through four traits
//! ([`WorldState`], [`ClientIdentity`], [`PrivateData`], [`EventSink`]),
//! so the core logic is runtime-agnostic and testable against the
//! in-memory fakes in [`host::memory`].
//!
//! ### Two authorization policies
//! Creation is attribute-gated (`abac.creator = "true"` on the caller's
//! credential). Update, delete, and transfer require exact equality
//! between the resolved caller identity and the stored owner. The two
//! checks are deliberately separate.
//!
//! ### Private side-channel
//! A transient properties payload mirrors into the caller organization's
//! implicit collection and is merged back into reads only for callers of
//! that organization. It never touches world state.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use ktema::host::memory::{
//!     MemoryPrivateData, MemoryWorldState, RecordingEvents, StaticIdentity,
//! };
//! use ktema::{AssetLedger, CREATOR_ATTRIBUTE, TransactionContext};
//!
//! let ledger = AssetLedger::new(
//!     Arc::new(MemoryWorldState::new()),
//!     Arc::new(MemoryPrivateData::new()),
//!     Arc::new(RecordingEvents::new()),
//!     "Org1",
//! );
//!
//! let alice = StaticIdentity::new("alice", "Org1")
//!     .with_attribute(CREATOR_ATTRIBUTE, "true");
//! let ctx = TransactionContext::new(Arc::new(alice));
//!
//! ledger.create_asset(&ctx, "asset1", "blue", 5, 300).await?;
//! let asset = ledger.read_asset(&ctx, "asset1").await?;
//! ```
//!
//! ## Concurrency
//!
//! Each invocation is one self-contained unit of work against a snapshot
//! of world state. Read-modify-write sequences are not atomic here;
//! detecting conflicting concurrent writes and aborting one of them is
//! the host's job.

pub mod asset;
pub mod context;
pub mod error;
pub mod host;
pub mod ledger;

pub use asset::{Asset, ScanValue};
pub use context::{TRANSIENT_PROPERTIES, TransactionContext};
pub use error::Error;
pub use host::{ClientIdentity, EventSink, PrivateData, WorldState};
pub use ledger::{AssetLedger, CREATOR_ATTRIBUTE};
