//! Keyed entity storage for the station booking ledger.
//!
//! The ledger keeps four independent collections (stations, trains,
//! travellers, tickets). Each is an [`EntityStore`] mapping a generated id to
//! a serializable record.
//!
//! # Storage Backends
//!
//! - [`InMemoryEntityStore`] -- `BTreeMap`-based store for tests and embedding
//! - [`FileEntityStore`] -- JSON snapshot per collection, atomically replaced
//!   on every write and reloaded on open
//!
//! # Design Rules
//!
//! 1. `values()` returns records in key order. Ids are time-ordered, so key
//!    order is insertion order.
//! 2. An insert under an existing key replaces the record.
//! 3. There are no multi-key transactions; callers that need atomicity across
//!    records must serialize access themselves.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod collections;
pub mod error;
pub mod file;
pub mod memory;
pub mod traits;

pub use collections::Stores;
pub use error::{StoreError, StoreResult};
pub use file::FileEntityStore;
pub use memory::InMemoryEntityStore;
pub use traits::{EntityStore, Record};
