//! Durable persistence and backup reconciliation for the profile
//! collection.
//!
//! The collection is one JSON array blob under a fixed namespace key; every
//! mutation is a read-modify-write of the whole blob through
//! [`ProfileStore::mutate`], the single mutation entry point.

pub mod backup;
pub mod error;
pub mod store;

pub use error::{BackupError, StoreError};
pub use store::ProfileStore;
