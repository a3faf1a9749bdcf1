//! Repository layer over the local key/value store.
//!
//! # Responsibility
//! - Define the storage contract the services depend on.
//! - Keep SQL and JSON encoding details out of the services.
//!
//! # Invariants
//! - Values are JSON text; keys follow the layout in [`keys`].
//! - Decoding failures surface as `RepoError::InvalidData`, never as
//!   silently-empty state.

pub mod keys;
pub mod kv_repo;
