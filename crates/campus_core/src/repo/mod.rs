//! Repository layer for the session key-value store.
//!
//! # Responsibility
//! - Define the storage contract the session service depends on.
//! - Isolate SQLite query details from session orchestration.
//!
//! JSON record documents have their own contract in `crate::store`.

pub mod session_repo;
