//! Repository gateway over a keyed document store.
//!
//! # Responsibility
//! - Define the collection-scoped get/create contract consumed by handlers.
//! - Provide in-memory and SQLite-backed implementations.
//!
//! # Invariants
//! - Absence is `Ok(None)`, never an error.
//! - `create_document` rejects an id already present in the collection.

pub mod document_repo;
pub mod memory_repo;
pub mod sqlite_repo;
