//! Domain model for budgets and the notes attached to them.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep document field naming aligned with the external store schema.
//!
//! # Invariants
//! - A `Note` always references the budget it was created under.
//! - Budgets are read-only from this crate's point of view.

pub mod budget;
pub mod note;
