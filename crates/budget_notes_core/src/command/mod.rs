//! Validated command objects accepted by core handlers.
//!
//! # Invariants
//! - A command value only exists in a valid state; construction is the
//!   single validation point.

pub mod add_note;
