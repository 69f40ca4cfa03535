//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Derive display-ready budget views from upstream snapshots.

pub mod add_note_handler;
pub mod budget_aggregator;
pub mod budget_table;
