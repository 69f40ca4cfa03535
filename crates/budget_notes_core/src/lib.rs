//! Core domain logic for budget notes.
//! This crate is the single source of truth for note-attachment rules.

pub mod command;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use command::add_note::{
    AddNoteToBudgetCommand, AddNoteToBudgetPayload, CommandValidationError,
};
pub use config::CoreConfig;
pub use logging::{
    default_log_level, flush_logging, init_logging, logging_status, LoggingError,
};
pub use model::budget::{Budget, BudgetStatus};
pub use model::note::{Note, NoteId};
pub use repo::document_repo::{CollectionPath, DocumentRepository, RepoError, RepoResult};
pub use repo::memory_repo::InMemoryDocumentRepository;
pub use repo::sqlite_repo::SqliteDocumentRepository;
pub use service::add_note_handler::{
    AddNoteError, AddNoteToBudgetHandler, AddNoteToBudgetResult, ErrorKind,
};
pub use service::budget_aggregator::{
    BudgetAggregator, BudgetSource, BudgetUpdate, LoadObserver, LogLoadObserver,
};
pub use service::budget_table::{BudgetOverview, BudgetTable};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
