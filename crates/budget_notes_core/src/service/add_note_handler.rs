//! Add-note-to-budget command handler.
//!
//! # Responsibility
//! - Verify the parent budget exists, then persist a new note under it.
//! - Report a single structured outcome per command.
//!
//! # Invariants
//! - The existence check completes before the write is issued.
//! - On any error no note has been written by this call.
//! - `created_on == last_modified` for the persisted note.
//!
//! # Known race
//! A budget deleted between the existence check and the write still gets
//! the note. Notes are append-only and low-contention, so no lock is taken.

use crate::command::add_note::{
    AddNoteToBudgetCommand, AddNoteToBudgetPayload, CommandValidationError,
};
use crate::model::note::{generate_note_id, Note, NoteId};
use crate::repo::document_repo::{CollectionPath, DocumentRepository, RepoError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Stable error kind tags exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Validation,
    BudgetNotFound,
    AddNoteFailed,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "VALIDATION_ERROR",
            Self::BudgetNotFound => "BUDGET_NOT_FOUND",
            Self::AddNoteFailed => "ADD_NOTE_FAILED",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of the add-note use-case.
#[derive(Debug)]
pub enum AddNoteError {
    /// Command input rejected at construction.
    Validation(CommandValidationError),
    /// Referenced budget does not exist.
    BudgetNotFound(String),
    /// Store failure while checking the budget or writing the note.
    AddNoteFailed { budget_id: String, source: RepoError },
}

impl AddNoteError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::BudgetNotFound(_) => ErrorKind::BudgetNotFound,
            Self::AddNoteFailed { .. } => ErrorKind::AddNoteFailed,
        }
    }
}

impl Display for AddNoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::BudgetNotFound(budget_id) => write!(
                f,
                "BUDGET_NOT_FOUND: cannot add a note to non-existent budget `{budget_id}`"
            ),
            Self::AddNoteFailed { budget_id, source } => {
                write!(f, "ADD_NOTE_FAILED: budget `{budget_id}`: {source}")
            }
        }
    }
}

impl Error for AddNoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::BudgetNotFound(_) => None,
            Self::AddNoteFailed { source, .. } => Some(source),
        }
    }
}

impl From<CommandValidationError> for AddNoteError {
    fn from(value: CommandValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Successful outcome of one add-note command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddNoteToBudgetResult {
    /// Always `true`; failures are reported through `AddNoteError`.
    pub success: bool,
    pub note_id: NoteId,
    /// Completion time in epoch milliseconds.
    pub timestamp: i64,
}

/// Clock used for note timestamps, in epoch milliseconds.
pub type Clock = fn() -> i64;

/// Current wall-clock time in epoch milliseconds.
pub fn system_now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| {
            i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)
        })
}

/// Executes `AddNoteToBudgetCommand` against a document repository.
pub struct AddNoteToBudgetHandler<R: DocumentRepository> {
    repo: R,
    clock: Clock,
}

impl<R: DocumentRepository> AddNoteToBudgetHandler<R> {
    /// Creates a handler using system time.
    pub fn new(repo: R) -> Self {
        Self::with_clock(repo, system_now_ms)
    }

    /// Creates a handler with an injected clock.
    pub fn with_clock(repo: R, clock: Clock) -> Self {
        Self { repo, clock }
    }

    /// Borrows the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Attaches the command's note to its budget.
    ///
    /// # Side effects
    /// - One read on `budgets`, then at most one write on
    ///   `budgets/{budget_id}/notes`.
    /// - Emits `add_note` log events (metadata only, never note content).
    ///
    /// # Errors
    /// - `BudgetNotFound` when the budget is absent; nothing is written.
    /// - `AddNoteFailed` when the store fails on either call.
    pub fn execute(
        &self,
        command: &AddNoteToBudgetCommand,
    ) -> Result<AddNoteToBudgetResult, AddNoteError> {
        let budget_id = command.budget_id();
        info!(
            "event=add_note module=handler status=start budget_id={} created_by={}",
            budget_id,
            command.created_by()
        );

        let budget = self
            .repo
            .get_document(CollectionPath::BUDGETS, budget_id)
            .map_err(|err| self.fail(budget_id, err))?;
        if budget.is_none() {
            error!(
                "event=add_note module=handler status=error error_code={} budget_id={}",
                ErrorKind::BudgetNotFound,
                budget_id
            );
            return Err(AddNoteError::BudgetNotFound(budget_id.to_string()));
        }

        let now = (self.clock)();
        let note = Note {
            id: generate_note_id(),
            budget_id: budget_id.to_string(),
            title: command.title().to_string(),
            content: command.content().to_string(),
            created_by: command.created_by().to_string(),
            created_on: now,
            last_modified: now,
        };

        let document = serde_json::to_value(&note)
            .map_err(|err| self.fail(budget_id, RepoError::from(err)))?;
        self.repo
            .create_document(&CollectionPath::budget_notes(budget_id), &note.id, &document)
            .map_err(|err| self.fail(budget_id, err))?;

        info!(
            "event=add_note module=handler status=ok budget_id={} note_id={}",
            budget_id, note.id
        );

        Ok(AddNoteToBudgetResult {
            success: true,
            note_id: note.id,
            timestamp: (self.clock)(),
        })
    }

    /// Validates raw input into a command, then executes it.
    ///
    /// Validation failures surface as `AddNoteError::Validation` and never
    /// touch the store.
    pub fn execute_payload(
        &self,
        payload: AddNoteToBudgetPayload,
    ) -> Result<AddNoteToBudgetResult, AddNoteError> {
        let command = AddNoteToBudgetCommand::try_from(payload)?;
        self.execute(&command)
    }

    fn fail(&self, budget_id: &str, err: RepoError) -> AddNoteError {
        error!(
            "event=add_note module=handler status=error error_code={} budget_id={} error={}",
            ErrorKind::AddNoteFailed,
            budget_id,
            err
        );
        AddNoteError::AddNoteFailed {
            budget_id: budget_id.to_string(),
            source: err,
        }
    }
}
