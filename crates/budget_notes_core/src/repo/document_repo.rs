//! Document repository contract.
//!
//! Documents are JSON values addressed by `(collection path, id)`.
//! Collection paths are hierarchical strings such as `budgets` or
//! `budgets/{budget_id}/notes`.

use crate::db::DbError;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level failure. Absence is not an error.
#[derive(Debug)]
pub enum RepoError {
    /// SQLite transport or schema failure.
    Db(DbError),
    /// A document with this id already exists in the collection.
    DuplicateId { collection: String, id: String },
    /// Persisted or supplied document cannot be encoded/decoded.
    InvalidData(String),
    /// Store could not be reached.
    Unavailable(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId { collection, id } => {
                write!(f, "document `{id}` already exists in `{collection}`")
            }
            Self::InvalidData(message) => write!(f, "invalid document data: {message}"),
            Self::Unavailable(message) => write!(f, "document store unavailable: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::DuplicateId { .. } | Self::InvalidData(_) | Self::Unavailable(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Collection path helpers for the budget document hierarchy.
pub struct CollectionPath;

impl CollectionPath {
    pub const BUDGETS: &'static str = "budgets";

    /// Top-level budgets collection.
    pub fn budgets() -> String {
        Self::BUDGETS.to_string()
    }

    /// Notes sub-collection of one budget.
    pub fn budget_notes(budget_id: &str) -> String {
        format!("{}/{budget_id}/notes", Self::BUDGETS)
    }
}

/// Keyed document store scoped by collection path.
pub trait DocumentRepository {
    /// Point lookup. Returns `Ok(None)` when the document does not exist.
    fn get_document(&self, collection: &str, id: &str) -> RepoResult<Option<Value>>;
    /// Persists a new document under a caller-supplied id.
    ///
    /// Fails with `RepoError::DuplicateId` when the id is taken; the existing
    /// document is left untouched.
    fn create_document(&self, collection: &str, id: &str, document: &Value) -> RepoResult<()>;
}

impl<R: DocumentRepository + ?Sized> DocumentRepository for &R {
    fn get_document(&self, collection: &str, id: &str) -> RepoResult<Option<Value>> {
        (**self).get_document(collection, id)
    }

    fn create_document(&self, collection: &str, id: &str, document: &Value) -> RepoResult<()> {
        (**self).create_document(collection, id, document)
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectionPath, RepoError};

    #[test]
    fn collection_paths_nest_notes_under_budget() {
        assert_eq!(CollectionPath::budgets(), "budgets");
        assert_eq!(CollectionPath::budget_notes("b-9"), "budgets/b-9/notes");
    }

    #[test]
    fn duplicate_error_names_collection_and_id() {
        let err = RepoError::DuplicateId {
            collection: "budgets".to_string(),
            id: "b-1".to_string(),
        };
        assert_eq!(err.to_string(), "document `b-1` already exists in `budgets`");
    }
}
