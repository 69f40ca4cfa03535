//! "Add note N to budget B by user U" command.
//!
//! # Invariants
//! - `budget_id`, `content` and `created_by` are never empty or
//!   whitespace-only.
//! - Fields are read-only after construction.
//! - Validation is fail-fast in the order budget id, content, creator.

use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Construction-time validation failure. Kind tag: `VALIDATION_ERROR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandValidationError {
    MissingBudgetId,
    MissingContent,
    MissingCreator,
}

impl CommandValidationError {
    /// Short reason without the kind prefix.
    pub fn reason(self) -> &'static str {
        match self {
            Self::MissingBudgetId => "budget id required",
            Self::MissingContent => "content required",
            Self::MissingCreator => "creator required",
        }
    }
}

impl Display for CommandValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "VALIDATION_ERROR: {}", self.reason())
    }
}

impl Error for CommandValidationError {}

/// Raw, unvalidated input as received from callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddNoteToBudgetPayload {
    pub budget_id: String,
    #[serde(default)]
    pub title: String,
    pub content: String,
    pub created_by: String,
}

/// Validated request to attach a note to a budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddNoteToBudgetCommand {
    budget_id: String,
    title: String,
    content: String,
    created_by: String,
}

impl AddNoteToBudgetCommand {
    /// Builds a command, rejecting blank required fields.
    ///
    /// `title` is unconstrained and may be empty. Values are stored as given;
    /// whitespace is only inspected, never trimmed.
    ///
    /// # Errors
    /// - Returns the first failing check in order budget id, content, creator.
    pub fn new(
        budget_id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Result<Self, CommandValidationError> {
        let budget_id = budget_id.into();
        if is_blank(&budget_id) {
            return Err(CommandValidationError::MissingBudgetId);
        }
        let content = content.into();
        if is_blank(&content) {
            return Err(CommandValidationError::MissingContent);
        }
        let created_by = created_by.into();
        if is_blank(&created_by) {
            return Err(CommandValidationError::MissingCreator);
        }

        Ok(Self {
            budget_id,
            title: title.into(),
            content,
            created_by,
        })
    }

    pub fn budget_id(&self) -> &str {
        &self.budget_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn created_by(&self) -> &str {
        &self.created_by
    }
}

impl TryFrom<AddNoteToBudgetPayload> for AddNoteToBudgetCommand {
    type Error = CommandValidationError;

    fn try_from(value: AddNoteToBudgetPayload) -> Result<Self, Self::Error> {
        Self::new(value.budget_id, value.title, value.content, value.created_by)
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::{AddNoteToBudgetCommand, AddNoteToBudgetPayload, CommandValidationError};

    #[test]
    fn first_failing_field_wins() {
        let err = AddNoteToBudgetCommand::new(" ", "", "", "").unwrap_err();
        assert_eq!(err, CommandValidationError::MissingBudgetId);

        let err = AddNoteToBudgetCommand::new("b-1", "", "\t\n", "").unwrap_err();
        assert_eq!(err, CommandValidationError::MissingContent);
    }

    #[test]
    fn error_message_carries_kind_tag() {
        let err = AddNoteToBudgetCommand::new("b-1", "t", "body", "  ").unwrap_err();
        assert_eq!(err.to_string(), "VALIDATION_ERROR: creator required");
    }

    #[test]
    fn payload_conversion_defaults_missing_title() {
        let payload: AddNoteToBudgetPayload = serde_json::from_value(serde_json::json!({
            "budgetId": "b-1",
            "content": "body",
            "createdBy": "user-1"
        }))
        .unwrap();

        let command = AddNoteToBudgetCommand::try_from(payload).unwrap();
        assert_eq!(command.title(), "");
        assert_eq!(command.budget_id(), "b-1");
    }
}
