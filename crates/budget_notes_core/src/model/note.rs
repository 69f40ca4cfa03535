//! Budget note model.
//!
//! # Invariants
//! - `id` is generated by core and never reused.
//! - `budget_id` is fixed at creation and referenced a live budget then.
//! - `created_on == last_modified` for a freshly created note.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque note identifier (UUID v4 text).
pub type NoteId = String;

/// Free-text note attached to a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    /// Reference to the parent budget; the note does not own it.
    pub budget_id: String,
    /// Optional heading, may be empty.
    pub title: String,
    pub content: String,
    pub created_by: String,
    /// Unix epoch milliseconds.
    pub created_on: i64,
    /// Unix epoch milliseconds.
    pub last_modified: i64,
}

/// Generates a fresh note identifier.
///
/// 122 random bits per id, so collisions are negligible at any practical
/// volume.
pub fn generate_note_id() -> NoteId {
    Uuid::new_v4().to_string()
}

#[cfg(test)]
mod tests {
    use super::{generate_note_id, Note};

    #[test]
    fn generated_ids_are_distinct_v4_uuids() {
        let first = generate_note_id();
        let second = generate_note_id();
        assert_ne!(first, second);
        let parsed = uuid::Uuid::parse_str(&first).unwrap();
        assert_eq!(parsed.get_version_num(), 4);
    }

    #[test]
    fn note_serializes_with_store_field_names() {
        let note = Note {
            id: "n-1".to_string(),
            budget_id: "b-1".to_string(),
            title: String::new(),
            content: "rent went up".to_string(),
            created_by: "user-7".to_string(),
            created_on: 10,
            last_modified: 10,
        };

        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["budgetId"], "b-1");
        assert_eq!(json["createdBy"], "user-7");
        assert_eq!(json["createdOn"], 10);
        assert_eq!(json["lastModified"], 10);
    }
}
