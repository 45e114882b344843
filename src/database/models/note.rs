use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Note completion state. Two states, toggled explicitly by the client
/// supplying the full target state on update; no automatic transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum NoteStatus {
    Pending,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Note {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub status: NoteStatus,
    pub is_pinned: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields the owner supplies at creation. Status and pin state are not
/// part of this type: new notes always start pending and unpinned.
#[derive(Debug, Clone)]
pub struct NewNote {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
}

/// Full-replace update of the mutable fields
#[derive(Debug, Clone)]
pub struct NoteChanges {
    pub title: String,
    pub description: Option<String>,
    pub category: String,
    pub status: NoteStatus,
}

/// Partial update: only supplied fields are merged
#[derive(Debug, Clone, Default)]
pub struct NotePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub status: Option<NoteStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&NoteStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&NoteStatus::Completed).unwrap(),
            "\"completed\""
        );
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        assert!(serde_json::from_str::<NoteStatus>("\"archived\"").is_err());
    }
}
