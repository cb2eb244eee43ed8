//! Equipment history (audit log) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::enums::HistoryEventType;

/// Sentinel stored when an event has no previous or new value
pub const NOT_APPLICABLE: &str = "N/A";

/// Separator used when appending to an entry's notes
pub const NOTES_SEPARATOR: &str = " | ";

/// One immutable audit record of a lifecycle transition.
///
/// Entries are append-only: after insert, only `notes` (append),
/// `validation_status` and the archive fields may change, and nothing
/// at all once `archived` is set.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HistoryEntry {
    pub id: i32,
    pub equipment_id: i32,
    /// Set at creation, never edited
    pub event_date: DateTime<Utc>,
    /// Event (0=created, 1=assigned, 2=returned, 3=condition update, 4=maintenance, 5=archived)
    pub event_type: i16,
    pub previous_value: String,
    pub new_value: String,
    pub notes: Option<String>,
    pub changed_by: String,
    pub actor_role: String,
    /// Server version that wrote the entry
    pub system_version: String,
    /// 0=pending, 1=valid, 2=invalid
    pub validation_status: i16,
    pub archived: bool,
    pub archive_date: Option<DateTime<Utc>>,
}

/// Who performed a lifecycle operation, stamped on history entries
#[derive(Debug, Clone)]
pub struct Actor {
    pub name: String,
    pub role: String,
}

/// Fields for a new history entry; dates, version and defaults are
/// filled in by the repository at insert time.
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub event_type: HistoryEventType,
    pub previous_value: Option<String>,
    pub new_value: Option<String>,
    pub notes: Option<String>,
    pub changed_by: String,
    pub actor_role: String,
}

/// Compose appended notes: existing notes plus new text,
/// joined with the entry separator.
pub fn append_notes(existing: Option<&str>, text: &str) -> String {
    match existing {
        Some(notes) if !notes.is_empty() => format!("{}{}{}", notes, NOTES_SEPARATOR, text),
        _ => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_notes_concatenates_with_separator() {
        assert_eq!(append_notes(None, "first"), "first");
        assert_eq!(append_notes(Some(""), "first"), "first");
        assert_eq!(append_notes(Some("first"), "second"), "first | second");
        assert_eq!(
            append_notes(Some("first | second"), "third"),
            "first | second | third"
        );
    }
}
