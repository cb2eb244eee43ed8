//! History log repository: append-only audit trail per equipment item.
//!
//! Entries are inserted inside the same transaction as the state change
//! they record (see `assignments.rs` and `equipment.rs`), so a failed
//! operation never leaves an orphan audit record.

use chrono::Utc;
use sqlx::{Pool, Postgres, Transaction};

use crate::{
    error::{AppError, AppResult, MissingEntity, StateViolation},
    models::{
        enums::ValidationStatus,
        history::{append_notes, HistoryEntry, NewHistoryEntry, NOT_APPLICABLE},
    },
};

#[derive(Clone)]
pub struct HistoryRepository {
    pool: Pool<Postgres>,
}

/// Append a history entry within a caller-owned transaction.
///
/// Null previous/new values default to the "N/A" sentinel; event date and
/// the writing server version are stamped here and never edited afterwards.
pub async fn append_in_tx(
    tx: &mut Transaction<'_, Postgres>,
    equipment_id: i32,
    entry: &NewHistoryEntry,
) -> AppResult<i32> {
    let id = sqlx::query_scalar::<_, i32>(
        r#"
        INSERT INTO equipment_history (
            equipment_id, event_date, event_type, previous_value, new_value,
            notes, changed_by, actor_role, system_version, validation_status
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id
        "#,
    )
    .bind(equipment_id)
    .bind(Utc::now())
    .bind(i16::from(entry.event_type))
    .bind(entry.previous_value.as_deref().unwrap_or(NOT_APPLICABLE))
    .bind(entry.new_value.as_deref().unwrap_or(NOT_APPLICABLE))
    .bind(&entry.notes)
    .bind(&entry.changed_by)
    .bind(&entry.actor_role)
    .bind(env!("CARGO_PKG_VERSION"))
    .bind(i16::from(ValidationStatus::Pending))
    .fetch_one(&mut **tx)
    .await?;
    Ok(id)
}

impl HistoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get a history entry by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<HistoryEntry> {
        sqlx::query_as::<_, HistoryEntry>("SELECT * FROM equipment_history WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(MissingEntity::HistoryEntry(id)))
    }

    /// Full audit trail for an equipment item, in chronological order
    pub async fn list_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<HistoryEntry>> {
        let entries = sqlx::query_as::<_, HistoryEntry>(
            "SELECT * FROM equipment_history WHERE equipment_id = $1 ORDER BY event_date, id",
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Append text to an entry's notes. Archived entries reject any change.
    pub async fn add_notes(&self, id: i32, text: &str) -> AppResult<HistoryEntry> {
        let mut tx = self.pool.begin().await?;

        let entry = sqlx::query_as::<_, HistoryEntry>(
            "SELECT * FROM equipment_history WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound(MissingEntity::HistoryEntry(id)))?;

        if entry.archived {
            return Err(AppError::State(StateViolation::EntryArchived(id)));
        }

        let notes = append_notes(entry.notes.as_deref(), text);
        let updated = sqlx::query_as::<_, HistoryEntry>(
            "UPDATE equipment_history SET notes = $1 WHERE id = $2 RETURNING *",
        )
        .bind(&notes)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Archive an entry for retention management. Fails if already
    /// archived; the first successful call also marks the entry valid.
    pub async fn archive(&self, id: i32) -> AppResult<HistoryEntry> {
        let mut tx = self.pool.begin().await?;

        let entry = sqlx::query_as::<_, HistoryEntry>(
            "SELECT * FROM equipment_history WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::NotFound(MissingEntity::HistoryEntry(id)))?;

        if entry.archived {
            return Err(AppError::State(StateViolation::EntryArchived(id)));
        }

        let updated = sqlx::query_as::<_, HistoryEntry>(
            r#"
            UPDATE equipment_history
            SET archived = TRUE, archive_date = $1, validation_status = $2
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(Utc::now())
        .bind(i16::from(ValidationStatus::Valid))
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }
}
