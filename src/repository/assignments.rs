//! Assignments repository: the assignment/return engine.
//!
//! Every mutating operation here is one atomic unit: the equipment row is
//! locked with `SELECT ... FOR UPDATE`, availability is re-checked under
//! the lock, and the equipment update, assignment write and history append
//! all commit together or not at all. Two writers racing on the same
//! equipment id serialize on the row lock; a writer that slips past anyway
//! hits the `uq_assignments_one_open` partial unique index at commit and
//! surfaces as a concurrency conflict.

use chrono::Utc;
use sqlx::{Pool, Postgres, Transaction};

use super::history::append_in_tx;
use crate::{
    error::{AppError, AppResult, MissingEntity, StateViolation},
    models::{
        assignment::{Assignment, AssignmentDetails, ConditionChange},
        enums::{ConditionChangeType, HistoryEventType},
        equipment::Equipment,
        history::{Actor, NewHistoryEntry},
    },
};

#[derive(Clone)]
pub struct AssignmentsRepository {
    pool: Pool<Postgres>,
}

/// Lock the equipment row for the remainder of the transaction.
///
/// All conflicting lifecycle transitions for one equipment item funnel
/// through this lock; transitions on different items never contend.
async fn lock_equipment(
    tx: &mut Transaction<'_, Postgres>,
    equipment_id: i32,
) -> AppResult<Equipment> {
    sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1 FOR UPDATE")
        .bind(equipment_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(AppError::NotFound(MissingEntity::Equipment(equipment_id)))
}

impl AssignmentsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Assign equipment to an inspector.
    ///
    /// Availability is re-checked under the row lock, so only one of two
    /// racing callers can observe `is_available = TRUE` and commit; the
    /// other blocks on the lock, then fails cleanly with a state error.
    pub async fn assign(
        &self,
        equipment_id: i32,
        inspector_id: i32,
        condition: &str,
        actor: &Actor,
    ) -> AppResult<Assignment> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let equipment = lock_equipment(&mut tx, equipment_id).await?;

        // Deactivated equipment may not be assigned even when the
        // availability flag is still set.
        if !equipment.is_available || !equipment.is_active {
            return Err(AppError::State(StateViolation::NotAvailable(equipment_id)));
        }

        let inspector_active: Option<bool> =
            sqlx::query_scalar("SELECT is_active FROM inspectors WHERE id = $1")
                .bind(inspector_id)
                .fetch_optional(&mut *tx)
                .await?;
        match inspector_active {
            None => return Err(AppError::NotFound(MissingEntity::Inspector(inspector_id))),
            Some(false) => {
                return Err(AppError::Validation(format!(
                    "Inspector {} is not active",
                    inspector_id
                )))
            }
            Some(true) => {}
        }

        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            INSERT INTO assignments (equipment_id, inspector_id, assigned_date, assignment_condition)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(equipment_id)
        .bind(inspector_id)
        .bind(now)
        .bind(condition)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from_db)?;

        sqlx::query(
            r#"
            INSERT INTO assignment_condition_changes
                (assignment_id, changed_at, previous_condition, new_condition, change_type)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(assignment.id)
        .bind(now)
        .bind(&equipment.condition)
        .bind(condition)
        .bind(i16::from(ConditionChangeType::Assigned))
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE equipment SET is_available = FALSE, modif_date = $1 WHERE id = $2")
            .bind(now)
            .bind(equipment_id)
            .execute(&mut *tx)
            .await?;

        append_in_tx(
            &mut tx,
            equipment_id,
            &NewHistoryEntry {
                event_type: HistoryEventType::Assigned,
                previous_value: Some("Available".to_string()),
                new_value: Some("Assigned".to_string()),
                notes: Some(format!("Assigned to inspector {}", inspector_id)),
                changed_by: actor.name.clone(),
                actor_role: actor.role.clone(),
            },
        )
        .await?;

        // A conflicting writer that bypassed the row lock is caught here
        // by the one-open-assignment unique index.
        tx.commit().await.map_err(AppError::from_db)?;
        Ok(assignment)
    }

    /// Close the open assignment for an equipment item.
    pub async fn return_assignment(
        &self,
        equipment_id: i32,
        condition: &str,
        notes: Option<&str>,
        actor: &Actor,
    ) -> AppResult<Assignment> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let equipment = lock_equipment(&mut tx, equipment_id).await?;

        let open = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE equipment_id = $1 AND returned_date IS NULL FOR UPDATE",
        )
        .bind(equipment_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(AppError::State(StateViolation::NoActiveAssignment(
            equipment_id,
        )))?;

        let assignment = sqlx::query_as::<_, Assignment>(
            r#"
            UPDATE assignments
            SET returned_date = $1, return_condition = $2, notes = COALESCE($3, notes)
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(condition)
        .bind(notes)
        .bind(open.id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO assignment_condition_changes
                (assignment_id, changed_at, previous_condition, new_condition, change_type, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(open.id)
        .bind(now)
        .bind(&equipment.condition)
        .bind(condition)
        .bind(i16::from(ConditionChangeType::Returned))
        .bind(notes)
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            "UPDATE equipment SET condition = $1, is_available = TRUE, modif_date = $2 WHERE id = $3",
        )
        .bind(condition)
        .bind(now)
        .bind(equipment_id)
        .execute(&mut *tx)
        .await?;

        append_in_tx(
            &mut tx,
            equipment_id,
            &NewHistoryEntry {
                event_type: HistoryEventType::Returned,
                previous_value: Some("Assigned".to_string()),
                new_value: Some("Available".to_string()),
                notes: notes.map(|n| n.to_string()),
                changed_by: actor.name.clone(),
                actor_role: actor.role.clone(),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(assignment)
    }

    /// Get assignment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Assignment> {
        sqlx::query_as::<_, Assignment>("SELECT * FROM assignments WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(MissingEntity::Assignment(id)))
    }

    /// The open assignment for an equipment item, if any
    pub async fn get_open_for_equipment(&self, equipment_id: i32) -> AppResult<Option<Assignment>> {
        let assignment = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE equipment_id = $1 AND returned_date IS NULL",
        )
        .bind(equipment_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(assignment)
    }

    /// All assignments for an equipment item, most recent first
    pub async fn list_for_equipment(&self, equipment_id: i32) -> AppResult<Vec<Assignment>> {
        let assignments = sqlx::query_as::<_, Assignment>(
            "SELECT * FROM assignments WHERE equipment_id = $1 ORDER BY assigned_date DESC, id DESC",
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(assignments)
    }

    /// Open assignments held by an inspector
    pub async fn list_open_for_inspector(&self, inspector_id: i32) -> AppResult<Vec<Assignment>> {
        let assignments = sqlx::query_as::<_, Assignment>(
            r#"
            SELECT * FROM assignments
            WHERE inspector_id = $1 AND returned_date IS NULL
            ORDER BY assigned_date
            "#,
        )
        .bind(inspector_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(assignments)
    }

    /// Condition change sub-records for an assignment, in order
    pub async fn condition_changes(&self, assignment_id: i32) -> AppResult<Vec<ConditionChange>> {
        let changes = sqlx::query_as::<_, ConditionChange>(
            "SELECT * FROM assignment_condition_changes WHERE assignment_id = $1 ORDER BY changed_at, id",
        )
        .bind(assignment_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(changes)
    }

    /// Assignment with inspector name and condition changes for display
    pub async fn details(&self, assignment: Assignment) -> AppResult<AssignmentDetails> {
        let inspector_name: Option<String> =
            sqlx::query_scalar("SELECT name FROM inspectors WHERE id = $1")
                .bind(assignment.inspector_id)
                .fetch_optional(&self.pool)
                .await?;

        let condition_changes = self.condition_changes(assignment.id).await?;

        Ok(AssignmentDetails {
            id: assignment.id,
            equipment_id: assignment.equipment_id,
            inspector_id: assignment.inspector_id,
            inspector_name,
            assigned_date: assignment.assigned_date,
            returned_date: assignment.returned_date,
            assignment_condition: assignment.assignment_condition.clone(),
            return_condition: assignment.return_condition.clone(),
            notes: assignment.notes.clone(),
            is_active: assignment.is_active(),
            condition_changes,
        })
    }
}
