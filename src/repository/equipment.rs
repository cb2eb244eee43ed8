//! Equipment repository: creation and the state-preserving transitions
//! (condition updates, maintenance, deactivation).
//!
//! Like the assignment engine, every mutation locks the equipment row and
//! commits the row change together with its history entry.

use chrono::Utc;
use sqlx::{Pool, Postgres, Transaction};

use super::history::append_in_tx;
use crate::{
    error::{AppError, AppResult, MissingEntity, StateViolation},
    models::{
        enums::{ConditionChangeType, HistoryEventType},
        equipment::{CreateEquipment, Equipment, EquipmentListItem},
        history::{Actor, NewHistoryEntry},
    },
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: Pool<Postgres>,
}

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

impl EquipmentRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all equipment with the current holder joined in
    pub async fn list(&self) -> AppResult<Vec<EquipmentListItem>> {
        let rows = sqlx::query_as::<_, EquipmentListItem>(
            r#"
            SELECT e.id, e.serial_number, e.model, e.equipment_type, e.condition,
                   e.is_active, e.is_available, e.purchase_date, e.last_maintenance_date,
                   a.inspector_id AS current_inspector_id,
                   i.name AS current_inspector
            FROM equipment e
            LEFT JOIN assignments a ON a.equipment_id = e.id AND a.returned_date IS NULL
            LEFT JOIN inspectors i ON i.id = a.inspector_id
            ORDER BY e.serial_number
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Get equipment by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(MissingEntity::Equipment(id)))
    }

    /// Get equipment by serial number
    pub async fn get_by_serial(&self, serial_number: &str) -> AppResult<Equipment> {
        sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE serial_number = $1")
            .bind(serial_number)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(MissingEntity::Serial(serial_number.to_string()))
            })
    }

    /// Create equipment: available, condition "New", with a Created
    /// history entry in the same transaction.
    pub async fn create(&self, data: &CreateEquipment, actor: &Actor) -> AppResult<Equipment> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment
                (serial_number, model, equipment_type, condition, is_active, is_available,
                 purchase_date, crea_date)
            VALUES ($1, $2, $3, 'New', TRUE, TRUE, $4, $4)
            RETURNING *
            "#,
        )
        .bind(&data.serial_number)
        .bind(&data.model)
        .bind(data.equipment_type)
        .bind(now)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::from_db)?;

        append_in_tx(
            &mut tx,
            equipment.id,
            &NewHistoryEntry {
                event_type: HistoryEventType::Created,
                previous_value: None,
                new_value: Some("Available".to_string()),
                notes: Some(format!("Created with serial {}", data.serial_number)),
                changed_by: actor.name.clone(),
                actor_role: actor.role.clone(),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(equipment)
    }

    /// Record a new condition for the equipment.
    ///
    /// A transition to "New" from any other state counts as a refurbishment
    /// and also stamps the last maintenance date. When an assignment is
    /// open, the change is additionally recorded against it.
    pub async fn update_condition(
        &self,
        id: i32,
        condition: &str,
        actor: &Actor,
    ) -> AppResult<Equipment> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let equipment = lock_equipment(&mut tx, id).await?;
        let refurbished = condition == "New" && equipment.condition != "New";

        let updated = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET condition = $1,
                last_maintenance_date = CASE WHEN $2 THEN $3 ELSE last_maintenance_date END,
                modif_date = $3
            WHERE id = $4
            RETURNING *
            "#,
        )
        .bind(condition)
        .bind(refurbished)
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let open_assignment_id: Option<i32> = sqlx::query_scalar(
            "SELECT id FROM assignments WHERE equipment_id = $1 AND returned_date IS NULL",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(assignment_id) = open_assignment_id {
            sqlx::query(
                r#"
                INSERT INTO assignment_condition_changes
                    (assignment_id, changed_at, previous_condition, new_condition, change_type)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(assignment_id)
            .bind(now)
            .bind(&equipment.condition)
            .bind(condition)
            .bind(i16::from(ConditionChangeType::Inspection))
            .execute(&mut *tx)
            .await?;
        }

        append_in_tx(
            &mut tx,
            id,
            &NewHistoryEntry {
                event_type: HistoryEventType::ConditionUpdate,
                previous_value: Some(equipment.condition.clone()),
                new_value: Some(condition.to_string()),
                notes: None,
                changed_by: actor.name.clone(),
                actor_role: actor.role.clone(),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Record a maintenance intervention: stamp the maintenance date and
    /// append the description to the equipment's notes.
    pub async fn record_maintenance(
        &self,
        id: i32,
        description: &str,
        actor: &Actor,
    ) -> AppResult<Equipment> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        lock_equipment(&mut tx, id).await?;

        let updated = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment
            SET last_maintenance_date = $1,
                notes = CASE
                    WHEN notes IS NULL OR notes = '' THEN $2
                    ELSE notes || E'\n' || $2
                END,
                modif_date = $1
            WHERE id = $3
            RETURNING *
            "#,
        )
        .bind(now)
        .bind(description)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        append_in_tx(
            &mut tx,
            id,
            &NewHistoryEntry {
                event_type: HistoryEventType::Maintenance,
                previous_value: None,
                new_value: Some(description.to_string()),
                notes: None,
                changed_by: actor.name.clone(),
                actor_role: actor.role.clone(),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Deactivate equipment. Items with an open assignment must be
    /// returned first; deactivated items are kept for history.
    pub async fn deactivate(&self, id: i32, actor: &Actor) -> AppResult<Equipment> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let equipment = lock_equipment(&mut tx, id).await?;
        if !equipment.is_available {
            return Err(AppError::State(StateViolation::HasOpenAssignment(id)));
        }

        let updated = sqlx::query_as::<_, Equipment>(
            "UPDATE equipment SET is_active = FALSE, modif_date = $1 WHERE id = $2 RETURNING *",
        )
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        append_in_tx(
            &mut tx,
            id,
            &NewHistoryEntry {
                event_type: HistoryEventType::Archived,
                previous_value: Some("Active".to_string()),
                new_value: Some("Inactive".to_string()),
                notes: None,
                changed_by: actor.name.clone(),
                actor_role: actor.role.clone(),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Reactivate previously deactivated equipment
    pub async fn reactivate(&self, id: i32, actor: &Actor) -> AppResult<Equipment> {
        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        lock_equipment(&mut tx, id).await?;

        let updated = sqlx::query_as::<_, Equipment>(
            "UPDATE equipment SET is_active = TRUE, modif_date = $1 WHERE id = $2 RETURNING *",
        )
        .bind(now)
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        append_in_tx(
            &mut tx,
            id,
            &NewHistoryEntry {
                event_type: HistoryEventType::Archived,
                previous_value: Some("Inactive".to_string()),
                new_value: Some("Active".to_string()),
                notes: None,
                changed_by: actor.name.clone(),
                actor_role: actor.role.clone(),
            },
        )
        .await?;

        tx.commit().await?;
        Ok(updated)
    }
}
