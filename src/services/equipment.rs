//! Equipment lifecycle service.
//!
//! Validates inputs, then delegates to the repository engine which runs
//! each transition in its own transaction. Failed validations never reach
//! the database.

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        assignment::{Assignment, AssignmentDetails},
        enums::EquipmentType,
        equipment::{CreateEquipment, Equipment, EquipmentDetails, EquipmentListItem},
        history::{Actor, HistoryEntry},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct EquipmentService {
    repository: Repository,
}

fn require_non_blank(value: &str, field: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be blank", field)));
    }
    Ok(())
}

impl EquipmentService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create an equipment item
    pub async fn create(&self, data: &CreateEquipment, actor: &Actor) -> AppResult<Equipment> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        require_non_blank(&data.serial_number, "serial_number")?;
        require_non_blank(&data.model, "model")?;
        if EquipmentType::from_code(data.equipment_type).is_none() {
            return Err(AppError::Validation(format!(
                "Unknown equipment type {}",
                data.equipment_type
            )));
        }
        self.repository.equipment.create(data, actor).await
    }

    /// List all equipment with the current holder, when assigned
    pub async fn list(&self) -> AppResult<Vec<EquipmentListItem>> {
        self.repository.equipment.list().await
    }

    /// Equipment with its open assignment, if any
    pub async fn get_details(&self, id: i32) -> AppResult<EquipmentDetails> {
        let equipment = self.repository.equipment.get_by_id(id).await?;
        let open_assignment = match self.repository.assignments.get_open_for_equipment(id).await? {
            Some(assignment) => Some(self.repository.assignments.details(assignment).await?),
            None => None,
        };
        Ok(EquipmentDetails {
            equipment,
            open_assignment,
        })
    }

    /// Assign equipment to an inspector
    pub async fn assign(
        &self,
        equipment_id: i32,
        inspector_id: i32,
        condition: &str,
        actor: &Actor,
    ) -> AppResult<Assignment> {
        if inspector_id <= 0 {
            return Err(AppError::Validation(
                "inspector_id must be positive".to_string(),
            ));
        }
        require_non_blank(condition, "condition")?;
        self.repository
            .assignments
            .assign(equipment_id, inspector_id, condition, actor)
            .await
    }

    /// Return equipment from its open assignment
    pub async fn return_equipment(
        &self,
        equipment_id: i32,
        condition: &str,
        notes: Option<&str>,
        actor: &Actor,
    ) -> AppResult<Assignment> {
        require_non_blank(condition, "condition")?;
        self.repository
            .assignments
            .return_assignment(equipment_id, condition, notes, actor)
            .await
    }

    /// Record a new condition for the equipment
    pub async fn update_condition(
        &self,
        equipment_id: i32,
        condition: &str,
        actor: &Actor,
    ) -> AppResult<Equipment> {
        require_non_blank(condition, "condition")?;
        self.repository
            .equipment
            .update_condition(equipment_id, condition, actor)
            .await
    }

    /// Record a maintenance intervention
    pub async fn record_maintenance(
        &self,
        equipment_id: i32,
        description: &str,
        actor: &Actor,
    ) -> AppResult<Equipment> {
        require_non_blank(description, "description")?;
        self.repository
            .equipment
            .record_maintenance(equipment_id, description, actor)
            .await
    }

    /// Deactivate an equipment item (soft delete)
    pub async fn deactivate(&self, equipment_id: i32, actor: &Actor) -> AppResult<Equipment> {
        self.repository.equipment.deactivate(equipment_id, actor).await
    }

    /// Reactivate a deactivated equipment item
    pub async fn reactivate(&self, equipment_id: i32, actor: &Actor) -> AppResult<Equipment> {
        self.repository.equipment.reactivate(equipment_id, actor).await
    }

    /// Audit trail for an equipment item, chronological
    pub async fn get_history(&self, equipment_id: i32) -> AppResult<Vec<HistoryEntry>> {
        // Verify equipment exists
        self.repository.equipment.get_by_id(equipment_id).await?;
        self.repository.history.list_for_equipment(equipment_id).await
    }

    /// All assignments for an equipment item with details
    pub async fn get_assignments(&self, equipment_id: i32) -> AppResult<Vec<AssignmentDetails>> {
        self.repository.equipment.get_by_id(equipment_id).await?;
        let assignments = self
            .repository
            .assignments
            .list_for_equipment(equipment_id)
            .await?;
        let mut result = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            result.push(self.repository.assignments.details(assignment).await?);
        }
        Ok(result)
    }

    /// Open assignments held by an inspector
    pub async fn get_inspector_assignments(
        &self,
        inspector_id: i32,
    ) -> AppResult<Vec<AssignmentDetails>> {
        self.repository.inspectors.get_by_id(inspector_id).await?;
        let assignments = self
            .repository
            .assignments
            .list_open_for_inspector(inspector_id)
            .await?;
        let mut result = Vec::with_capacity(assignments.len());
        for assignment in assignments {
            result.push(self.repository.assignments.details(assignment).await?);
        }
        Ok(result)
    }

    /// Append notes to a history entry
    pub async fn add_history_notes(&self, entry_id: i32, text: &str) -> AppResult<HistoryEntry> {
        require_non_blank(text, "notes")?;
        self.repository.history.add_notes(entry_id, text).await
    }

    /// Archive a history entry for retention management
    pub async fn archive_history_entry(&self, entry_id: i32) -> AppResult<HistoryEntry> {
        self.repository.history.archive(entry_id).await
    }
}
