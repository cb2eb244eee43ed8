//! Equipment model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::assignment::AssignmentDetails;

/// Equipment record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Equipment {
    pub id: i32,
    /// Unique serial number, immutable after creation
    pub serial_number: String,
    pub model: String,
    /// Type (0=laptop, 1=mobile, 2=tablet, 3=test kit, 4=safety gear, 5=inspection tool)
    pub equipment_type: i16,
    /// Free-text condition, "New" at creation
    pub condition: String,
    /// Soft-delete flag; deactivated equipment is kept for audit
    pub is_active: bool,
    /// False while an assignment is open
    pub is_available: bool,
    pub purchase_date: DateTime<Utc>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    /// Maintenance descriptions, newline-separated
    pub notes: Option<String>,
    pub crea_date: Option<DateTime<Utc>>,
    pub modif_date: Option<DateTime<Utc>>,
}

/// Create equipment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateEquipment {
    #[validate(length(min = 1, message = "serial_number must not be blank"))]
    pub serial_number: String,
    #[validate(length(min = 1, message = "model must not be blank"))]
    pub model: String,
    /// Type (0=laptop, 1=mobile, 2=tablet, 3=test kit, 4=safety gear, 5=inspection tool)
    pub equipment_type: i16,
}

/// Equipment listing row with the current holder, when assigned
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct EquipmentListItem {
    pub id: i32,
    pub serial_number: String,
    pub model: String,
    pub equipment_type: i16,
    pub condition: String,
    pub is_active: bool,
    pub is_available: bool,
    pub purchase_date: DateTime<Utc>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    /// Inspector holding the open assignment, if any
    pub current_inspector_id: Option<i32>,
    pub current_inspector: Option<String>,
}

/// Equipment with its open assignment, for detail views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct EquipmentDetails {
    pub equipment: Equipment,
    /// The open assignment, if the equipment is currently out
    pub open_assignment: Option<AssignmentDetails>,
}
