//! Assignment (loan of equipment to an inspector) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Assignment model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub id: i32,
    pub equipment_id: i32,
    pub inspector_id: i32,
    pub assigned_date: DateTime<Utc>,
    /// Null while the assignment is open
    pub returned_date: Option<DateTime<Utc>>,
    /// Condition recorded when the equipment was handed out
    pub assignment_condition: String,
    /// Condition recorded at return, null while open
    pub return_condition: Option<String>,
    pub notes: Option<String>,
}

impl Assignment {
    /// An assignment is active until its return date is set
    pub fn is_active(&self) -> bool {
        self.returned_date.is_none()
    }
}

/// Condition change recorded against an assignment
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ConditionChange {
    pub id: i32,
    pub assignment_id: i32,
    pub changed_at: DateTime<Utc>,
    pub previous_condition: String,
    pub new_condition: String,
    /// Origin (0=assigned, 1=returned, 2=inspection, 3=damage)
    pub change_type: i16,
    pub notes: Option<String>,
}

/// Assignment with inspector name and condition changes, for display
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AssignmentDetails {
    pub id: i32,
    pub equipment_id: i32,
    pub inspector_id: i32,
    pub inspector_name: Option<String>,
    pub assigned_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
    pub assignment_condition: String,
    pub return_condition: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub condition_changes: Vec<ConditionChange>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn assignment(returned: Option<DateTime<Utc>>) -> Assignment {
        Assignment {
            id: 1,
            equipment_id: 1,
            inspector_id: 42,
            assigned_date: Utc::now(),
            returned_date: returned,
            assignment_condition: "Good".to_string(),
            return_condition: None,
            notes: None,
        }
    }

    #[test]
    fn assignment_is_active_until_returned() {
        assert!(assignment(None).is_active());
        assert!(!assignment(Some(Utc::now())).is_active());
    }
}
