//! Shared domain enums

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ---------------------------------------------------------------------------
// EquipmentType
// ---------------------------------------------------------------------------

/// Equipment type codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum EquipmentType {
    Laptop = 0,
    Mobile = 1,
    Tablet = 2,
    TestKit = 3,
    SafetyGear = 4,
    InspectionTool = 5,
}

impl EquipmentType {
    /// Parse a stored code; unknown codes are rejected rather than
    /// defaulted, an equipment type is fixed at creation.
    pub fn from_code(v: i16) -> Option<Self> {
        match v {
            0 => Some(EquipmentType::Laptop),
            1 => Some(EquipmentType::Mobile),
            2 => Some(EquipmentType::Tablet),
            3 => Some(EquipmentType::TestKit),
            4 => Some(EquipmentType::SafetyGear),
            5 => Some(EquipmentType::InspectionTool),
            _ => None,
        }
    }
}

impl From<EquipmentType> for i16 {
    fn from(t: EquipmentType) -> Self {
        t as i16
    }
}

impl std::fmt::Display for EquipmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            EquipmentType::Laptop => "Laptop",
            EquipmentType::Mobile => "Mobile",
            EquipmentType::Tablet => "Tablet",
            EquipmentType::TestKit => "Test Kit",
            EquipmentType::SafetyGear => "Safety Gear",
            EquipmentType::InspectionTool => "Inspection Tool",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// HistoryEventType
// ---------------------------------------------------------------------------

/// Lifecycle event codes recorded in the equipment history log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum HistoryEventType {
    Created = 0,
    Assigned = 1,
    Returned = 2,
    ConditionUpdate = 3,
    Maintenance = 4,
    Archived = 5,
}

impl HistoryEventType {
    pub fn from_code(v: i16) -> Option<Self> {
        match v {
            0 => Some(HistoryEventType::Created),
            1 => Some(HistoryEventType::Assigned),
            2 => Some(HistoryEventType::Returned),
            3 => Some(HistoryEventType::ConditionUpdate),
            4 => Some(HistoryEventType::Maintenance),
            5 => Some(HistoryEventType::Archived),
            _ => None,
        }
    }
}

impl From<HistoryEventType> for i16 {
    fn from(e: HistoryEventType) -> Self {
        e as i16
    }
}

impl std::fmt::Display for HistoryEventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            HistoryEventType::Created => "Created",
            HistoryEventType::Assigned => "Assigned",
            HistoryEventType::Returned => "Returned",
            HistoryEventType::ConditionUpdate => "Condition Update",
            HistoryEventType::Maintenance => "Maintenance",
            HistoryEventType::Archived => "Archived",
        };
        write!(f, "{}", label)
    }
}

// ---------------------------------------------------------------------------
// ValidationStatus
// ---------------------------------------------------------------------------

/// Validation status of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum ValidationStatus {
    Pending = 0,
    Valid = 1,
    Invalid = 2,
}

impl From<i16> for ValidationStatus {
    fn from(v: i16) -> Self {
        match v {
            1 => ValidationStatus::Valid,
            2 => ValidationStatus::Invalid,
            _ => ValidationStatus::Pending,
        }
    }
}

impl From<ValidationStatus> for i16 {
    fn from(s: ValidationStatus) -> Self {
        s as i16
    }
}

// ---------------------------------------------------------------------------
// ConditionChangeType
// ---------------------------------------------------------------------------

/// Origin of a condition change recorded on an assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[repr(i16)]
pub enum ConditionChangeType {
    Assigned = 0,
    Returned = 1,
    Inspection = 2,
    Damage = 3,
}

impl From<i16> for ConditionChangeType {
    fn from(v: i16) -> Self {
        match v {
            0 => ConditionChangeType::Assigned,
            1 => ConditionChangeType::Returned,
            3 => ConditionChangeType::Damage,
            _ => ConditionChangeType::Inspection,
        }
    }
}

impl From<ConditionChangeType> for i16 {
    fn from(c: ConditionChangeType) -> Self {
        c as i16
    }
}

impl std::fmt::Display for ConditionChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ConditionChangeType::Assigned => "Assigned",
            ConditionChangeType::Returned => "Returned",
            ConditionChangeType::Inspection => "Inspection",
            ConditionChangeType::Damage => "Damage",
        };
        write!(f, "{}", label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equipment_type_round_trips() {
        for t in [
            EquipmentType::Laptop,
            EquipmentType::Mobile,
            EquipmentType::Tablet,
            EquipmentType::TestKit,
            EquipmentType::SafetyGear,
            EquipmentType::InspectionTool,
        ] {
            assert_eq!(EquipmentType::from_code(t as i16), Some(t));
        }
    }

    #[test]
    fn unknown_equipment_type_is_rejected() {
        assert_eq!(EquipmentType::from_code(6), None);
        assert_eq!(EquipmentType::from_code(-1), None);
    }

    #[test]
    fn unknown_event_type_is_rejected() {
        assert_eq!(HistoryEventType::from_code(99), None);
        assert_eq!(
            HistoryEventType::from_code(5),
            Some(HistoryEventType::Archived)
        );
    }

    #[test]
    fn validation_status_defaults_to_pending() {
        assert_eq!(ValidationStatus::from(42), ValidationStatus::Pending);
        assert_eq!(ValidationStatus::from(1), ValidationStatus::Valid);
    }
}
