//! Data models for EquipTrack

pub mod assignment;
pub mod enums;
pub mod equipment;
pub mod history;
pub mod inspector;
pub mod user;

// Re-export commonly used types
pub use assignment::{Assignment, AssignmentDetails, ConditionChange};
pub use enums::{ConditionChangeType, EquipmentType, HistoryEventType, ValidationStatus};
pub use equipment::{CreateEquipment, Equipment, EquipmentDetails, EquipmentListItem};
pub use history::HistoryEntry;
pub use inspector::Inspector;
pub use user::{User, UserClaims};
