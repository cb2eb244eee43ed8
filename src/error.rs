//! Error types for EquipTrack server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes surfaced in JSON error bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchInspector = 4,
    NoSuchEquipment = 5,
    NotAvailable = 6,
    NoActiveAssignment = 7,
    Duplicate = 8,
    ConcurrentUpdate = 9,
    SerialAlreadyExists = 10,
    EntryArchived = 11,
    HasOpenAssignment = 12,
    BadValue = 13,
    NoSuchData = 14,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(MissingEntity),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Concurrency conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Invalid state: {0}")]
    State(StateViolation),
}

/// Entities a lookup can miss, each mapped to its own error code
#[derive(Debug, Clone, Error)]
pub enum MissingEntity {
    #[error("Equipment {0} not found")]
    Equipment(i32),

    #[error("Equipment with serial {0} not found")]
    Serial(String),

    #[error("Inspector {0} not found")]
    Inspector(i32),

    #[error("Assignment {0} not found")]
    Assignment(i32),

    #[error("History entry {0} not found")]
    HistoryEntry(i32),

    #[error("User {0} not found")]
    User(i32),
}

impl MissingEntity {
    fn code(&self) -> ErrorCode {
        match self {
            MissingEntity::Equipment(_) | MissingEntity::Serial(_) => ErrorCode::NoSuchEquipment,
            MissingEntity::Inspector(_) => ErrorCode::NoSuchInspector,
            MissingEntity::Assignment(_)
            | MissingEntity::HistoryEntry(_)
            | MissingEntity::User(_) => ErrorCode::NoSuchData,
        }
    }
}

/// Lifecycle state violations, each with its own error code
#[derive(Debug, Clone, Error)]
pub enum StateViolation {
    #[error("Equipment {0} is not available for assignment")]
    NotAvailable(i32),

    #[error("Equipment {0} has no active assignment")]
    NoActiveAssignment(i32),

    #[error("History entry {0} is archived and cannot be modified")]
    EntryArchived(i32),

    #[error("Equipment {0} has an open assignment")]
    HasOpenAssignment(i32),
}

impl StateViolation {
    fn code(&self) -> ErrorCode {
        match self {
            StateViolation::NotAvailable(_) => ErrorCode::NotAvailable,
            StateViolation::NoActiveAssignment(_) => ErrorCode::NoActiveAssignment,
            StateViolation::EntryArchived(_) => ErrorCode::EntryArchived,
            StateViolation::HasOpenAssignment(_) => ErrorCode::HasOpenAssignment,
        }
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl AppError {
    /// Classify a database error, turning a violation of the
    /// one-open-assignment partial unique index (or any other `uq_`
    /// constraint) into a conflict the caller can retry or report.
    pub fn from_db(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint == "uq_assignments_one_open" {
                    return AppError::Conflict(
                        "Equipment was assigned by another request".to_string(),
                    );
                }
                if constraint.starts_with("uq_") {
                    return AppError::Conflict(format!(
                        "Duplicate value violates unique constraint {}",
                        constraint
                    ));
                }
            }
        }
        AppError::Database(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(missing) => {
                (StatusCode::NOT_FOUND, missing.code(), missing.to_string())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Conflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::ConcurrentUpdate, msg.clone())
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::State(violation) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                violation.code(),
                violation.to_string(),
            ),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_violations_map_to_their_codes() {
        assert_eq!(StateViolation::NotAvailable(1).code(), ErrorCode::NotAvailable);
        assert_eq!(
            StateViolation::NoActiveAssignment(1).code(),
            ErrorCode::NoActiveAssignment
        );
        assert_eq!(StateViolation::EntryArchived(1).code(), ErrorCode::EntryArchived);
        assert_eq!(
            StateViolation::HasOpenAssignment(1).code(),
            ErrorCode::HasOpenAssignment
        );
    }

    #[test]
    fn missing_entities_map_to_their_codes() {
        assert_eq!(MissingEntity::Equipment(1).code(), ErrorCode::NoSuchEquipment);
        assert_eq!(
            MissingEntity::Serial("SN-1".to_string()).code(),
            ErrorCode::NoSuchEquipment
        );
        assert_eq!(MissingEntity::Inspector(1).code(), ErrorCode::NoSuchInspector);
        assert_eq!(MissingEntity::Assignment(1).code(), ErrorCode::NoSuchData);
        assert_eq!(MissingEntity::HistoryEntry(1).code(), ErrorCode::NoSuchData);
    }

    #[test]
    fn non_database_errors_pass_through_from_db() {
        let err = AppError::from_db(sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::Database(sqlx::Error::RowNotFound)));
    }
}
