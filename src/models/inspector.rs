//! Inspector (field personnel) model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Inspector record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Inspector {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
    pub is_active: bool,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Create inspector request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInspector {
    #[validate(length(min = 1, message = "name must not be blank"))]
    pub name: String,
    #[validate(email)]
    pub email: Option<String>,
}
