//! User (staff account) model and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::AppError;

use super::history::Actor;

/// User rights levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rights {
    None = 0,
    Read = 1,
    Write = 2,
}

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Viewer,
    Manager,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Rights over equipment lifecycle operations
    pub fn equipment_rights(&self) -> Rights {
        match self {
            Role::Viewer => Rights::Read,
            Role::Manager | Role::Admin => Rights::Write,
        }
    }

    /// Rights over user and inspector administration
    pub fn admin_rights(&self) -> Rights {
        match self {
            Role::Viewer => Rights::None,
            Role::Manager => Rights::Read,
            Role::Admin => Rights::Write,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "viewer" => Ok(Role::Viewer),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

/// User account from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub login: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    /// "viewer", "manager" or "admin"
    pub role: String,
    pub is_active: bool,
    pub crea_date: Option<DateTime<Utc>>,
}

/// Create user request (admin operation)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 3, message = "Login must be at least 3 characters"))]
    pub login: String,
    #[validate(length(min = 4, message = "Password must be at least 4 characters"))]
    pub password: String,
    #[validate(length(min = 1, message = "Name must not be blank"))]
    pub name: String,
    pub role: Role,
}

/// Login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub login: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Login response with JWT token
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub user_id: i32,
    pub name: String,
    pub role: Role,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    /// The actor stamped on history entries written on this user's behalf
    pub fn actor(&self) -> Actor {
        Actor {
            name: self.sub.clone(),
            role: self.role.to_string(),
        }
    }

    // Authorization checks
    pub fn require_read_equipment(&self) -> Result<(), AppError> {
        if self.role.equipment_rights() as u8 >= Rights::Read as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Insufficient rights to read equipment".to_string(),
            ))
        }
    }

    pub fn require_write_equipment(&self) -> Result<(), AppError> {
        if self.role.equipment_rights() as u8 >= Rights::Write as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Insufficient rights to manage equipment".to_string(),
            ))
        }
    }

    pub fn require_read_inspectors(&self) -> Result<(), AppError> {
        if self.role.admin_rights() as u8 >= Rights::Read as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Insufficient rights to read inspectors".to_string(),
            ))
        }
    }

    pub fn require_write_inspectors(&self) -> Result<(), AppError> {
        if self.role.admin_rights() as u8 >= Rights::Write as u8 {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Insufficient rights to manage inspectors".to_string(),
            ))
        }
    }

    /// Require admin privileges (history archiving, retention management)
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Administrator privileges required".to_string(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims(role: Role) -> UserClaims {
        UserClaims {
            sub: "test".to_string(),
            user_id: 1,
            role,
            exp: 0,
            iat: 0,
        }
    }

    #[test]
    fn viewer_can_read_but_not_write_equipment() {
        let c = claims(Role::Viewer);
        assert!(c.require_read_equipment().is_ok());
        assert!(c.require_write_equipment().is_err());
    }

    #[test]
    fn manager_writes_equipment_but_is_not_admin() {
        let c = claims(Role::Manager);
        assert!(c.require_write_equipment().is_ok());
        assert!(c.require_read_inspectors().is_ok());
        assert!(c.require_write_inspectors().is_err());
        assert!(c.require_admin().is_err());
    }

    #[test]
    fn admin_has_all_rights() {
        let c = claims(Role::Admin);
        assert!(c.require_write_equipment().is_ok());
        assert!(c.require_write_inspectors().is_ok());
        assert!(c.require_admin().is_ok());
    }

    #[test]
    fn role_parses_from_string() {
        assert_eq!("Admin".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }
}
