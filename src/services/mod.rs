//! Business logic services

pub mod auth;
pub mod equipment;
pub mod inspectors;

use crate::{config::AuthConfig, error::AppResult, repository::Repository};

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub equipment: equipment::EquipmentService,
    pub inspectors: inspectors::InspectorsService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository, auth_config: AuthConfig) -> AppResult<Self> {
        Ok(Self {
            auth: auth::AuthService::new(repository.clone(), auth_config),
            equipment: equipment::EquipmentService::new(repository.clone()),
            inspectors: inspectors::InspectorsService::new(repository),
        })
    }
}
