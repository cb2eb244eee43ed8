//! Inspector management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::inspector::{CreateInspector, Inspector},
    repository::Repository,
};

#[derive(Clone)]
pub struct InspectorsService {
    repository: Repository,
}

impl InspectorsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Inspector>> {
        self.repository.inspectors.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Inspector> {
        self.repository.inspectors.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateInspector) -> AppResult<Inspector> {
        data.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        self.repository.inspectors.create(data).await
    }

    /// Deactivate an inspector; their past assignments are kept
    pub async fn deactivate(&self, id: i32) -> AppResult<Inspector> {
        self.repository.inspectors.deactivate(id).await
    }
}
