//! Inspectors repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult, MissingEntity},
    models::inspector::{CreateInspector, Inspector},
};

#[derive(Clone)]
pub struct InspectorsRepository {
    pool: Pool<Postgres>,
}

impl InspectorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all inspectors
    pub async fn list(&self) -> AppResult<Vec<Inspector>> {
        let rows = sqlx::query_as::<_, Inspector>("SELECT * FROM inspectors ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    /// Get inspector by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Inspector> {
        sqlx::query_as::<_, Inspector>("SELECT * FROM inspectors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound(MissingEntity::Inspector(id)))
    }

    /// Create inspector
    pub async fn create(&self, data: &CreateInspector) -> AppResult<Inspector> {
        let row = sqlx::query_as::<_, Inspector>(
            r#"
            INSERT INTO inspectors (name, email, is_active, crea_date)
            VALUES ($1, $2, TRUE, NOW())
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.email)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Deactivate inspector (kept for assignment history)
    pub async fn deactivate(&self, id: i32) -> AppResult<Inspector> {
        sqlx::query_as::<_, Inspector>(
            "UPDATE inspectors SET is_active = FALSE WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound(MissingEntity::Inspector(id)))
    }
}
