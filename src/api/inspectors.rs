//! Inspector endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        assignment::AssignmentDetails,
        inspector::{CreateInspector, Inspector},
    },
};

use super::AuthenticatedUser;

/// List inspectors
#[utoipa::path(
    get,
    path = "/inspectors",
    tag = "inspectors",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Inspector list", body = Vec<Inspector>)
    )
)]
pub async fn list_inspectors(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Inspector>>> {
    claims.require_read_inspectors()?;
    let inspectors = state.services.inspectors.list().await?;
    Ok(Json(inspectors))
}

/// Get inspector by ID
#[utoipa::path(
    get,
    path = "/inspectors/{id}",
    tag = "inspectors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Inspector ID")),
    responses(
        (status = 200, description = "Inspector details", body = Inspector),
        (status = 404, description = "Inspector not found")
    )
)]
pub async fn get_inspector(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Inspector>> {
    claims.require_read_inspectors()?;
    let inspector = state.services.inspectors.get_by_id(id).await?;
    Ok(Json(inspector))
}

/// Create inspector
#[utoipa::path(
    post,
    path = "/inspectors",
    tag = "inspectors",
    security(("bearer_auth" = [])),
    request_body = CreateInspector,
    responses(
        (status = 201, description = "Inspector created", body = Inspector)
    )
)]
pub async fn create_inspector(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateInspector>,
) -> AppResult<(StatusCode, Json<Inspector>)> {
    claims.require_write_inspectors()?;
    let inspector = state.services.inspectors.create(&data).await?;
    Ok((StatusCode::CREATED, Json(inspector)))
}

/// Deactivate inspector
#[utoipa::path(
    delete,
    path = "/inspectors/{id}",
    tag = "inspectors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Inspector ID")),
    responses(
        (status = 200, description = "Inspector deactivated", body = Inspector),
        (status = 404, description = "Inspector not found")
    )
)]
pub async fn deactivate_inspector(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Inspector>> {
    claims.require_write_inspectors()?;
    let inspector = state.services.inspectors.deactivate(id).await?;
    Ok(Json(inspector))
}

/// Open assignments held by an inspector
#[utoipa::path(
    get,
    path = "/inspectors/{id}/assignments",
    tag = "inspectors",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Inspector ID")),
    responses(
        (status = 200, description = "Inspector's open assignments", body = Vec<AssignmentDetails>),
        (status = 404, description = "Inspector not found")
    )
)]
pub async fn get_inspector_assignments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    claims.require_read_equipment()?;
    let assignments = state.services.equipment.get_inspector_assignments(id).await?;
    Ok(Json(assignments))
}
