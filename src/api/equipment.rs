//! Equipment lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        assignment::{Assignment, AssignmentDetails},
        equipment::{CreateEquipment, Equipment, EquipmentDetails, EquipmentListItem},
    },
};

use super::AuthenticatedUser;

/// Assign equipment request
#[derive(Deserialize, ToSchema)]
pub struct AssignRequest {
    /// Inspector receiving the equipment
    pub inspector_id: i32,
    /// Condition at hand-out
    pub condition: String,
}

/// Return equipment request
#[derive(Deserialize, ToSchema)]
pub struct ReturnRequest {
    /// Condition at return
    pub condition: String,
    /// Optional return notes
    pub notes: Option<String>,
}

/// Condition update request
#[derive(Deserialize, ToSchema)]
pub struct ConditionRequest {
    pub condition: String,
}

/// Maintenance record request
#[derive(Deserialize, ToSchema)]
pub struct MaintenanceRequest {
    pub description: String,
}

/// Assignment response
#[derive(Serialize, ToSchema)]
pub struct AssignmentResponse {
    /// Assignment ID
    pub id: i32,
    /// Status message
    pub message: String,
}

/// List all equipment with the current holder, when assigned
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Equipment list", body = Vec<EquipmentListItem>)
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<Vec<EquipmentListItem>>> {
    claims.require_read_equipment()?;
    let equipment = state.services.equipment.list().await?;
    Ok(Json(equipment))
}

/// Get equipment with its open assignment
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = EquipmentDetails),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<EquipmentDetails>> {
    claims.require_read_equipment()?;
    let details = state.services.equipment.get_details(id).await?;
    Ok(Json(details))
}

/// Create equipment
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    security(("bearer_auth" = [])),
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = Equipment),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Serial number already exists")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<Equipment>)> {
    claims.require_write_equipment()?;
    let equipment = state
        .services
        .equipment
        .create(&data, &claims.actor())
        .await?;
    Ok((StatusCode::CREATED, Json(equipment)))
}

/// Assign equipment to an inspector
#[utoipa::path(
    post,
    path = "/equipment/{id}/assign",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = AssignRequest,
    responses(
        (status = 201, description = "Equipment assigned", body = AssignmentResponse),
        (status = 404, description = "Equipment or inspector not found"),
        (status = 409, description = "Concurrent assignment detected"),
        (status = 422, description = "Equipment not available")
    )
)]
pub async fn assign_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AssignRequest>,
) -> AppResult<(StatusCode, Json<AssignmentResponse>)> {
    claims.require_write_equipment()?;

    let assignment = state
        .services
        .equipment
        .assign(id, request.inspector_id, &request.condition, &claims.actor())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AssignmentResponse {
            id: assignment.id,
            message: "Equipment assigned successfully".to_string(),
        }),
    ))
}

/// Return equipment from its open assignment
#[utoipa::path(
    post,
    path = "/equipment/{id}/return",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = ReturnRequest,
    responses(
        (status = 200, description = "Equipment returned", body = Assignment),
        (status = 404, description = "Equipment not found"),
        (status = 422, description = "No active assignment")
    )
)]
pub async fn return_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<ReturnRequest>,
) -> AppResult<Json<Assignment>> {
    claims.require_write_equipment()?;

    let assignment = state
        .services
        .equipment
        .return_equipment(id, &request.condition, request.notes.as_deref(), &claims.actor())
        .await?;

    Ok(Json(assignment))
}

/// Update equipment condition
#[utoipa::path(
    put,
    path = "/equipment/{id}/condition",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = ConditionRequest,
    responses(
        (status = 200, description = "Condition updated", body = Equipment),
        (status = 400, description = "Blank condition"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_condition(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<ConditionRequest>,
) -> AppResult<Json<Equipment>> {
    claims.require_write_equipment()?;
    let equipment = state
        .services
        .equipment
        .update_condition(id, &request.condition, &claims.actor())
        .await?;
    Ok(Json(equipment))
}

/// Record a maintenance intervention
#[utoipa::path(
    post,
    path = "/equipment/{id}/maintenance",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = MaintenanceRequest,
    responses(
        (status = 200, description = "Maintenance recorded", body = Equipment),
        (status = 400, description = "Blank description"),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn record_maintenance(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<MaintenanceRequest>,
) -> AppResult<Json<Equipment>> {
    claims.require_write_equipment()?;
    let equipment = state
        .services
        .equipment
        .record_maintenance(id, &request.description, &claims.actor())
        .await?;
    Ok(Json(equipment))
}

/// Deactivate equipment (soft delete; equipment is never removed)
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment deactivated", body = Equipment),
        (status = 404, description = "Equipment not found"),
        (status = 422, description = "Equipment has an open assignment")
    )
)]
pub async fn deactivate_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    claims.require_write_equipment()?;
    let equipment = state.services.equipment.deactivate(id, &claims.actor()).await?;
    Ok(Json(equipment))
}

/// Reactivate previously deactivated equipment
#[utoipa::path(
    post,
    path = "/equipment/{id}/reactivate",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment reactivated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn reactivate_equipment(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    claims.require_write_equipment()?;
    let equipment = state.services.equipment.reactivate(id, &claims.actor()).await?;
    Ok(Json(equipment))
}

/// All assignments for an equipment item
#[utoipa::path(
    get,
    path = "/equipment/{id}/assignments",
    tag = "equipment",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Assignment history", body = Vec<AssignmentDetails>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn list_assignments(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<AssignmentDetails>>> {
    claims.require_read_equipment()?;
    let assignments = state.services.equipment.get_assignments(id).await?;
    Ok(Json(assignments))
}
