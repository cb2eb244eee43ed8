//! Equipment history (audit log) endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{error::AppResult, models::history::HistoryEntry};

use super::AuthenticatedUser;

/// Add notes request
#[derive(Deserialize, ToSchema)]
pub struct AddNotesRequest {
    pub notes: String,
}

/// Audit trail for an equipment item
#[utoipa::path(
    get,
    path = "/equipment/{id}/history",
    tag = "history",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "History entries in chronological order", body = Vec<HistoryEntry>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    claims.require_read_equipment()?;
    let entries = state.services.equipment.get_history(id).await?;
    Ok(Json(entries))
}

/// Append notes to a history entry
#[utoipa::path(
    post,
    path = "/history/{id}/notes",
    tag = "history",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "History entry ID")),
    request_body = AddNotesRequest,
    responses(
        (status = 200, description = "Notes appended", body = HistoryEntry),
        (status = 404, description = "Entry not found"),
        (status = 422, description = "Entry is archived")
    )
)]
pub async fn add_notes(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(request): Json<AddNotesRequest>,
) -> AppResult<Json<HistoryEntry>> {
    claims.require_write_equipment()?;
    let entry = state
        .services
        .equipment
        .add_history_notes(id, &request.notes)
        .await?;
    Ok(Json(entry))
}

/// Archive a history entry for retention management
#[utoipa::path(
    post,
    path = "/history/{id}/archive",
    tag = "history",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "History entry ID")),
    responses(
        (status = 200, description = "Entry archived", body = HistoryEntry),
        (status = 404, description = "Entry not found"),
        (status = 422, description = "Entry already archived")
    )
)]
pub async fn archive_entry(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<HistoryEntry>> {
    claims.require_admin()?;
    let entry = state.services.equipment.archive_history_entry(id).await?;
    Ok(Json(entry))
}
