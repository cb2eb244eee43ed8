//! Authentication endpoints

use axum::{extract::State, Json};
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{LoginRequest, LoginResponse, Role},
};

use super::AuthenticatedUser;

/// Authenticate and obtain a JWT token
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<crate::AppState>,
    Json(request): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    request
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let (token, user) = state
        .services
        .auth
        .authenticate(&request.login, &request.password)
        .await?;

    let role: Role = user.role.parse().map_err(AppError::Internal)?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        user_id: user.id,
        name: user.name,
        role,
    }))
}

/// Current authenticated user
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current user claims")
    )
)]
pub async fn me(
    AuthenticatedUser(claims): AuthenticatedUser,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "login": claims.sub,
        "user_id": claims.user_id,
        "role": claims.role,
    }))
}
