use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::models::user::{AuthResponse, LoginRequest, User};
use crate::session::CurrentUser;
use crate::utils::verify_password;

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    message: String,
}

#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = state
        .directory
        .user_by_email(&payload.email)
        .ok_or_else(|| AppError::unauthorized("invalid credentials"))?;

    let password_ok = verify_password(&payload.password, &user.password_hash)?;
    if !password_ok {
        return Err(AppError::unauthorized("invalid credentials"));
    }

    let session_id = state.sessions.open();
    let token = state.jwt.encode(user.id, session_id)?;

    tracing::info!(user_id = %user.id, "session opened");

    Ok(Json(AuthResponse {
        token,
        user: User::from(user),
    }))
}

#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    responses((status = 200, description = "Current user", body = User))
)]
pub async fn me(State(state): State<AppState>, auth: CurrentUser) -> AppResult<Json<User>> {
    let user = state
        .directory
        .user_by_id(auth.principal.id)
        .ok_or_else(|| AppError::not_found("user not found"))?;

    Ok(Json(User::from(user)))
}

#[utoipa::path(
    post,
    path = "/auth/logout",
    tag = "Auth",
    responses((status = 200, description = "Session closed"))
)]
pub async fn logout(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> AppResult<Json<MessageResponse>> {
    state.sessions.close(auth.session_id);

    tracing::info!(user_id = %auth.principal.id, "session closed");

    Ok(Json(MessageResponse {
        message: "Logged out".to_string(),
    }))
}
