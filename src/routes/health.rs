use axum::extract::State;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app::AppState;
use crate::errors::AppResult;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub users: usize,
    pub projects: usize,
    pub tasks: usize,
    pub rooms: usize,
}

#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses((status = 200, description = "Health check", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let directory = &state.directory;

    Ok(Json(HealthResponse {
        status: "ok",
        users: directory.user_count(),
        projects: directory.projects().len(),
        tasks: directory.tasks().len(),
        rooms: directory.rooms().len(),
    }))
}
