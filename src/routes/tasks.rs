use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz;
use crate::errors::{AppError, AppResult};
use crate::events::{DomainEvent, IntentRecord, Loggable, RequestContext};
use crate::models::task::{Task, TaskCreateRequest};
use crate::session::CurrentUser;

#[utoipa::path(
    get,
    path = "/tasks",
    tag = "Tasks",
    responses((status = 200, description = "Tasks visible to the principal", body = [Task]))
)]
pub async fn list_tasks(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> AppResult<Json<Vec<Task>>> {
    let in_scope = authz::visible_projects(&auth.principal, state.directory.projects());
    let tasks = authz::visible_tasks(&auth.principal, state.directory.tasks(), &in_scope);
    Ok(Json(tasks))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}/tasks",
    tag = "Tasks",
    params(("project_id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 200, description = "Visible tasks of one project", body = [Task]),
        (status = 404, description = "Project outside the principal's scope")
    )
)]
pub async fn list_project_tasks(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<Vec<Task>>> {
    let in_scope = authz::visible_projects(&auth.principal, state.directory.projects());

    if !in_scope.iter().any(|project| project.id == project_id) {
        return Err(AppError::not_found("project not found"));
    }

    let tasks: Vec<Task> = authz::visible_tasks(&auth.principal, state.directory.tasks(), &in_scope)
        .into_iter()
        .filter(|task| task.project_id == project_id)
        .collect();

    Ok(Json(tasks))
}

#[utoipa::path(
    post,
    path = "/projects/{project_id}/tasks",
    tag = "Tasks",
    params(("project_id" = Uuid, Path, description = "Project id")),
    request_body = TaskCreateRequest,
    responses(
        (status = 202, description = "Task creation intent recorded", body = IntentRecord),
        (status = 403, description = "Principal may not manage this department")
    )
)]
pub async fn create_task(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(project_id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<TaskCreateRequest>,
) -> AppResult<(StatusCode, Json<IntentRecord>)> {
    let project = state
        .directory
        .project_by_id(project_id)
        .ok_or_else(|| AppError::not_found("project not found"))?;

    if !authz::can_manage(&auth.principal, Some(&project.department)) {
        return Err(AppError::forbidden("not allowed to create tasks in this department"));
    }

    if state.directory.user_by_id(payload.assigned_to).is_none() {
        return Err(AppError::bad_request("assignee does not reference a known user"));
    }

    let event = DomainEvent::new(
        format!("{}.create_requested", Task::entity_type()),
        Some(auth.principal.id),
        Some(project.id),
        json!({ "project_id": project.id, "task": serde_json::to_value(&payload)? }),
    );

    let record = state.intents.append(event, RequestContext::from_headers(&headers));

    Ok((StatusCode::ACCEPTED, Json(record)))
}
