use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::app::AppState;
use crate::authz;
use crate::errors::{AppError, AppResult};
use crate::events::{DomainEvent, IntentRecord, Loggable, RequestContext, Severity};
use crate::models::project::{AssignRequest, Project, ProjectCreateRequest};
use crate::session::CurrentUser;

#[utoipa::path(
    get,
    path = "/projects",
    tag = "Projects",
    responses((status = 200, description = "Projects visible to the principal", body = [Project]))
)]
pub async fn list_projects(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> AppResult<Json<Vec<Project>>> {
    let projects = authz::visible_projects(&auth.principal, state.directory.projects());
    Ok(Json(projects))
}

#[utoipa::path(
    get,
    path = "/projects/{project_id}",
    tag = "Projects",
    params(("project_id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 200, description = "Project detail", body = Project),
        (status = 404, description = "Project outside the principal's scope")
    )
)]
pub async fn get_project(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(project_id): Path<Uuid>,
) -> AppResult<Json<Project>> {
    authz::visible_projects(&auth.principal, state.directory.projects())
        .into_iter()
        .find(|project| project.id == project_id)
        .map(Json)
        .ok_or_else(|| AppError::not_found("project not found"))
}

#[utoipa::path(
    post,
    path = "/projects",
    tag = "Projects",
    request_body = ProjectCreateRequest,
    responses(
        (status = 202, description = "Creation intent recorded", body = IntentRecord),
        (status = 403, description = "Principal may not manage this department")
    )
)]
pub async fn create_project(
    State(state): State<AppState>,
    auth: CurrentUser,
    headers: HeaderMap,
    Json(payload): Json<ProjectCreateRequest>,
) -> AppResult<(StatusCode, Json<IntentRecord>)> {
    if !authz::can_manage(&auth.principal, Some(&payload.department)) {
        return Err(AppError::forbidden("not allowed to create projects in this department"));
    }

    if state.directory.user_by_id(payload.manager).is_none() {
        return Err(AppError::bad_request("manager does not reference a known user"));
    }

    let event = DomainEvent::new(
        format!("{}.create_requested", Project::entity_type()),
        Some(auth.principal.id),
        None,
        serde_json::to_value(&payload)?,
    )
    .with_severity(Severity::Critical);

    let record = state.intents.append(event, RequestContext::from_headers(&headers));

    Ok((StatusCode::ACCEPTED, Json(record)))
}

#[utoipa::path(
    post,
    path = "/projects/{project_id}/assign",
    tag = "Projects",
    params(("project_id" = Uuid, Path, description = "Project id")),
    request_body = AssignRequest,
    responses(
        (status = 202, description = "Assignment intent recorded", body = IntentRecord),
        (status = 403, description = "Principal may not manage this department")
    )
)]
pub async fn assign_member(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(project_id): Path<Uuid>,
    headers: HeaderMap,
    Json(payload): Json<AssignRequest>,
) -> AppResult<(StatusCode, Json<IntentRecord>)> {
    let project = state
        .directory
        .project_by_id(project_id)
        .ok_or_else(|| AppError::not_found("project not found"))?;

    if !authz::can_manage(&auth.principal, Some(&project.department)) {
        return Err(AppError::forbidden("not allowed to assign members in this department"));
    }

    if state.directory.user_by_id(payload.user_id).is_none() {
        return Err(AppError::bad_request("assignee does not reference a known user"));
    }

    let event = DomainEvent::new(
        format!("{}.assign_requested", Project::entity_type()),
        Some(auth.principal.id),
        Some(project.subject_id()),
        json!({ "project_id": project.id, "user_id": payload.user_id }),
    )
    .with_severity(project.severity());

    let record = state.intents.append(event, RequestContext::from_headers(&headers));

    Ok((StatusCode::ACCEPTED, Json(record)))
}

#[utoipa::path(
    delete,
    path = "/projects/{project_id}",
    tag = "Projects",
    params(("project_id" = Uuid, Path, description = "Project id")),
    responses(
        (status = 202, description = "Deletion intent recorded", body = IntentRecord),
        (status = 403, description = "Principal may not manage this department")
    )
)]
pub async fn delete_project(
    State(state): State<AppState>,
    auth: CurrentUser,
    Path(project_id): Path<Uuid>,
    headers: HeaderMap,
) -> AppResult<(StatusCode, Json<IntentRecord>)> {
    let project = state
        .directory
        .project_by_id(project_id)
        .ok_or_else(|| AppError::not_found("project not found"))?;

    if !authz::can_manage(&auth.principal, Some(&project.department)) {
        return Err(AppError::forbidden("not allowed to delete projects in this department"));
    }

    let event = DomainEvent::new(
        format!("{}.delete_requested", Project::entity_type()),
        Some(auth.principal.id),
        Some(project.subject_id()),
        json!({ "project_id": project.id, "title": project.title }),
    )
    .with_severity(Severity::Critical);

    let record = state.intents.append(event, RequestContext::from_headers(&headers));

    Ok((StatusCode::ACCEPTED, Json(record)))
}
