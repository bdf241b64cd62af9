use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Map, Value};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::models;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::auth::login,
        routes::auth::me,
        routes::auth::logout,
        routes::projects::list_projects,
        routes::projects::get_project,
        routes::projects::create_project,
        routes::projects::assign_member,
        routes::projects::delete_project,
        routes::tasks::list_tasks,
        routes::tasks::list_project_tasks,
        routes::tasks::create_task,
        routes::team::list_team,
        routes::chat::list_peers,
        routes::chat::list_rooms,
        routes::intents::list_intents,
        routes::health::health,
    ),
    components(
        schemas(
            crate::authz::Role,
            models::user::User,
            models::user::AuthResponse,
            models::user::LoginRequest,
            models::project::Project,
            models::project::ProjectStatus,
            models::project::ProjectCategory,
            models::project::ProjectCreateRequest,
            models::project::AssignRequest,
            models::task::Task,
            models::task::TaskStatus,
            models::task::TaskCreateRequest,
            models::chat::ChatRoom,
            models::chat::RoomKind,
            crate::events::IntentRecord,
            crate::events::RequestContext,
            crate::events::Severity,
            routes::auth::MessageResponse,
            routes::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Authentication endpoints"),
        (name = "Projects", description = "Project visibility and management intents"),
        (name = "Tasks", description = "Task visibility and management intents"),
        (name = "Team", description = "Team directory visibility"),
        (name = "Chat", description = "Chat peers and rooms"),
        (name = "Intents", description = "Recorded intended mutations"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn build_openapi(port: u16) -> anyhow::Result<utoipa::openapi::OpenApi> {
    let mut doc = serde_json::to_value(&ApiDoc::openapi())?;

    ensure_security_components(&mut doc);
    ensure_global_security(&mut doc);
    ensure_servers(&mut doc, port);

    Ok(serde_json::from_value(doc)?)
}

pub fn swagger_routes(doc: utoipa::openapi::OpenApi) -> Router {
    let swagger_config = utoipa_swagger_ui::Config::new(["/api-docs/openapi.json"])
        .try_it_out_enabled(true)
        .with_credentials(true)
        .persist_authorization(true);

    let doc_json = Arc::new(serde_json::to_value(&doc).expect("OpenAPI serialization must succeed"));

    let json_route = {
        let doc_json = Arc::clone(&doc_json);
        get(move || {
            let doc_json = Arc::clone(&doc_json);
            async move { Json((*doc_json).clone()) }
        })
    };

    Router::new()
        .route("/api-docs/openapi.json", json_route)
        .merge(SwaggerUi::new("/docs").config(swagger_config))
}

fn ensure_security_components(doc: &mut Value) {
    let components = doc
        .as_object_mut()
        .expect("OpenAPI root must be an object")
        .entry("components")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .expect("components must be an object");

    let schemes = components
        .entry("securitySchemes")
        .or_insert_with(|| Value::Object(Map::new()))
        .as_object_mut()
        .expect("securitySchemes must be an object");

    schemes.insert(
        "bearerAuth".to_string(),
        json!({
            "type": "http",
            "scheme": "bearer",
            "bearerFormat": "JWT"
        }),
    );
}

fn ensure_global_security(doc: &mut Value) {
    doc.as_object_mut()
        .expect("OpenAPI root must be an object")
        .entry("security")
        .or_insert_with(|| json!([{ "bearerAuth": [] }]));
}

fn ensure_servers(doc: &mut Value, port: u16) {
    let server_url = format!("http://localhost:{}", port);

    match doc.get_mut("servers") {
        Some(Value::Array(servers)) => {
            let present = servers
                .iter()
                .any(|v| v.get("url").and_then(Value::as_str) == Some(server_url.as_str()));
            if !present {
                servers.push(json!({ "url": server_url }));
            }
        }
        _ => {
            doc["servers"] = json!([{ "url": server_url }]);
        }
    }
}
