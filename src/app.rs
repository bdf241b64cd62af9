use std::sync::Arc;

use axum::http::Method;
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::directory::Directory;
use crate::errors::AppError;
use crate::events::IntentLog;
use crate::routes::{auth, chat, health, intents, projects, tasks, team};
use crate::session::{JwtConfig, SessionRegistry};

#[derive(Clone)]
pub struct AppState {
    pub directory: Arc<Directory>,
    pub jwt: Arc<JwtConfig>,
    pub sessions: Arc<SessionRegistry>,
    pub intents: Arc<IntentLog>,
}

impl AppState {
    pub fn new(directory: Arc<Directory>, jwt: JwtConfig) -> Self {
        Self {
            directory,
            jwt: Arc::new(jwt),
            sessions: Arc::new(SessionRegistry::new()),
            intents: Arc::new(IntentLog::new()),
        }
    }
}

pub async fn create_app(directory: Arc<Directory>) -> Result<Router, AppError> {
    let jwt_config = JwtConfig::from_env()?;
    let state = AppState::new(directory, jwt_config);

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_origin(Any)
        .allow_headers(Any);

    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/me", get(auth::me))
        .route("/logout", post(auth::logout));

    let project_routes = Router::new()
        .route("/", get(projects::list_projects))
        .route("/", post(projects::create_project))
        .route("/:project_id", get(projects::get_project))
        .route("/:project_id", delete(projects::delete_project))
        .route("/:project_id/assign", post(projects::assign_member));

    // Tasks are scoped to a project: /projects/:project_id/tasks
    let task_routes = Router::new()
        .route("/", get(tasks::list_project_tasks))
        .route("/", post(tasks::create_task));

    let chat_routes = Router::new()
        .route("/peers", get(chat::list_peers))
        .route("/rooms", get(chat::list_rooms));

    let router = Router::new()
        .nest("/auth", auth_routes)
        .nest("/projects", project_routes)
        .nest("/projects/:project_id/tasks", task_routes)
        .route("/tasks", get(tasks::list_tasks))
        .route("/team", get(team::list_team))
        .nest("/chat", chat_routes)
        .route("/intents", get(intents::list_intents))
        .route("/api/health", get(health::health))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(router)
}
