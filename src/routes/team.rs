use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::authz;
use crate::errors::AppResult;
use crate::models::user::User;
use crate::session::CurrentUser;

#[utoipa::path(
    get,
    path = "/team",
    tag = "Team",
    responses((
        status = 200,
        description = "Team members visible to the principal, ordered by hierarchy depth",
        body = [User]
    ))
)]
pub async fn list_team(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    let users = state.directory.users();
    Ok(Json(authz::visible_team_members(&auth.principal, &users)))
}
