use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::authz;
use crate::errors::{AppError, AppResult};
use crate::events::IntentRecord;
use crate::session::CurrentUser;

#[utoipa::path(
    get,
    path = "/intents",
    tag = "Intents",
    responses(
        (status = 200, description = "Recorded intended mutations", body = [IntentRecord]),
        (status = 403, description = "Principal may not view the intent log")
    )
)]
pub async fn list_intents(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> AppResult<Json<Vec<IntentRecord>>> {
    if !authz::can_manage(&auth.principal, None) {
        return Err(AppError::forbidden("not allowed to view the intent log"));
    }

    Ok(Json(state.intents.all()))
}
