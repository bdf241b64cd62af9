use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::authz;
use crate::errors::AppResult;
use crate::models::chat::ChatRoom;
use crate::models::user::User;
use crate::session::CurrentUser;

#[utoipa::path(
    get,
    path = "/chat/peers",
    tag = "Chat",
    responses((
        status = 200,
        description = "Users the principal may open a conversation with",
        body = [User]
    ))
)]
pub async fn list_peers(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> AppResult<Json<Vec<User>>> {
    let users = state.directory.users();
    Ok(Json(authz::authorized_chat_peers(&auth.principal, &users)))
}

#[utoipa::path(
    get,
    path = "/chat/rooms",
    tag = "Chat",
    responses((
        status = 200,
        description = "Chat rooms the principal participates in",
        body = [ChatRoom]
    ))
)]
pub async fn list_rooms(
    State(state): State<AppState>,
    auth: CurrentUser,
) -> AppResult<Json<Vec<ChatRoom>>> {
    Ok(Json(authz::visible_chat_rooms(
        &auth.principal,
        state.directory.rooms(),
    )))
}
