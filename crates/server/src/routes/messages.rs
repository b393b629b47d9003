use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use models::message;
use service::message_service::{self, SendMessage};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ConversationQuery {
    pub user1: i64,
    pub user2: i64,
}

#[utoipa::path(post, path = "/api/messages", tag = "messages", request_body = crate::openapi::SendMessageDoc, responses((status = 200, description = "Sent"), (status = 400, description = "Invalid input")))]
pub async fn send(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SendMessage>,
) -> Result<Json<message::Model>, ApiError> {
    Ok(Json(message_service::send_message(&state.db, &input).await?))
}

#[utoipa::path(get, path = "/api/messages/{id}", tag = "messages", params(("id" = i32, Path, description = "Message id")), responses((status = 200, description = "Message"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<message::Model>, ApiError> {
    Ok(Json(message_service::get_message(&state.db, id).await?))
}

#[utoipa::path(get, path = "/api/messages/conversation", tag = "messages", params(("user1" = i64, Query, description = "First participant"), ("user2" = i64, Query, description = "Second participant")), responses((status = 200, description = "Both directions, oldest first")))]
pub async fn conversation(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ConversationQuery>,
) -> Result<Json<Vec<message::Model>>, ApiError> {
    Ok(Json(message_service::get_conversation(&state.db, q.user1, q.user2).await?))
}

#[utoipa::path(get, path = "/api/messages/inbox/{userId}", tag = "messages", params(("userId" = i64, Path, description = "Receiver")), responses((status = 200, description = "Received messages, newest first")))]
pub async fn inbox(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<Vec<message::Model>>, ApiError> {
    Ok(Json(message_service::get_inbox(&state.db, user_id).await?))
}

#[utoipa::path(delete, path = "/api/messages/{id}", tag = "messages", params(("id" = i32, Path, description = "Message id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, ApiError> {
    message_service::delete_message(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(send))
        .route("/conversation", get(conversation))
        .route("/inbox/:user_id", get(inbox))
        .route("/:id", get(get_one).delete(delete))
}
