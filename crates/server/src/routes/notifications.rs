use axum::{
    extract::State,
    routing::{get, post, put},
    Json, Router,
};

use models::notification;
use service::notification_service::{self, NewNotification};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

#[utoipa::path(post, path = "/api/notifications", tag = "notifications", request_body = crate::openapi::NewNotificationDoc, responses((status = 200, description = "Created"), (status = 400, description = "Invalid input")))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewNotification>,
) -> Result<Json<notification::Model>, ApiError> {
    Ok(Json(notification_service::create_notification(&state.db, &input).await?))
}

#[utoipa::path(get, path = "/api/notifications/{userId}", tag = "notifications", params(("userId" = String, Path, description = "Recipient")), responses((status = 200, description = "Newest first")))]
pub async fn for_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<String>,
) -> Result<Json<Vec<notification::Model>>, ApiError> {
    Ok(Json(notification_service::list_for_user(&state.db, &user_id).await?))
}

#[utoipa::path(put, path = "/api/notifications/{id}/read", tag = "notifications", params(("id" = i32, Path, description = "Notification id")), responses((status = 200, description = "Marked read"), (status = 404, description = "Not found")))]
pub async fn mark_read(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<notification::Model>, ApiError> {
    Ok(Json(notification_service::mark_as_read(&state.db, id).await?))
}

// The list and mark-read routes share the `:id` segment; for listing it carries the user id.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create))
        .route("/:id", get(for_user))
        .route("/:id/read", put(mark_read))
}
