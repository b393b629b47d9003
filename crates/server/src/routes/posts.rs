use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use models::post;
use service::post_service::{self, PostInput};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::routes::jobs::PageQuery;
use crate::state::AppState;

#[utoipa::path(post, path = "/api/posts", tag = "posts", request_body = crate::openapi::PostInputDoc, responses((status = 200, description = "Created"), (status = 400, description = "Invalid input")))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<PostInput>,
) -> Result<Json<post::Model>, ApiError> {
    Ok(Json(post_service::create_post(&state.db, &input).await?))
}

#[utoipa::path(get, path = "/api/posts", tag = "posts", params(("page" = Option<u32>, Query, description = "1-based page"), ("size" = Option<u32>, Query, description = "Page size")), responses((status = 200, description = "Posts ordered by id")))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Vec<post::Model>>, ApiError> {
    Ok(Json(post_service::list_posts(&state.db, q.pagination()).await?))
}

#[utoipa::path(get, path = "/api/posts/{id}", tag = "posts", params(("id" = i32, Path, description = "Post id")), responses((status = 200, description = "Post"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<post::Model>, ApiError> {
    Ok(Json(post_service::get_post(&state.db, id).await?))
}

#[utoipa::path(put, path = "/api/posts/{id}", tag = "posts", params(("id" = i32, Path, description = "Post id")), request_body = crate::openapi::PostInputDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<PostInput>,
) -> Result<Json<post::Model>, ApiError> {
    Ok(Json(post_service::update_post(&state.db, id, &input).await?))
}

#[utoipa::path(delete, path = "/api/posts/{id}", tag = "posts", params(("id" = i32, Path, description = "Post id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, ApiError> {
    post_service::delete_post(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(delete))
}
