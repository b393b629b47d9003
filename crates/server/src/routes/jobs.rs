use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;

use models::job;
use service::errors::ServiceError;
use service::job_service::{self, JobInput};
use service::pagination::Pagination;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// `?page=&size=`; both absent means the full list.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl PageQuery {
    pub fn pagination(&self) -> Option<Pagination> {
        if self.page.is_none() && self.size.is_none() {
            return None;
        }
        let d = Pagination::default();
        Some(Pagination { page: self.page.unwrap_or(d.page), per_page: self.size.unwrap_or(d.per_page) })
    }
}

#[utoipa::path(get, path = "/api/jobs", tag = "jobs", params(("page" = Option<u32>, Query, description = "1-based page"), ("size" = Option<u32>, Query, description = "Page size")), responses((status = 200, description = "Jobs ordered by id")))]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<PageQuery>,
) -> Result<Json<Vec<job::Model>>, ApiError> {
    Ok(Json(job_service::list_jobs(&state.db, q.pagination()).await?))
}

#[utoipa::path(get, path = "/api/jobs/{id}", tag = "jobs", params(("id" = i32, Path, description = "Job id")), responses((status = 200, description = "Job"), (status = 404, description = "Not found")))]
pub async fn get_one(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<job::Model>, ApiError> {
    job_service::get_job(&state.db, id)
        .await?
        .map(Json)
        .ok_or_else(|| ServiceError::not_found("Job").into())
}

#[utoipa::path(post, path = "/api/jobs", tag = "jobs", request_body = crate::openapi::JobInputDoc, responses((status = 200, description = "Created"), (status = 400, description = "Invalid input")))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<JobInput>,
) -> Result<Json<job::Model>, ApiError> {
    Ok(Json(job_service::create_job(&state.db, &input).await?))
}

#[utoipa::path(put, path = "/api/jobs/{id}", tag = "jobs", params(("id" = i32, Path, description = "Job id")), request_body = crate::openapi::JobInputDoc, responses((status = 200, description = "Updated"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(input): ApiJson<JobInput>,
) -> Result<Json<job::Model>, ApiError> {
    Ok(Json(job_service::update_job(&state.db, id, &input).await?))
}

#[utoipa::path(delete, path = "/api/jobs/{id}", tag = "jobs", params(("id" = i32, Path, description = "Job id")), responses((status = 204, description = "Deleted"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<StatusCode, ApiError> {
    job_service::delete_job(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/:id", get(get_one).put(update).delete(delete))
}
