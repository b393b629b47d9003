use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;

use service::profile::domain::WorkExperienceDto;
use service::profile::work_experience_service as svc;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

type Entries = Result<Json<Vec<WorkExperienceDto>>, ApiError>;
type Entry = Result<Json<WorkExperienceDto>, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndDateQuery {
    pub end_date: NaiveDate,
}

#[utoipa::path(post, path = "/api/v1/users/{userId}/work-experience", tag = "work-experience", params(("userId" = i32, Path, description = "Profile id")), request_body = crate::openapi::WorkExperienceDoc, responses((status = 201, description = "Created"), (status = 400, description = "Invalid input"), (status = 404, description = "Profile not found")))]
pub async fn create(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
    ApiJson(input): ApiJson<WorkExperienceDto>,
) -> Result<(StatusCode, Json<WorkExperienceDto>), ApiError> {
    let created = svc::create_work_experience(&state.db, user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/v1/users/{userId}/work-experience", tag = "work-experience", params(("userId" = i32, Path, description = "Profile id")), responses((status = 200, description = "Newest start date first")))]
pub async fn list(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Entries {
    Ok(Json(svc::list_work_experience(&state.db, user_id).await?))
}

pub async fn get_one(State(state): State<AppState>, ApiPath((user_id, id)): ApiPath<(i32, i32)>) -> Entry {
    Ok(Json(svc::get_work_experience(&state.db, user_id, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath((user_id, id)): ApiPath<(i32, i32)>,
    ApiJson(input): ApiJson<WorkExperienceDto>,
) -> Entry {
    Ok(Json(svc::update_work_experience(&state.db, user_id, id, &input).await?))
}

pub async fn delete(State(state): State<AppState>, ApiPath((user_id, id)): ApiPath<(i32, i32)>) -> Result<StatusCode, ApiError> {
    svc::delete_work_experience(&state.db, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_company(State(state): State<AppState>, ApiPath((user_id, company)): ApiPath<(i32, String)>) -> Entries {
    Ok(Json(svc::by_company(&state.db, user_id, &company).await?))
}

pub async fn current(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Entries {
    Ok(Json(svc::current_positions(&state.db, user_id).await?))
}

pub async fn mark_current(State(state): State<AppState>, ApiPath((user_id, id)): ApiPath<(i32, i32)>) -> Entry {
    Ok(Json(svc::mark_as_current(&state.db, user_id, id).await?))
}

#[utoipa::path(put, path = "/api/v1/users/{userId}/work-experience/{id}/end-position", tag = "work-experience", params(("userId" = i32, Path, description = "Profile id"), ("id" = i32, Path, description = "Entry id"), ("endDate" = String, Query, description = "YYYY-MM-DD")), responses((status = 200, description = "Ended"), (status = 400, description = "End before start"), (status = 404, description = "Not found")))]
pub async fn end_position(
    State(state): State<AppState>,
    ApiPath((user_id, id)): ApiPath<(i32, i32)>,
    ApiQuery(q): ApiQuery<EndDateQuery>,
) -> Entry {
    Ok(Json(svc::end_position(&state.db, user_id, id, q.end_date).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:user_id/work-experience", get(list).post(create))
        .route("/:user_id/work-experience/current", get(current))
        .route("/:user_id/work-experience/company/:company", get(by_company))
        .route("/:user_id/work-experience/:id", get(get_one).put(update).delete(delete))
        .route("/:user_id/work-experience/:id/mark-current", put(mark_current))
        .route("/:user_id/work-experience/:id/end-position", put(end_position))
}
