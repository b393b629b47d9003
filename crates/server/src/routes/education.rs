use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};

use service::profile::domain::EducationDto;
use service::profile::education_service as svc;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::state::AppState;

type Entries = Result<Json<Vec<EducationDto>>, ApiError>;
type Entry = Result<Json<EducationDto>, ApiError>;

#[utoipa::path(post, path = "/api/v1/users/{userId}/education", tag = "education", params(("userId" = i32, Path, description = "Profile id")), request_body = crate::openapi::EducationDoc, responses((status = 201, description = "Created"), (status = 400, description = "Invalid input"), (status = 404, description = "Profile not found")))]
pub async fn create(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
    ApiJson(input): ApiJson<EducationDto>,
) -> Result<(StatusCode, Json<EducationDto>), ApiError> {
    let created = svc::create_education(&state.db, user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/v1/users/{userId}/education", tag = "education", params(("userId" = i32, Path, description = "Profile id")), responses((status = 200, description = "Newest start date first")))]
pub async fn list(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Entries {
    Ok(Json(svc::list_education(&state.db, user_id).await?))
}

pub async fn get_one(State(state): State<AppState>, ApiPath((user_id, id)): ApiPath<(i32, i32)>) -> Entry {
    Ok(Json(svc::get_education(&state.db, user_id, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath((user_id, id)): ApiPath<(i32, i32)>,
    ApiJson(input): ApiJson<EducationDto>,
) -> Entry {
    Ok(Json(svc::update_education(&state.db, user_id, id, &input).await?))
}

pub async fn delete(State(state): State<AppState>, ApiPath((user_id, id)): ApiPath<(i32, i32)>) -> Result<StatusCode, ApiError> {
    svc::delete_education(&state.db, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_institution(State(state): State<AppState>, ApiPath((user_id, v)): ApiPath<(i32, String)>) -> Entries {
    Ok(Json(svc::by_institution(&state.db, user_id, &v).await?))
}

pub async fn by_degree(State(state): State<AppState>, ApiPath((user_id, v)): ApiPath<(i32, String)>) -> Entries {
    Ok(Json(svc::by_degree(&state.db, user_id, &v).await?))
}

pub async fn by_field(State(state): State<AppState>, ApiPath((user_id, v)): ApiPath<(i32, String)>) -> Entries {
    Ok(Json(svc::by_field_of_study(&state.db, user_id, &v).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:user_id/education", get(list).post(create))
        .route("/:user_id/education/institution/:value", get(by_institution))
        .route("/:user_id/education/degree/:value", get(by_degree))
        .route("/:user_id/education/field/:value", get(by_field))
        .route("/:user_id/education/:id", get(get_one).put(update).delete(delete))
}
