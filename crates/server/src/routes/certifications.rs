use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use service::profile::certification_service as svc;
use service::profile::domain::CertificationDto;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

type Entries = Result<Json<Vec<CertificationDto>>, ApiError>;
type Entry = Result<Json<CertificationDto>, ApiError>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenewQuery {
    pub expiration_date: NaiveDate,
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}

#[utoipa::path(post, path = "/api/v1/users/{userId}/certifications", tag = "certifications", params(("userId" = i32, Path, description = "Profile id")), request_body = crate::openapi::CertificationDoc, responses((status = 201, description = "Created"), (status = 400, description = "Invalid input"), (status = 404, description = "Profile not found")))]
pub async fn create(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
    ApiJson(input): ApiJson<CertificationDto>,
) -> Result<(StatusCode, Json<CertificationDto>), ApiError> {
    let created = svc::create_certification(&state.db, user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/v1/users/{userId}/certifications", tag = "certifications", params(("userId" = i32, Path, description = "Profile id")), responses((status = 200, description = "Newest issue date first")))]
pub async fn list(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Entries {
    Ok(Json(svc::list_certifications(&state.db, user_id).await?))
}

pub async fn get_one(State(state): State<AppState>, ApiPath((user_id, id)): ApiPath<(i32, i32)>) -> Entry {
    Ok(Json(svc::get_certification(&state.db, user_id, id).await?))
}

pub async fn update(
    State(state): State<AppState>,
    ApiPath((user_id, id)): ApiPath<(i32, i32)>,
    ApiJson(input): ApiJson<CertificationDto>,
) -> Entry {
    Ok(Json(svc::update_certification(&state.db, user_id, id, &input).await?))
}

pub async fn delete(State(state): State<AppState>, ApiPath((user_id, id)): ApiPath<(i32, i32)>) -> Result<StatusCode, ApiError> {
    svc::delete_certification(&state.db, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn by_organization(State(state): State<AppState>, ApiPath((user_id, v)): ApiPath<(i32, String)>) -> Entries {
    Ok(Json(svc::by_organization(&state.db, user_id, &v).await?))
}

pub async fn by_name(State(state): State<AppState>, ApiPath((user_id, v)): ApiPath<(i32, String)>) -> Entries {
    Ok(Json(svc::by_name(&state.db, user_id, &v).await?))
}

pub async fn valid(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Entries {
    Ok(Json(svc::valid_on(&state.db, user_id, today()).await?))
}

pub async fn expired(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Entries {
    Ok(Json(svc::expired_on(&state.db, user_id, today()).await?))
}

pub async fn expiring_soon(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Entries {
    Ok(Json(svc::expiring_soon(&state.db, user_id, today()).await?))
}

#[utoipa::path(put, path = "/api/v1/users/{userId}/certifications/{id}/renew", tag = "certifications", params(("userId" = i32, Path, description = "Profile id"), ("id" = i32, Path, description = "Certification id"), ("expirationDate" = String, Query, description = "YYYY-MM-DD")), responses((status = 200, description = "Renewed"), (status = 400, description = "Expiry before issue"), (status = 404, description = "Not found")))]
pub async fn renew(
    State(state): State<AppState>,
    ApiPath((user_id, id)): ApiPath<(i32, i32)>,
    ApiQuery(q): ApiQuery<RenewQuery>,
) -> Entry {
    Ok(Json(svc::renew(&state.db, user_id, id, q.expiration_date).await?))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/:user_id/certifications", get(list).post(create))
        .route("/:user_id/certifications/valid", get(valid))
        .route("/:user_id/certifications/expired", get(expired))
        .route("/:user_id/certifications/expiring-soon", get(expiring_soon))
        .route("/:user_id/certifications/organization/:value", get(by_organization))
        .route("/:user_id/certifications/name/:value", get(by_name))
        .route("/:user_id/certifications/:id", get(get_one).put(update).delete(delete))
        .route("/:user_id/certifications/:id/renew", put(renew))
}
