use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use service::profile::domain::{
    CreateProfile, PrivacySettings, ProfileCompletion, ProfileSearch, UpdateProfile, UserProfileDto,
};
use service::profile::{profile_service, ImageKind};

use crate::errors::ApiError;
use crate::extract::{plain_text, ApiJson, ApiPath, ApiQuery};
use crate::routes::{certifications, education, work_experience};
use crate::state::AppState;

type Profiles = Result<Json<Vec<UserProfileDto>>, ApiError>;

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub url: String,
}

#[utoipa::path(post, path = "/api/v1/users", tag = "users", request_body = crate::openapi::CreateProfileDoc, responses((status = 201, description = "Created"), (status = 400, description = "Invalid input or duplicate email")))]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<CreateProfile>,
) -> Result<(StatusCode, Json<UserProfileDto>), ApiError> {
    let created = profile_service::create_profile(&state.db, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/v1/users", tag = "users", responses((status = 200, description = "All profiles")))]
pub async fn list(State(state): State<AppState>) -> Profiles {
    Ok(Json(profile_service::list_profiles(&state.db).await?))
}

#[utoipa::path(get, path = "/api/v1/users/public", tag = "users", responses((status = 200, description = "Public profiles")))]
pub async fn list_public(State(state): State<AppState>) -> Profiles {
    Ok(Json(profile_service::list_public_profiles(&state.db).await?))
}

#[utoipa::path(get, path = "/api/v1/users/{userId}", tag = "users", params(("userId" = i32, Path, description = "Profile id")), responses((status = 200, description = "Profile"), (status = 404, description = "Not found")))]
pub async fn get_one(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<UserProfileDto>, ApiError> {
    Ok(Json(profile_service::get_profile(&state.db, user_id).await?))
}

pub async fn get_by_email(
    State(state): State<AppState>,
    ApiPath(email): ApiPath<String>,
) -> Result<Json<UserProfileDto>, ApiError> {
    Ok(Json(profile_service::get_profile_by_email(&state.db, &email).await?))
}

pub async fn create_or_get_by_email(
    State(state): State<AppState>,
    ApiPath(email): ApiPath<String>,
) -> Result<Json<UserProfileDto>, ApiError> {
    Ok(Json(profile_service::create_or_get_by_email(&state.db, &email).await?))
}

#[utoipa::path(get, path = "/api/v1/users/{userId}/public", tag = "users", params(("userId" = i32, Path, description = "Profile id")), responses((status = 200, description = "Public profile"), (status = 404, description = "Missing or private")))]
pub async fn get_public(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<UserProfileDto>, ApiError> {
    Ok(Json(profile_service::get_public_profile(&state.db, user_id).await?))
}

#[utoipa::path(put, path = "/api/v1/users/{userId}", tag = "users", params(("userId" = i32, Path, description = "Profile id")), request_body = crate::openapi::UpdateProfileDoc, responses((status = 200, description = "Updated"), (status = 400, description = "Invalid input"), (status = 404, description = "Not found")))]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
    ApiJson(input): ApiJson<UpdateProfile>,
) -> Result<Json<UserProfileDto>, ApiError> {
    Ok(Json(profile_service::update_profile(&state.db, user_id, &input).await?))
}

#[utoipa::path(delete, path = "/api/v1/users/{userId}", tag = "users", params(("userId" = i32, Path, description = "Profile id")), responses((status = 204, description = "Deleted with all owned records"), (status = 404, description = "Not found")))]
pub async fn delete(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Result<StatusCode, ApiError> {
    profile_service::delete_profile(&state.db, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(post, path = "/api/v1/users/search", tag = "users", params(ProfileSearchParams), responses((status = 200, description = "Profiles matching every given filter")))]
pub async fn search(State(state): State<AppState>, ApiQuery(q): ApiQuery<ProfileSearch>) -> Profiles {
    Ok(Json(profile_service::search_profiles(&state.db, &q).await?))
}

/// Query parameters of `/search`, for the API document only.
#[derive(utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
#[allow(dead_code)]
pub struct ProfileSearchParams {
    keyword: Option<String>,
    location: Option<String>,
    industry: Option<String>,
    company: Option<String>,
}

pub async fn search_by_skills(State(state): State<AppState>, ApiJson(skills): ApiJson<Vec<String>>) -> Profiles {
    Ok(Json(profile_service::search_by_skills(&state.db, &skills).await?))
}

pub async fn search_by_location(State(state): State<AppState>, body: String) -> Profiles {
    Ok(Json(profile_service::search_by_location(&state.db, &plain_text(&body)).await?))
}

pub async fn search_by_company(State(state): State<AppState>, body: String) -> Profiles {
    Ok(Json(profile_service::search_by_company(&state.db, &plain_text(&body)).await?))
}

pub async fn search_by_industry(State(state): State<AppState>, body: String) -> Profiles {
    Ok(Json(profile_service::search_by_industry(&state.db, &plain_text(&body)).await?))
}

#[utoipa::path(get, path = "/api/v1/users/completion/{threshold}", tag = "users", params(("threshold" = i32, Path, description = "Exclusive lower bound")), responses((status = 200, description = "Profiles above the threshold")))]
pub async fn completion_above(State(state): State<AppState>, ApiPath(threshold): ApiPath<i32>) -> Profiles {
    Ok(Json(profile_service::with_completion_above(&state.db, threshold).await?))
}

#[utoipa::path(get, path = "/api/v1/users/{userId}/privacy-settings", tag = "users", params(("userId" = i32, Path, description = "Profile id")), responses((status = 200, description = "Privacy flags"), (status = 404, description = "Not found")))]
pub async fn get_privacy(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<PrivacySettings>, ApiError> {
    Ok(Json(profile_service::get_privacy_settings(&state.db, user_id).await?))
}

#[utoipa::path(put, path = "/api/v1/users/{userId}/privacy-settings", tag = "users", params(("userId" = i32, Path, description = "Profile id")), request_body = crate::openapi::PrivacySettingsDoc, responses((status = 200, description = "Updated flags"), (status = 404, description = "Not found")))]
pub async fn update_privacy(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
    ApiJson(settings): ApiJson<PrivacySettings>,
) -> Result<Json<PrivacySettings>, ApiError> {
    Ok(Json(profile_service::update_privacy_settings(&state.db, user_id, &settings).await?))
}

#[utoipa::path(get, path = "/api/v1/users/{userId}/completion", tag = "users", params(("userId" = i32, Path, description = "Profile id")), responses((status = 200, description = "Percentage, completeness and missing fields"), (status = 404, description = "Not found")))]
pub async fn completion(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<Json<ProfileCompletion>, ApiError> {
    Ok(Json(profile_service::get_completion(&state.db, user_id).await?))
}

/// First multipart field named `file`: its original filename and bytes.
async fn read_file_field(mut multipart: Multipart) -> Result<(Option<String>, Vec<u8>), ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {e}")))?;
        return Ok((file_name, bytes.to_vec()));
    }
    Err(ApiError::bad_request("File is required"))
}

async fn upload(state: AppState, user_id: i32, kind: ImageKind, multipart: Multipart) -> Result<Json<UploadedImage>, ApiError> {
    let (file_name, bytes) = read_file_field(multipart).await?;
    let url = state
        .uploads
        .save_image(&state.db, user_id, kind, file_name.as_deref(), &bytes)
        .await?;
    Ok(Json(UploadedImage { url }))
}

pub async fn upload_profile_picture(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
    multipart: Multipart,
) -> Result<Json<UploadedImage>, ApiError> {
    upload(state, user_id, ImageKind::ProfilePicture, multipart).await
}

pub async fn delete_profile_picture(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Result<StatusCode, ApiError> {
    state.uploads.delete_image(&state.db, user_id, ImageKind::ProfilePicture).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn upload_banner_image(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i32>,
    multipart: Multipart,
) -> Result<Json<UploadedImage>, ApiError> {
    upload(state, user_id, ImageKind::Banner, multipart).await
}

pub async fn delete_banner_image(State(state): State<AppState>, ApiPath(user_id): ApiPath<i32>) -> Result<StatusCode, ApiError> {
    state.uploads.delete_image(&state.db, user_id, ImageKind::Banner).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `/api/v1/users`, including the nested work-experience, education and certification routes.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/public", get(list_public))
        .route("/email/:email", get(get_by_email).post(create_or_get_by_email))
        .route("/search", post(search))
        .route("/search/skills", post(search_by_skills))
        .route("/search/location", post(search_by_location))
        .route("/search/company", post(search_by_company))
        .route("/search/industry", post(search_by_industry))
        .route("/completion/:threshold", get(completion_above))
        .route("/:user_id", get(get_one).put(update).delete(delete))
        .route("/:user_id/public", get(get_public))
        .route("/:user_id/privacy-settings", get(get_privacy).put(update_privacy))
        .route("/:user_id/completion", get(completion))
        .route("/:user_id/profile-picture", post(upload_profile_picture).delete(delete_profile_picture))
        .route("/:user_id/banner-image", post(upload_banner_image).delete(delete_banner_image))
        .merge(work_experience::router())
        .merge(education::router())
        .merge(certifications::router())
}
