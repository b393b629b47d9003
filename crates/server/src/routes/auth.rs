use axum::{
    extract::State,
    middleware,
    routing::{get, post, put},
    Extension, Json, Router,
};
use serde::Deserialize;

use common::types::MessageBody;
use service::auth::domain::{AuthResponse, AuthUser, LoginInput, RegisterInput};

use crate::auth::{require_bearer_token_state, CurrentUser};
use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TokenQuery {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordQuery {
    pub email: String,
    pub token: String,
    pub new_password: String,
}

#[utoipa::path(post, path = "/api/v1/authentication/register", tag = "auth", request_body = crate::openapi::CredentialsDoc, responses((status = 200, description = "Registered", body = crate::openapi::AuthResponseDoc), (status = 400, description = "Invalid input or duplicate email")))]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(state.auth.register(input).await?))
}

#[utoipa::path(post, path = "/api/v1/authentication/login", tag = "auth", request_body = crate::openapi::CredentialsDoc, responses((status = 200, description = "Logged in", body = crate::openapi::AuthResponseDoc), (status = 400, description = "Unknown email or wrong password")))]
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<Json<AuthResponse>, ApiError> {
    Ok(Json(state.auth.login(input).await?))
}

#[utoipa::path(get, path = "/api/v1/authentication/user", tag = "auth", responses((status = 200, description = "Current user"), (status = 401, description = "Unauthorized")))]
pub async fn current_user(Extension(CurrentUser(user)): Extension<CurrentUser>) -> Json<AuthUser> {
    Json(user)
}

#[utoipa::path(get, path = "/api/v1/authentication/send-email-verification-token", tag = "auth", responses((status = 200, description = "Code sent"), (status = 400, description = "Already verified"), (status = 401, description = "Unauthorized")))]
pub async fn send_email_verification_token(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<MessageBody>, ApiError> {
    state.auth.send_email_verification_token(&user.email).await?;
    Ok(Json(MessageBody::new("Email verification sent successfully")))
}

#[utoipa::path(put, path = "/api/v1/authentication/validate-email-verification-token", tag = "auth", params(("token" = String, Query, description = "Emailed code")), responses((status = 200, description = "Verified"), (status = 400, description = "Expired or wrong code"), (status = 401, description = "Unauthorized")))]
pub async fn validate_email_verification_token(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    ApiQuery(q): ApiQuery<TokenQuery>,
) -> Result<Json<MessageBody>, ApiError> {
    state.auth.validate_email_verification_token(&user.email, &q.token).await?;
    Ok(Json(MessageBody::new("Email verified successfully")))
}

#[utoipa::path(put, path = "/api/v1/authentication/send-password-reset-token", tag = "auth", params(("email" = String, Query, description = "Account email")), responses((status = 200, description = "Code sent"), (status = 400, description = "User not found")))]
pub async fn send_password_reset_token(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<EmailQuery>,
) -> Result<Json<MessageBody>, ApiError> {
    state.auth.send_password_reset_token(&q.email).await?;
    Ok(Json(MessageBody::new("Password reset sent successfully")))
}

#[utoipa::path(put, path = "/api/v1/authentication/reset-password", tag = "auth", params(("email" = String, Query, description = "Account email"), ("token" = String, Query, description = "Emailed code"), ("newPassword" = String, Query, description = "Replacement password")), responses((status = 200, description = "Password changed"), (status = 400, description = "Expired or wrong code")))]
pub async fn reset_password(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ResetPasswordQuery>,
) -> Result<Json<MessageBody>, ApiError> {
    state.auth.reset_password(&q.email, &q.new_password, &q.token).await?;
    Ok(Json(MessageBody::new("Password reset successfully")))
}

/// `/api/v1/authentication`; `user` and the email-verification pair require a bearer token.
pub fn router(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/user", get(current_user))
        .route("/send-email-verification-token", get(send_email_verification_token))
        .route("/validate-email-verification-token", put(validate_email_verification_token))
        .route_layer(middleware::from_fn_with_state(state, require_bearer_token_state));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/send-password-reset-token", put(send_password_reset_token))
        .route("/reset-password", put(reset_password))
        .merge(protected)
}
