use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use service::auth::domain::AuthUser;

use crate::errors::ApiError;
use crate::state::AppState;

/// Account resolved from the bearer token, available to protected handlers as an extension.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub AuthUser);

fn bearer_token(req: &Request) -> Option<String> {
    req.headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

/// Require `Authorization: Bearer <jwt>` naming an existing account; 401 otherwise.
pub async fn require_bearer_token_state(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path().to_string();
    let Some(token) = bearer_token(&req) else {
        tracing::warn!(%path, "missing or malformed Authorization header");
        return Err(ApiError::unauthorized("Missing or invalid Authorization header"));
    };
    match state.auth.authenticate(&token).await {
        Ok(user) => {
            req.extensions_mut().insert(CurrentUser(user));
            Ok(next.run(req).await)
        }
        Err(e) => {
            tracing::warn!(%path, error = %e, "token validation failed");
            Err(ApiError::unauthorized("Invalid or expired token"))
        }
    }
}
