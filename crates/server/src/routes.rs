pub mod auth;
pub mod certifications;
pub mod connections;
pub mod education;
pub mod jobs;
pub mod messages;
pub mod notifications;
pub mod posts;
pub mod users;
pub mod work_experience;

use axum::{routing::get, Json, Router};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::profile::uploads::URL_PREFIX;

use crate::openapi::ApiDoc;
use crate::state::AppState;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router; route groups disabled in `server.services` are not mounted.
pub fn build_router(state: AppState) -> Router {
    let cfg = state.config.clone();
    let mut app = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    if cfg.service_enabled("auth") {
        app = app.nest("/api/v1/authentication", auth::router(state.clone()));
    }
    if cfg.service_enabled("users") {
        app = app
            .nest("/api/v1/users", users::router())
            .nest_service(URL_PREFIX, ServeDir::new(state.uploads.root()));
    }
    if cfg.service_enabled("connections") {
        app = app.nest("/api/v1/connections", connections::router());
    }
    if cfg.service_enabled("jobs") {
        app = app.nest("/api/jobs", jobs::router());
    }
    if cfg.service_enabled("messages") {
        app = app.nest("/api/messages", messages::router());
    }
    if cfg.service_enabled("notifications") {
        app = app.nest("/api/notifications", notifications::router());
    }
    if cfg.service_enabled("posts") {
        app = app.nest("/api/posts", posts::router());
    }

    app.with_state(state)
        .layer(CorsLayer::very_permissive())
        .layer(
            TraceLayer::new_for_http()
                // one span per request with method and path
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // status code and latency
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
