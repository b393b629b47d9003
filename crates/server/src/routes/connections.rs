use axum::{
    extract::State,
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;

use common::types::ApiResponse;
use service::connection::domain::{Connection, ConnectionRequest};

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PairQuery {
    pub requester_id: i64,
    pub receiver_id: i64,
}

#[utoipa::path(post, path = "/api/v1/connections/request", tag = "connections", request_body = crate::openapi::ConnectionRequestDoc, responses((status = 200, description = "Request sent"), (status = 400, description = "Invalid or duplicate request")))]
pub async fn send_request(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ConnectionRequest>,
) -> Result<Json<ApiResponse<Connection>>, ApiError> {
    let conn = state.connections.send_request(&req).await?;
    Ok(Json(ApiResponse::success("Connection request sent", conn)))
}

#[utoipa::path(post, path = "/api/v1/connections/accept", tag = "connections", request_body = crate::openapi::ConnectionRequestDoc, responses((status = 200, description = "Accepted"), (status = 404, description = "Connection not found")))]
pub async fn accept_request(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ConnectionRequest>,
) -> Result<Json<ApiResponse<Connection>>, ApiError> {
    let conn = state.connections.accept_request(req.connection_id).await?;
    Ok(Json(ApiResponse::success("Connection request accepted", conn)))
}

#[utoipa::path(post, path = "/api/v1/connections/reject", tag = "connections", request_body = crate::openapi::ConnectionRequestDoc, responses((status = 200, description = "Rejected"), (status = 404, description = "Connection not found")))]
pub async fn reject_request(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<ConnectionRequest>,
) -> Result<Json<ApiResponse<Connection>>, ApiError> {
    let conn = state.connections.reject_request(req.connection_id).await?;
    Ok(Json(ApiResponse::success("Connection request rejected", conn)))
}

#[utoipa::path(get, path = "/api/v1/connections", tag = "connections", params(("userId" = i64, Query, description = "User whose connections to list")), responses((status = 200, description = "Pending and accepted connections")))]
pub async fn list_connections(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<UserQuery>,
) -> Result<Json<ApiResponse<Vec<Connection>>>, ApiError> {
    let list = state.connections.list_connections(q.user_id).await?;
    Ok(Json(ApiResponse::success("Connections fetched", list)))
}

#[utoipa::path(delete, path = "/api/v1/connections/{id}", tag = "connections", params(("id" = i32, Path, description = "Connection id")), responses((status = 200, description = "Removed"), (status = 404, description = "Connection not found")))]
pub async fn remove_connection(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.connections.remove_connection(id).await?;
    Ok(Json(ApiResponse::empty("Connection removed")))
}

#[utoipa::path(get, path = "/api/v1/connections/status", tag = "connections", params(("requesterId" = i64, Query, description = "Requester"), ("receiverId" = i64, Query, description = "Receiver")), responses((status = 200, description = "Status string or NONE")))]
pub async fn connection_status(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<PairQuery>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let status = state.connections.get_connection_status(q.requester_id, q.receiver_id).await?;
    Ok(Json(ApiResponse::success("Connection status fetched", status)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_connections))
        .route("/request", post(send_request))
        .route("/accept", post(accept_request))
        .route("/reject", post(reject_request))
        .route("/status", get(connection_status))
        .route("/:id", delete(remove_connection))
}
