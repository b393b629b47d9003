use serde::{Deserialize, Serialize};

pub use models::connection::ConnectionStatus;

/// Status reported for a pair with no stored connection.
pub const STATUS_NONE: &str = "NONE";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    pub id: i32,
    pub requester_id: i64,
    pub receiver_id: i64,
    pub status: ConnectionStatus,
}

/// Body shared by request, accept and reject; accept/reject only read `connection_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionRequest {
    pub requester_id: Option<i64>,
    pub receiver_id: Option<i64>,
    pub connection_id: Option<i32>,
}
