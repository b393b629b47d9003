use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// Envelope used by the connection endpoints: `{ message, data, status }`.
#[derive(Serialize, Debug, Clone)]
pub struct ApiResponse<T> {
    pub message: String,
    pub data: Option<T>,
    pub status: &'static str,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self { message: message.into(), data: Some(data), status: "success" }
    }

    pub fn empty(message: impl Into<String>) -> Self {
        Self { message: message.into(), data: None, status: "success" }
    }
}

/// Plain `{ "message": ... }` body, used for errors and simple acknowledgements.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct MessageBody {
    pub message: String,
}

impl MessageBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }
}
