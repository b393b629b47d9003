//! Shared building blocks used by every Networkpro crate: response envelopes,
//! logging initialisation and runtime directory checks.

pub mod types;
pub mod utils;
pub mod env;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }

    #[test]
    fn api_response_serializes_envelope() {
        let body = types::ApiResponse::success("Connections fetched", vec![1, 2]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["message"], "Connections fetched");
        assert_eq!(json["status"], "success");
        assert_eq!(json["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn api_response_without_data_serializes_null() {
        let body = types::ApiResponse::<()>::empty("Connection removed");
        let json = serde_json::to_value(&body).unwrap();
        assert!(json["data"].is_null());
    }
}
