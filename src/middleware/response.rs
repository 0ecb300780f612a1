use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use serde_json::{json, Value};

/// Wrapper for API responses that adds `success: true` to the serialized body.
///
/// The payload must serialize to a JSON object; its fields sit next to
/// `success` in the envelope, e.g. `{"success": true, "drinks": [...]}`.
#[derive(Debug)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Create a successful 200 API response
    pub fn success(data: T) -> Self {
        Self { data }
    }

    fn envelope(&self) -> Result<Value, serde_json::Error> {
        let mut envelope = match serde_json::to_value(&self.data)? {
            Value::Object(map) => Value::Object(map),
            other => json!({ "data": other }),
        };
        envelope["success"] = Value::Bool(true);
        Ok(envelope)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        match self.envelope() {
            Ok(envelope) => (StatusCode::OK, Json(envelope)).into_response(),
            Err(e) => {
                tracing::error!("Failed to serialize response data: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "success": false,
                        "error": 500,
                        "message": "internal server error"
                    })),
                )
                    .into_response()
            }
        }
    }
}

// Convenience type aliases
pub type ApiResult<T> = Result<ApiResponse<T>, crate::error::ApiError>;
