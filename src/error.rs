// HTTP API Error Types
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::models::RecipeError;
use crate::database::StoreError;

/// HTTP API error rendered as `{success: false, error: <status>, message}`
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    BadRequest(String),

    // 404 Not Found
    NotFound(String),

    // 422 Unprocessable Entity
    UnprocessableEntity(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),

    // Token or permission failure, rendered with its own status and description
    Auth(AuthError),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::BadRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::UnprocessableEntity(_) => 422,
            ApiError::InternalServerError(_) => 500,
            ApiError::ServiceUnavailable(_) => 503,
            ApiError::Auth(err) => err.status,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::BadRequest(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::UnprocessableEntity(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
            ApiError::Auth(err) => &err.description,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut body = json!({
            "success": false,
            "error": self.status_code(),
            "message": self.message(),
        });

        if let ApiError::Auth(err) = self {
            body["code"] = json!(err.code);
        }

        body
    }
}

// Static constructor methods; without an argument each one carries the generic message
impl ApiError {
    pub fn bad_request() -> Self {
        ApiError::BadRequest("bad request".to_string())
    }

    pub fn bad_request_with(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    pub fn not_found() -> Self {
        ApiError::NotFound("Not found".to_string())
    }

    pub fn unprocessable() -> Self {
        ApiError::UnprocessableEntity("unprocessable".to_string())
    }

    pub fn internal_server_error() -> Self {
        ApiError::InternalServerError("internal server error".to_string())
    }

    pub fn service_unavailable() -> Self {
        ApiError::ServiceUnavailable("service unavailable".to_string())
    }

    /// Failure while writing: everything but a vanished row is unprocessable
    pub fn from_mutation(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => {
                tracing::warn!("Drink {} disappeared before it could be changed", id);
                ApiError::not_found()
            }
            other => {
                tracing::error!("Drink mutation failed: {}", other);
                ApiError::unprocessable()
            }
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Auth(err)
    }
}

impl From<RecipeError> for ApiError {
    fn from(err: RecipeError) -> Self {
        ApiError::bad_request_with(err.to_string())
    }
}

// Failures while reading; mutations go through `ApiError::from_mutation`
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => {
                tracing::error!("Drink store unavailable: {}", msg);
                ApiError::service_unavailable()
            }
            other => {
                // Log the real error but return generic message
                tracing::error!("Drink store error: {}", other);
                ApiError::internal_server_error()
            }
        }
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_json())).into_response()
    }
}
