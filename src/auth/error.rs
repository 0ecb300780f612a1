use thiserror::Error;

/// Authorization failure carrying its own status code and client-facing description
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub code: &'static str,
    pub description: String,
    pub status: u16,
}

impl AuthError {
    pub fn new(code: &'static str, description: impl Into<String>, status: u16) -> Self {
        Self {
            code,
            description: description.into(),
            status,
        }
    }

    pub fn no_header() -> Self {
        Self::new("no_header", "Authorization header is expected.", 401)
    }

    pub fn invalid_header(description: impl Into<String>, status: u16) -> Self {
        Self::new("invalid_header", description, status)
    }

    pub fn token_expired() -> Self {
        Self::new("token_expired", "Token expired.", 401)
    }

    pub fn invalid_claims(description: impl Into<String>, status: u16) -> Self {
        Self::new("invalid_claims", description, status)
    }

    pub fn unauthorized() -> Self {
        Self::new("unauthorized", "Permission not found.", 403)
    }

    pub fn keys_unavailable() -> Self {
        Self::new("jwks_unavailable", "Unable to fetch signing keys.", 503)
    }
}
