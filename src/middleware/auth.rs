use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{AuthError, Permission, TokenVerifier};
use crate::error::ApiError;

/// State for one protected route: who verifies tokens and what the route requires
#[derive(Clone)]
pub struct PermissionGuard {
    pub verifier: Arc<TokenVerifier>,
    pub permission: Permission,
}

impl PermissionGuard {
    pub fn new(verifier: Arc<TokenVerifier>, permission: Permission) -> Self {
        Self { verifier, permission }
    }
}

/// Authorizes the request against the guard's permission and injects the verified
/// `Claims` into the request extensions for the handler.
pub async fn require_permission(
    State(guard): State<PermissionGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = match request.headers().get(AUTHORIZATION) {
        Some(value) => Some(value.to_str().map(str::to_string).map_err(|_| {
            AuthError::invalid_header("Authorization header must start with \"Bearer\".", 401)
        })?),
        None => None,
    };

    let claims = guard
        .verifier
        .authorize(header.as_deref(), guard.permission.as_str())
        .await
        .map_err(|err| {
            tracing::warn!(
                "Rejected {} {}: {} ({})",
                request.method(),
                request.uri().path(),
                err.code,
                err.status
            );
            err
        })?;

    tracing::debug!("Authorized {} for {}", claims.subject(), guard.permission);

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
