use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use tracing::{error, warn};

use super::jwks::{KeyCache, KeySource, KeySourceError, RemoteKeySource, StaticKeySource};
use super::{AuthError, Claims, PermissionsClaim};
use crate::config::AuthConfig;

/// Validates bearer tokens issued by the configured identity provider
pub struct TokenVerifier {
    keys: KeyCache,
    audience: String,
    issuer: String,
}

impl TokenVerifier {
    pub fn new(keys: KeyCache, audience: impl Into<String>, issuer: impl Into<String>) -> Self {
        Self {
            keys,
            audience: audience.into(),
            issuer: issuer.into(),
        }
    }

    /// Uses a static key file when `AUTH_JWKS_PATH` is set, the remote discovery endpoint otherwise
    pub fn from_config(config: &AuthConfig) -> Result<Self, KeySourceError> {
        let source: Arc<dyn KeySource> = match config.jwks_path.as_deref() {
            Some(path) => Arc::new(StaticKeySource::from_file(path)?),
            None => Arc::new(RemoteKeySource::new(&config.jwks_url())?),
        };
        let keys = KeyCache::new(source, Duration::from_secs(config.jwks_min_refresh_secs));
        Ok(Self::new(keys, config.audience.clone(), config.issuer()))
    }

    /// Full check for one request: header shape, token validity and the required permission
    pub async fn authorize(&self, header: Option<&str>, required: &str) -> Result<Claims, AuthError> {
        let token = bearer_token(header)?;
        let claims = self.verify(token).await?;
        check_permissions(&claims, required)?;
        Ok(claims)
    }

    /// Verifies signature, expiry, audience and issuer of a raw token
    pub async fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let header = decode_header(token)
            .map_err(|_| AuthError::invalid_header("Authorization malformed.", 401))?;
        let kid = header
            .kid
            .ok_or_else(|| AuthError::invalid_header("Authorization malformed.", 401))?;

        let jwk = self.keys.key_for(&kid).await.map_err(|e| {
            error!("Signing key lookup failed: {}", e);
            AuthError::keys_unavailable()
        })?;
        let key = jwk
            .as_ref()
            .and_then(|k| k.decoding_key())
            .ok_or_else(|| AuthError::invalid_header("Unable to find the appropriate key.", 400))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.leeway = 0;
        validation.set_audience(&[self.audience.as_str()]);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "aud", "iss"]);

        decode::<Claims>(token, &key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AuthError::token_expired(),
                ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => incorrect_claims(),
                ErrorKind::MissingRequiredClaim(claim) if claim == "aud" || claim == "iss" => {
                    incorrect_claims()
                }
                _ => AuthError::invalid_header("Unable to parse authentication token.", 400),
            })
    }
}

fn incorrect_claims() -> AuthError {
    AuthError::invalid_claims("Incorrect claims. Please, check the audience and issuer.", 401)
}

/// Extracts the token from an `Authorization: Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or_else(AuthError::no_header)?;
    let parts: Vec<&str> = header.split_whitespace().collect();

    match parts.as_slice() {
        [scheme, ..] if *scheme != "Bearer" => Err(AuthError::invalid_header(
            "Authorization header must start with \"Bearer\".",
            401,
        )),
        [] => Err(AuthError::invalid_header(
            "Authorization header must start with \"Bearer\".",
            401,
        )),
        [_] => Err(AuthError::invalid_header("Token not found.", 401)),
        [_, token] => Ok(*token),
        _ => Err(AuthError::invalid_header(
            "Authorization header must be bearer token.",
            401,
        )),
    }
}

pub fn check_permissions(claims: &Claims, required: &str) -> Result<(), AuthError> {
    match &claims.permissions {
        None => return Err(AuthError::invalid_claims("Permissions not included in JWT.", 400)),
        Some(PermissionsClaim::Malformed(value)) => {
            warn!("Subject {} sent a malformed permissions claim: {}", claims.subject(), value);
            return Err(AuthError::invalid_claims("Permissions must be a list.", 400));
        }
        Some(PermissionsClaim::Granted(_)) => {}
    }
    if !claims.has_permission(required) {
        warn!("Subject {} lacks permission {}", claims.subject(), required);
        return Err(AuthError::unauthorized());
    }
    Ok(())
}
