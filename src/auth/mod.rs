use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod error;
pub mod jwks;
pub mod verifier;

pub use error::AuthError;
pub use jwks::{Jwk, JwkSet, KeyCache, KeySource, KeySourceError, RemoteKeySource, StaticKeySource};
pub use verifier::{bearer_token, check_permissions, TokenVerifier};

/// Role permissions understood by the drinks API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    GetDrinksDetail,
    PostDrinks,
    PatchDrinks,
    DeleteDrinks,
}

impl Permission {
    pub const fn as_str(self) -> &'static str {
        match self {
            Permission::GetDrinksDetail => "get:drinks-detail",
            Permission::PostDrinks => "post:drinks",
            Permission::PatchDrinks => "patch:drinks",
            Permission::DeleteDrinks => "delete:drinks",
        }
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verified token payload.
///
/// Every field is optional at the decoding stage; presence of the registered
/// claims is enforced by token validation and `permissions` is checked by
/// [`check_permissions`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub iss: Option<String>,
    /// Either a single audience string or a list of them
    #[serde(default)]
    pub aud: Option<Value>,
    #[serde(default)]
    pub exp: Option<i64>,
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default)]
    pub permissions: Option<PermissionsClaim>,
}

/// The `permissions` claim as it appeared in the token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PermissionsClaim {
    Granted(Vec<String>),
    /// Present, but not a list of strings
    Malformed(Value),
}

impl Claims {
    pub fn has_permission(&self, permission: &str) -> bool {
        match &self.permissions {
            Some(PermissionsClaim::Granted(granted)) => granted.iter().any(|p| p == permission),
            _ => false,
        }
    }

    /// Subject for log lines
    pub fn subject(&self) -> &str {
        self.sub.as_deref().unwrap_or("unknown")
    }
}
