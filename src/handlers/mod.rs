// handlers/mod.rs - Two-tier handler layout
//
// Public (no auth) → Protected (bearer token with a route-specific permission).
// Permission checks live in `middleware::auth`; protected handlers receive the
// verified `Claims` through a request extension.
pub mod protected;
pub mod public;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body shape for every drink listing and single-drink mutation response
#[derive(Debug, Serialize)]
pub struct DrinksBody<T: Serialize> {
    pub drinks: Vec<T>,
}

/// Request body for create and update; both fields are optional at the parsing stage
#[derive(Debug, Default, Deserialize)]
pub struct DrinkPayload {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub recipe: Option<Value>,
}

impl DrinkPayload {
    /// Title if one was supplied and is non-empty
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}
