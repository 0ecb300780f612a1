use async_trait::async_trait;
use thiserror::Error;

use super::models::{Drink, NewDrink};

/// Failures surfaced by a `DrinkStore`
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Drink {0} no longer exists")]
    NotFound(i32),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Stored recipe for drink {id} is not valid JSON: {source}")]
    Corrupt {
        id: i32,
        #[source]
        source: serde_json::Error,
    },
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::UniqueViolation(db.message().to_string())
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                StoreError::Unavailable(err.to_string())
            }
            _ => StoreError::Query(err.to_string()),
        }
    }
}

/// Persistence contract the drink handlers are written against
#[async_trait]
pub trait DrinkStore: Send + Sync {
    /// Every drink, ordered by id
    async fn all(&self) -> Result<Vec<Drink>, StoreError>;

    async fn find(&self, id: i32) -> Result<Option<Drink>, StoreError>;

    async fn find_by_title(&self, title: &str) -> Result<Option<Drink>, StoreError>;

    /// Inserts a drink and returns it with its assigned id
    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError>;

    /// Overwrites title and recipe of an existing drink
    async fn update(&self, drink: &Drink) -> Result<(), StoreError>;

    async fn delete(&self, drink: &Drink) -> Result<(), StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;
}
