use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, PgPool};
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from DatabaseManager
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

const CREATE_DRINK_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS drink (
        id SERIAL PRIMARY KEY,
        title VARCHAR(80) NOT NULL UNIQUE,
        recipe VARCHAR(180) NOT NULL
    )
"#;

const DROP_DRINK_TABLE: &str = "DROP TABLE IF EXISTS drink";

/// Owns the connection pool for the drink database
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Connects using `DATABASE_URL` settings and makes sure the drink table exists
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let raw = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
            .connect(url.as_str())
            .await?;

        info!(
            "Connected to database {} on {}",
            url.path().trim_start_matches('/'),
            url.host_str().unwrap_or("localhost")
        );

        let manager = Self { pool };
        manager.ensure_schema().await?;
        Ok(manager)
    }

    pub fn pool(&self) -> PgPool {
        self.pool.clone()
    }

    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(CREATE_DRINK_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Drops all drinks and starts from a single seeded one
    pub async fn reset(&self) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;
        sqlx::query(DROP_DRINK_TABLE).execute(&mut *tx).await?;
        sqlx::query(CREATE_DRINK_TABLE).execute(&mut *tx).await?;
        sqlx::query("INSERT INTO drink (title, recipe) VALUES ($1, $2)")
            .bind("water")
            .bind(r#"[{"name": "water", "color": "blue", "parts": 1}]"#)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        info!("Drink table reset and seeded");
        Ok(())
    }

    /// Close the pool (e.g., on shutdown)
    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreBackend;

    #[tokio::test]
    async fn connect_requires_a_database_url() {
        let config = DatabaseConfig {
            backend: StoreBackend::Postgres,
            url: None,
            max_connections: 1,
            connection_timeout: 1,
            reset_on_start: false,
        };

        let err = DatabaseManager::connect(&config).await.err().unwrap();
        assert!(matches!(err, DatabaseError::ConfigMissing("DATABASE_URL")));
    }

    #[tokio::test]
    async fn connect_rejects_unparsable_urls() {
        let config = DatabaseConfig {
            backend: StoreBackend::Postgres,
            url: Some("not a url".to_string()),
            max_connections: 1,
            connection_timeout: 1,
            reset_on_start: false,
        };

        let err = DatabaseManager::connect(&config).await.err().unwrap();
        assert!(matches!(err, DatabaseError::InvalidDatabaseUrl));
    }
}
