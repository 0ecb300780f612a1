use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware::from_fn_with_state,
    routing::{get, patch, post},
    Router,
};
use thiserror::Error;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use crate::auth::{KeySourceError, Permission, TokenVerifier};
use crate::config::{AppConfig, StoreBackend};
use crate::database::{DatabaseError, DatabaseManager, DrinkStore, MemoryDrinkStore, PgDrinkStore};
use crate::handlers::{protected, public};
use crate::middleware::{require_permission, PermissionGuard};

/// Shared, read-only request context
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DrinkStore>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn DrinkStore>, verifier: Arc<TokenVerifier>) -> Self {
        Self { store, verifier }
    }
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("database setup failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("signing key setup failed: {0}")]
    Keys(#[from] KeySourceError),
}

/// Everything a running service owns; dropped through `shutdown`
pub struct ServiceContext {
    pub state: AppState,
    cors_origins: Vec<String>,
    database: Option<DatabaseManager>,
}

impl ServiceContext {
    pub fn router(&self) -> Router {
        app(self.state.clone(), &self.cors_origins)
    }

    pub async fn shutdown(self) {
        if let Some(database) = self.database {
            database.close().await;
        }
        info!("Service context shut down");
    }
}

/// Builds the store and token verifier described by `config`
pub async fn bootstrap(config: &AppConfig) -> Result<ServiceContext, BootstrapError> {
    let verifier = Arc::new(TokenVerifier::from_config(&config.auth)?);

    let (store, database): (Arc<dyn DrinkStore>, Option<DatabaseManager>) = match config.database.backend {
        StoreBackend::Memory => {
            info!("Using in-memory drink store");
            (Arc::new(MemoryDrinkStore::new()), None)
        }
        StoreBackend::Postgres => {
            let database = DatabaseManager::connect(&config.database).await?;
            if config.database.reset_on_start {
                database.reset().await?;
            }
            (Arc::new(PgDrinkStore::new(database.pool())), Some(database))
        }
    };

    info!(
        "Verifying tokens for audience '{}' issued by {}",
        config.auth.audience,
        config.auth.issuer()
    );

    Ok(ServiceContext {
        state: AppState::new(store, verifier),
        cors_origins: config.server.cors_origins.clone(),
        database,
    })
}

/// Full HTTP surface with global middleware
pub fn app(state: AppState, cors_origins: &[String]) -> Router {
    let verifier = state.verifier.clone();

    Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/drinks", get(public::drinks_list))
        // Protected, one permission per route
        .merge(guarded(
            Router::new().route("/drinks-detail", get(protected::drinks_detail)),
            &verifier,
            Permission::GetDrinksDetail,
        ))
        .merge(guarded(
            Router::new().route("/drinks", post(protected::drink_create)),
            &verifier,
            Permission::PostDrinks,
        ))
        .merge(guarded(
            Router::new().route("/drinks/:id", patch(protected::drink_update)),
            &verifier,
            Permission::PatchDrinks,
        ))
        .merge(guarded(
            Router::new().route("/drinks/:id", axum::routing::delete(protected::drink_delete)),
            &verifier,
            Permission::DeleteDrinks,
        ))
        .fallback(public::not_found)
        .with_state(state)
        // Global middleware
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}

fn guarded(
    router: Router<AppState>,
    verifier: &Arc<TokenVerifier>,
    permission: Permission,
) -> Router<AppState> {
    router.route_layer(from_fn_with_state(
        PermissionGuard::new(verifier.clone(), permission),
        require_permission,
    ))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect();

    CorsLayer::permissive().allow_origin(AllowOrigin::list(origins))
}
