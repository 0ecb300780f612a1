use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use coffee_shop_api::{bootstrap, config};

/// Coffee shop drinks menu API server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Address to bind (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides COFFEE_API_PORT / PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Keep drinks in memory instead of Postgres
    #[arg(long)]
    memory: bool,

    /// Drop and recreate the drink table on start
    #[arg(long)]
    reset_db: bool,
}

impl Args {
    fn apply(&self, config: &mut config::AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if self.memory {
            config.database.backend = config::StoreBackend::Memory;
        }
        if self.reset_db {
            config.database.reset_on_start = true;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, AUTH0_DOMAIN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coffee_shop_api=info,tower_http=info")),
        )
        .init();

    let args = Args::parse();
    let mut config = config::config().clone();
    args.apply(&mut config);
    tracing::info!("Starting Coffee Shop API in {:?} mode", config.environment);

    let context = bootstrap(&config).await.context("failed to bootstrap service")?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Coffee Shop API listening on http://{}", bind_addr);

    axum::serve(listener, context.router())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    context.shutdown().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
