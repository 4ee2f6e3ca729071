use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use shortr::config::Config;
use shortr::registry::LinkRegistry;
use shortr::stats::StatsAggregator;
use shortr::storage::{MemoryStorage, Storage};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shortr=info,tower_http=info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!("Loaded configuration");

    // Initialize registry
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let stats = Arc::new(StatsAggregator::new());
    let registry = Arc::new(LinkRegistry::new(
        storage,
        stats,
        config.short_code.generator(),
    ));
    info!(
        strategy = ?config.short_code.strategy,
        length = config.short_code.length,
        max_attempts = config.short_code.max_attempts,
        "Initialized in-memory link registry"
    );

    match config.public_base_url.as_ref() {
        Some(base) => info!("🔗 Short URLs use base {}", base),
        None => info!("🔗 Short URLs use the request Host header"),
    }

    let app = shortr::create_app(registry, config.public_base_url.clone());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("🚀 Server listening on http://{}", addr);
    info!("   - API endpoints available at http://{}/api/...", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            warn!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
