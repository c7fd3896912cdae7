//! Vehicle Registry - HTTP server entry point

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vehicle_registry::api::create_router;
use vehicle_registry::metrics::metrics_router;
use vehicle_registry::repository::database;
use vehicle_registry::{AppState, Config, HttpMetrics};

/// Main entry point for the vehicle registry server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Open the SQLite pool and run migrations
/// 4. Wire repository, cache and service into the router state
/// 5. Start the Prometheus metrics listener
/// 6. Start HTTP server on configured port
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vehicle_registry=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Vehicle Registry");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, metrics_port={}, database={}, cache_ttl={}s, cache_max_entries={}, request_timeout={}s",
        config.server_port,
        config.metrics_port,
        config.database_url,
        config.cache_ttl_secs,
        config.cache_max_entries,
        config.request_timeout_secs
    );

    let pool = database::connect(&config.database_url, config.db_max_connections)
        .await
        .with_context(|| format!("failed to open database {}", config.database_url))?;

    let state = AppState::from_config(&config, pool.clone());
    if config.cache_enabled() {
        info!("Vehicle cache enabled");
    } else {
        warn!("CACHE_TTL_SECONDS is 0, serving straight from the database");
    }

    let metrics = HttpMetrics::new().context("failed to register metrics")?;
    let metrics_addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let metrics_listener = tokio::net::TcpListener::bind(metrics_addr)
        .await
        .with_context(|| format!("failed to bind metrics listener {}", metrics_addr))?;
    let metrics_app = metrics_router(metrics.clone());
    let metrics_handle = tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, metrics_app).await {
            warn!("Metrics listener stopped: {}", err);
        }
    });
    info!("Metrics available on http://{}/metrics", metrics_addr);

    let app = create_router(state, metrics);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    metrics_handle.abort();
    pool.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
