//! Application builder: wires router, middleware, and state into an Axum app.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;
use tracing::{error, info, warn};

use proctor_cache::provider::CacheManager;
use proctor_core::config::AppConfig;
use proctor_core::error::AppError;
use proctor_core::traits::SystemClock;
use proctor_database::DatabasePool;

use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Runs the Proctor server with the given configuration and database pool.
pub async fn run_server(config: AppConfig, db: DatabasePool) -> Result<(), AppError> {
    info!("Starting Proctor server...");

    info!(provider = %config.cache.provider, "Initializing cache");
    let cache = Arc::new(CacheManager::new(&config.cache).await?);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let grace = Duration::from_secs(config.server.shutdown_grace_seconds);

    let state = AppState::new(config, db.clone(), cache, Arc::new(SystemClock))?;
    let app = build_app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    info!(addr = %addr, "Proctor server listening");

    let (signal_tx, mut signal_rx) = watch::channel(false);
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = signal_tx.send(true);
    });

    // Open WebSockets keep the drain going; bound it by the grace period.
    let grace_timer = async move {
        if signal_rx.wait_for(|fired| *fired).await.is_ok() {
            tokio::time::sleep(grace).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server.into_future() => {
            result.map_err(|e| AppError::internal(format!("Server error: {}", e)))?;
        }
        _ = grace_timer => {
            warn!(grace_seconds = grace.as_secs(), "Shutdown grace period elapsed, closing remaining connections");
        }
    }

    db.close().await;
    info!("Proctor server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
