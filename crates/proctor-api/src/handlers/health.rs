//! Health check handlers.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use proctor_core::traits::CacheProvider;

use crate::dto::response::{DetailedHealthResponse, HealthResponse};
use crate::state::AppState;

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let database_ok = match state.db.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "Database health check failed");
            false
        }
    };
    let cache_ok = match state.cache.health_check().await {
        Ok(ok) => ok,
        Err(e) => {
            warn!(error = %e, "Cache health check failed");
            false
        }
    };

    let hub = state.hub();

    Json(DetailedHealthResponse {
        status: if database_ok && cache_ok { "ok" } else { "degraded" }.to_string(),
        database: connectivity(database_ok),
        cache: connectivity(cache_ok),
        cache_provider: state.cache.name().to_string(),
        active_sessions: hub.session_count(),
        ws_connections: hub.connection_count(),
        hub: hub.metrics(),
    })
}

fn connectivity(ok: bool) -> String {
    if ok { "connected" } else { "unavailable" }.to_string()
}
