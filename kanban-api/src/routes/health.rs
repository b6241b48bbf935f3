/// Health check endpoint
///
/// Reports whether the server is up and its backends answer.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "store": "connected",
///   "sessions": "connected"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `healthy`, or `degraded` when a backend is unreachable
    pub status: String,

    /// Application version
    pub version: String,

    /// Store status
    pub store: String,

    /// Session backend status
    pub sessions: String,
}

fn connectivity(ok: bool) -> &'static str {
    if ok {
        "connected"
    } else {
        "disconnected"
    }
}

/// Health check handler
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let store_ok = match state.store.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Store health check failed");
            false
        }
    };

    let sessions_ok = match state.sessions.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Session backend health check failed");
            false
        }
    };

    Ok(Json(HealthResponse {
        status: if store_ok && sessions_ok {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: connectivity(store_ok).to_string(),
        sessions: connectivity(sessions_ok).to_string(),
    }))
}
