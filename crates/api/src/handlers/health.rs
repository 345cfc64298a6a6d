//! Health check handler.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
}

/// GET /health
///
/// Liveness plus a database round-trip; `db_healthy: false` rather than an
/// error status when the pool cannot answer.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = sigrh_db::health_check(&state.pool).await.is_ok();
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
    })
}
