//! Health check route, mounted at the root (not under `/payroll`).

use axum::routing::get;
use axum::Router;

use crate::handlers::health;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}
