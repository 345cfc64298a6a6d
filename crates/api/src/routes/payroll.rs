//! Route definitions for the payroll reconciliation endpoints.

use axum::routing::post;
use axum::Router;

use crate::handlers::payroll;
use crate::state::AppState;

/// Payroll routes mounted at `/payroll`.
///
/// ```text
/// POST /calculate                 -> calculate (204)
/// POST /hours                     -> hours_by_range
/// POST /pending_validation_hours  -> pending_validation_hours
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(payroll::calculate))
        .route("/hours", post(payroll::hours_by_range))
        .route(
            "/pending_validation_hours",
            post(payroll::pending_validation_hours),
        )
}
