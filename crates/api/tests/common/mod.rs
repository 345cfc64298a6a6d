#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use chrono::{NaiveDate, NaiveDateTime};
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use sigrh_api::config::ServerConfig;
use sigrh_api::router::build_app_router;
use sigrh_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool. Mirrors `main.rs` so tests exercise the production
/// middleware stack.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

/// Send a GET request to the app and return the raw response.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Send a POST request with a JSON body and return the raw response.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixture helpers
// ---------------------------------------------------------------------------

/// Insert a shift and return its id.
pub async fn seed_shift(pool: &PgPool, shift_type: &str) -> i64 {
    sqlx::query_scalar(
        "INSERT INTO shift (description, type, working_hours, working_days) \
         VALUES ($1, $2, 8, 5) RETURNING id",
    )
    .bind(format!("Turno {shift_type}"))
    .bind(shift_type)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert an employee (optionally shiftless) and return their id.
pub async fn seed_employee(pool: &PgPool, shift_id: Option<i64>) -> i64 {
    let unique: i64 = sqlx::query_scalar("SELECT nextval(pg_get_serial_sequence('employee', 'id'))")
        .fetch_one(pool)
        .await
        .unwrap();
    sqlx::query_scalar(
        "INSERT INTO employee (id, first_name, last_name, email, shift_id) \
         VALUES ($1, 'Ana', 'Pérez', $2, $3) RETURNING id",
    )
    .bind(unique)
    .bind(format!("ana.perez{unique}@example.com"))
    .bind(shift_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// Insert one clock event.
pub async fn seed_punch(pool: &PgPool, employee_id: i64, at: NaiveDateTime, direction: &str) {
    sqlx::query(
        "INSERT INTO clock_events (employee_id, event_date, event_type, source, device_id) \
         VALUES ($1, $2, $3, 'biometric', 'dev-1')",
    )
    .bind(employee_id)
    .bind(at)
    .bind(direction)
    .execute(pool)
    .await
    .unwrap();
}

/// Shorthand for building an event timestamp.
pub fn at(date: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    date.and_hms_opt(h, m, 0).unwrap()
}

/// Monday 2025-06-02, a plain business day used throughout the tests.
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}
