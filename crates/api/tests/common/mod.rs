#![allow(dead_code)]

use std::path::PathBuf;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use screencamp_api::config::{CorsConfig, PredictionConfig, ServerConfig};
use screencamp_api::router::build_app_router;
use screencamp_api::state::AppState;
use screencamp_core::prediction::{ScorerCommand, ScorerPool};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:5173` as the only explicit CORS origin with the
/// private-network allowance on, and a 30-second request timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 5,
        db_retry_interval_secs: 1,
        request_timeout_secs: 30,
        cors: CorsConfig {
            origins: vec!["http://localhost:5173".to_string()],
            allow_private_network: true,
        },
        prediction: PredictionConfig {
            interpreter: "bash".to_string(),
            script: PathBuf::from("/nonexistent/predict.sh"),
            working_directory: None,
            max_concurrent: 2,
            timeout_secs: 5,
        },
    }
}

/// Build the full application router with all middleware layers, using the
/// given database pool and a scorer that points at a missing script.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let scorer = ScorerPool::new(
        config.prediction.command(),
        config.prediction.max_concurrent,
        Duration::from_secs(config.prediction.timeout_secs),
    );
    build_test_app_with_scorer(pool, scorer)
}

/// Same as [`build_test_app`] with a caller-supplied scorer.
pub fn build_test_app_with_scorer(pool: PgPool, scorer: ScorerPool) -> Router {
    let config = test_config();
    let state = AppState { pool, scorer };
    build_app_router(state, &config)
}

/// A pool that never connects, for tests that do not touch the database.
pub fn lazy_pool() -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(Duration::from_secs(1))
        .connect_lazy("postgres://localhost:1/unused")
        .expect("lazy pool")
}

/// Write `body` to an executable bash script and return a scorer command
/// that runs it. Keep the returned file alive for the test's duration.
pub fn bash_scorer(body: &str) -> (tempfile::NamedTempFile, ScorerCommand) {
    use std::io::Write;

    let mut file = tempfile::Builder::new()
        .suffix(".sh")
        .tempfile()
        .expect("temp script");
    writeln!(file, "#!/usr/bin/env bash").expect("write shebang");
    file.write_all(body.as_bytes()).expect("write script");
    file.flush().expect("flush script");

    let command = ScorerCommand {
        program: "bash".to_string(),
        args: vec![file.path().to_string_lossy().into_owned()],
        working_directory: None,
    };
    (file, command)
}

pub async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.expect("request")
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(
        app,
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .expect("request"),
    )
    .await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: impl Into<String>) -> Response {
    send(
        app,
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.into()))
            .expect("request"),
    )
    .await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("json body")
}

/// A complete camp body that passes validation.
pub fn camp_body(name: &str, district: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "date": "2025-05-14",
        "venue": "Government High School",
        "district": district,
        "startTime": "09:00",
        "endTime": "15:00",
        "type": "Oral",
        "cancerTypes": ["Oral", "Breast"],
    })
}

/// A complete booking body for `camp_id` that passes validation.
pub fn booking_body(camp_id: i64) -> serde_json::Value {
    serde_json::json!({
        "name": "Lakshmi Devi",
        "age": "52",
        "gender": "Female",
        "phone": "9845012345",
        "state": "Karnataka",
        "district": "Mysore",
        "campId": camp_id,
        "campName": "Oral Screening",
    })
}
