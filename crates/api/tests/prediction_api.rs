//! HTTP-level integration tests for `POST /predict`.
//!
//! The scorer is a throwaway bash script, so no database or Python install
//! is needed.

mod common;

use std::time::Duration;

use axum::http::StatusCode;
use common::{bash_scorer, body_json, lazy_pool, post_json, post_raw};
use screencamp_core::prediction::ScorerPool;
use serde_json::json;

fn app_with(script: &str, max_concurrent: usize, timeout: Duration) -> (tempfile::NamedTempFile, ScorerPool, axum::Router) {
    let (file, command) = bash_scorer(script);
    let scorer = ScorerPool::new(command, max_concurrent, timeout);
    let app = common::build_test_app_with_scorer(lazy_pool(), scorer.clone());
    (file, scorer, app)
}

#[tokio::test]
async fn scorer_output_is_returned_verbatim() {
    let (_script, _scorer, app) = app_with(
        "cat > /dev/null\necho '[{\"predicted_cancer\":\"Oral\",\"confidence\":0.82}]'\n",
        2,
        Duration::from_secs(5),
    );
    let response = post_json(app, "/predict", json!([{ "age": 58, "tobacco": 1 }])).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!([{ "predicted_cancer": "Oral", "confidence": 0.82 }])
    );
}

#[tokio::test]
async fn payload_reaches_scorer_stdin() {
    let (_script, _scorer, app) = app_with("cat\n", 2, Duration::from_secs(5));
    let payload = json!({ "rows": [{ "age": 44 }, { "age": 71 }] });
    let response = post_json(app, "/predict", payload.clone()).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, payload);
}

#[tokio::test]
async fn empty_body_and_empty_output_give_empty_array() {
    let (_script, _scorer, app) = app_with("cat > /dev/null\n", 2, Duration::from_secs(5));
    let response = post_raw(app, "/predict", "").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn non_json_body_is_rejected_before_spawning() {
    let (_script, scorer, app) = app_with("echo '[]'\n", 2, Duration::from_secs(5));
    let response = post_raw(app, "/predict", "age=58").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(scorer.in_flight(), 0);
}

#[tokio::test]
async fn non_zero_exit_returns_500_with_stderr() {
    let (_script, _scorer, app) = app_with(
        "echo 'FileNotFoundError: model.pkl' >&2\nexit 1\n",
        2,
        Duration::from_secs(5),
    );
    let response = post_json(app, "/predict", json!([])).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "PREDICTION_FAILED");
    assert_eq!(body["exitCode"], 1);
    assert!(body["stderr"].as_str().unwrap().contains("model.pkl"));
}

#[tokio::test]
async fn invalid_output_returns_500_with_stdout() {
    let (_script, _scorer, app) = app_with(
        "cat > /dev/null\necho 'loading model...'\n",
        2,
        Duration::from_secs(5),
    );
    let response = post_json(app, "/predict", json!([])).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "PREDICTION_INVALID_OUTPUT");
    assert!(body["stdout"].as_str().unwrap().contains("loading model"));
}

#[tokio::test]
async fn missing_interpreter_returns_start_failure() {
    let scorer = ScorerPool::new(
        screencamp_core::prediction::ScorerCommand {
            program: "/nonexistent/python3".to_string(),
            args: vec!["predict.py".to_string()],
            working_directory: None,
        },
        1,
        Duration::from_secs(5),
    );
    let app = common::build_test_app_with_scorer(lazy_pool(), scorer);
    let response = post_json(app, "/predict", json!([])).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["code"], "PREDICTION_START_FAILED");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn slow_scorer_returns_504() {
    let (_script, scorer, app) = app_with("sleep 30\n", 1, Duration::from_millis(300));
    let response = post_json(app, "/predict", json!([])).await;

    assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body_json(response).await["code"], "PREDICTION_TIMEOUT");
    assert_eq!(scorer.in_flight(), 0);
}

#[tokio::test]
async fn saturated_scorer_returns_503() {
    let (_script, scorer, app) = app_with("sleep 1\necho '[]'\n", 1, Duration::from_secs(5));

    let first = tokio::spawn(post_json(app.clone(), "/predict", json!([])));
    for _ in 0..100 {
        if scorer.in_flight() == 1 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    let second = post_json(app, "/predict", json!([])).await;
    assert_eq!(second.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body_json(second).await["code"], "SCORER_BUSY");

    let first = first.await.expect("join");
    assert_eq!(first.status(), StatusCode::OK);
}
