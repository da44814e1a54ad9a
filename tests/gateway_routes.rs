//! Gateway Route Tests
//!
//! What each route hands to the database, and how failures come back.

mod common;

use std::sync::Arc;

use axum::http::{header, StatusCode};
use serde_json::{json, Value};

use common::{
    body_bytes, body_json, post, router, router_with_config, send, Call, RecordingDatabase,
    API_KEY,
};
use sqlgate::database::Statement;
use sqlgate::http_server::GatewayConfig;

// =============================================================================
// /api/all
// =============================================================================

#[tokio::test]
async fn test_all_binds_coerced_params() {
    let db = Arc::new(RecordingDatabase::new());
    let response = send(
        router(db.clone()),
        post(
            "/api/all",
            r#"{"query": "INSERT INTO t VALUES (?, ?, ?, ?)", "params": [1, "x", true, null]}"#,
        ),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        db.calls(),
        vec![Call::Run(
            Statement::prepare("INSERT INTO t VALUES (?, ?, ?, ?)")
                .bind(vec![json!(1), json!("x"), json!(1), Value::Null])
        )]
    );
}

#[tokio::test]
async fn test_all_coerces_objects_to_text() {
    let db = Arc::new(RecordingDatabase::new());
    send(
        router(db.clone()),
        post("/api/all", r#"{"query": "SELECT ?", "params": [{"a": 1}, false]}"#),
    )
    .await;

    match &db.calls()[0] {
        Call::Run(stmt) => assert_eq!(stmt.params(), &[json!(r#"{"a":1}"#), json!(0)]),
        other => panic!("unexpected call {:?}", other),
    }
}

#[tokio::test]
async fn test_all_without_params_does_not_bind() {
    let db = Arc::new(RecordingDatabase::new());
    send(router(db.clone()), post("/api/all", r#"{"query": "SELECT 1"}"#)).await;

    assert_eq!(db.calls(), vec![Call::Run(Statement::prepare("SELECT 1"))]);
}

#[tokio::test]
async fn test_all_returns_result_verbatim() {
    let db = Arc::new(RecordingDatabase::new());
    let response = send(router(db), post("/api/all", r#"{"query": "SELECT 1"}"#)).await;

    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let body = body_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["results"], json!([]));
}

// =============================================================================
// /api/exec
// =============================================================================

#[tokio::test]
async fn test_exec_passes_sql_unmodified() {
    let db = Arc::new(RecordingDatabase::new());
    let sql = "CREATE TABLE a (x);\nINSERT INTO a VALUES (1);";
    let body = json!({ "query": sql }).to_string();
    let response = send(router(db.clone()), post("/api/exec", &body)).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["count"], json!(1));
    assert_eq!(db.calls(), vec![Call::Exec(sql.to_string())]);
}

// =============================================================================
// /api/batch
// =============================================================================

#[tokio::test]
async fn test_batch_preserves_order() {
    let db = Arc::new(RecordingDatabase::new());
    let response = send(
        router(db.clone()),
        post("/api/batch", r#"{"batch": [{"query": "A"}, {"query": "B"}]}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        db.calls(),
        vec![Call::Batch(vec![
            Statement::prepare("A"),
            Statement::prepare("B"),
        ])]
    );
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_batch_binds_params_raw() {
    let db = Arc::new(RecordingDatabase::new());
    send(
        router(db.clone()),
        post(
            "/api/batch",
            r#"{"batch": [{"query": "SELECT ?, ?", "params": [true, {"a": 1}]}]}"#,
        ),
    )
    .await;

    assert_eq!(
        db.calls(),
        vec![Call::Batch(vec![
            Statement::prepare("SELECT ?, ?").bind(vec![json!(true), json!({"a": 1})])
        ])]
    );
}

// =============================================================================
// Error envelope
// =============================================================================

#[tokio::test]
async fn test_database_failure_is_500_on_every_route() {
    let cases = [
        ("/api/all", r#"{"query": "SELECT 1"}"#),
        ("/api/exec", r#"{"query": "SELECT 1"}"#),
        ("/api/batch", r#"{"batch": [{"query": "SELECT 1"}]}"#),
    ];

    for (uri, body) in cases {
        let db = Arc::new(RecordingDatabase::failing("disk on fire"));
        let response = send(router(db), post(uri, body)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        let body = body_json(response).await;
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Failed to run query:"), "{uri}: {error}");
        assert!(error.contains("disk on fire"), "{uri}: {error}");
    }
}

#[tokio::test]
async fn test_malformed_body_is_500_without_db_call() {
    let cases = [
        ("/api/all", "not json"),
        ("/api/all", r#"{"params": [1]}"#),
        ("/api/exec", r#"{"query": 5}"#),
        ("/api/batch", r#"{"batch": "SELECT 1"}"#),
    ];

    for (uri, body) in cases {
        let db = Arc::new(RecordingDatabase::new());
        let response = send(router(db.clone()), post(uri, body)).await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri} {body}");
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Failed to run query: invalid request body"));
        assert!(db.calls().is_empty());
    }
}

#[tokio::test]
async fn test_oversized_body_is_500_without_db_call() {
    let mut config = GatewayConfig::new(API_KEY);
    config.max_body_bytes = 16;

    for uri in ["/api/all", "/api/exec", "/api/batch"] {
        let db = Arc::new(RecordingDatabase::new());
        let response = send(
            router_with_config(config.clone(), db.clone()),
            post(uri, r#"{"query": "SELECT 'well past sixteen bytes'"}"#),
        )
        .await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        let body = body_json(response).await;
        let error = body["error"].as_str().unwrap();
        assert!(error.starts_with("Failed to run query:"), "{uri}: {error}");
        assert!(db.calls().is_empty(), "{uri} reached the database");
    }
}

#[tokio::test]
async fn test_body_within_limit_is_accepted() {
    let mut config = GatewayConfig::new(API_KEY);
    config.max_body_bytes = 64;

    let db = Arc::new(RecordingDatabase::new());
    let response = send(
        router_with_config(config, db.clone()),
        post("/api/all", r#"{"query": "SELECT 1"}"#),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(db.calls().len(), 1);
}

// =============================================================================
// Pretty JSON
// =============================================================================

#[tokio::test]
async fn test_pretty_query_param_indents_output() {
    let db = Arc::new(RecordingDatabase::new());
    let response = send(
        router(db.clone()),
        post("/api/exec?pretty", r#"{"query": "SELECT 1"}"#),
    )
    .await;

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(text.contains("\n  \"count\": 1"), "{text}");
}

#[tokio::test]
async fn test_compact_output_by_default() {
    let db = Arc::new(RecordingDatabase::new());
    let response = send(router(db), post("/api/exec", r#"{"query": "SELECT 1"}"#)).await;

    let text = String::from_utf8(body_bytes(response).await).unwrap();
    assert!(!text.contains('\n'));
}
