// SPDX-FileCopyrightText: 2026 Showroom Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end router tests driven through `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use showroom_gateway::{AuthConfig, GatewayState, build_router};
use showroom_test_utils::TestHarness;
use tower::ServiceExt;

const ANALYZE: &str = "/functions/v1/ai-visit-analysis";

fn router(harness: &TestHarness, token: Option<&str>) -> Router {
    let state = GatewayState::new(
        harness.service.clone(),
        AuthConfig {
            bearer_token: token.map(str::to_string),
        },
        "showroom-test".to_string(),
    );
    build_router(state)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&bytes).into_owned(),
        ))
    };
    (status, body)
}

#[tokio::test]
async fn analysis_success_envelope() {
    let harness = TestHarness::new();
    let (status, body) = send(
        router(&harness, None),
        post_json(ANALYZE, json!({ "visit_id": "v-1" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["cached"], false);
    assert_eq!(body["method"], "openai");
    assert_eq!(body["message"], "AI analysis completed successfully");
    assert_eq!(body["data"]["priority_ranking"], 8);
}

#[tokio::test]
async fn alias_path_serves_the_same_operation() {
    let harness = TestHarness::new();
    let (status, body) = send(
        router(&harness, None),
        post_json("/v1/visits/analyze", json!({ "visit_id": "v-alias" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn second_request_is_served_from_cache() {
    let harness = TestHarness::new();
    let app = router(&harness, None);

    send(app.clone(), post_json(ANALYZE, json!({ "visit_id": "v-2" }))).await;
    let (status, body) = send(app, post_json(ANALYZE, json!({ "visit_id": "v-2" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cached"], true);
    assert!(body.get("method").is_none());
    assert_eq!(body["message"], "Analysis retrieved from cache");
    assert_eq!(harness.provider.call_count(), 1);
}

#[tokio::test]
async fn fallback_envelope_when_model_fails() {
    let harness = TestHarness::builder().with_failing_model().build();
    let (status, body) = send(
        router(&harness, None),
        post_json(ANALYZE, json!({ "visit_id": "v-3" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["method"], "fallback");
    assert_eq!(body["message"], "Analysis completed using fallback scoring");
    assert_eq!(body["data"]["confidence_score"], 0.6);
}

#[tokio::test]
async fn missing_visit_id_is_bad_request() {
    let harness = TestHarness::new();
    let (status, body) = send(
        router(&harness, None),
        post_json(ANALYZE, json!({ "customer_data": { "name": "Omar" } })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "visit_id is required");
    assert_eq!(harness.provider.call_count(), 0);
    assert!(harness.log.entries().await.is_empty());
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let harness = TestHarness::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri(ANALYZE)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(router(&harness, None), request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn other_methods_are_rejected() {
    let harness = TestHarness::new();
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let request = Request::builder()
            .method(method.clone())
            .uri(ANALYZE)
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(router(&harness, None), request).await;
        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_eq!(body["error"], "Method not allowed");
    }
}

#[tokio::test]
async fn options_returns_ok_with_cors_headers() {
    let harness = TestHarness::new();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(ANALYZE)
        .header(header::ORIGIN, "https://crm.example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(
            header::ACCESS_CONTROL_REQUEST_HEADERS,
            "authorization, content-type, x-client-info, apikey",
        )
        .body(Body::empty())
        .unwrap();

    let response = router(&harness, Some("secret")).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn bare_options_is_empty_ok() {
    let harness = TestHarness::new();
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(ANALYZE)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(router(&harness, None), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn configured_token_is_enforced() {
    let harness = TestHarness::new();
    let app = router(&harness, Some("gw-secret"));

    let (status, body) = send(
        app.clone(),
        post_json(ANALYZE, json!({ "visit_id": "v-auth" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(harness.provider.call_count(), 0);

    let mut request = post_json(ANALYZE, json!({ "visit_id": "v-auth" }));
    request.headers_mut().insert(
        header::AUTHORIZATION,
        "Bearer gw-secret".parse().unwrap(),
    );
    let (status, _) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn health_is_public_and_reports_breaker() {
    let harness = TestHarness::new();
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();

    let (status, body) = send(router(&harness, Some("gw-secret")), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "showroom-test");
    assert_eq!(body["circuit_breaker"]["state"], "closed");
    assert_eq!(body["circuit_breaker"]["failure_count"], 0);
}

#[tokio::test]
async fn health_degrades_while_breaker_open() {
    let harness = TestHarness::builder().with_failing_model().build();
    let app = router(&harness, None);
    for i in 0..3 {
        send(app.clone(), post_json(ANALYZE, json!({ "visit_id": format!("v-{i}") }))).await;
    }

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (_, body) = send(app, request).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["circuit_breaker"]["state"], "open");
}

#[tokio::test]
async fn stored_analysis_read_back() {
    let harness = TestHarness::new();
    let app = router(&harness, None);
    let get = |uri: &str| Request::builder().uri(uri).body(Body::empty()).unwrap();

    let (status, body) = send(app.clone(), get("/v1/visits/v-9/analysis")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].as_str().unwrap().contains("v-9"));

    send(app.clone(), post_json(ANALYZE, json!({ "visit_id": "v-9" }))).await;

    let (status, body) = send(app, get("/v1/visits/v-9/analysis")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["priority_ranking"], 8);
}

#[tokio::test]
async fn analysis_log_lists_attempts() {
    let harness = TestHarness::new();
    let app = router(&harness, None);

    send(app.clone(), post_json(ANALYZE, json!({ "visit_id": "v-log" }))).await;
    send(
        app.clone(),
        post_json(ANALYZE, json!({ "visit_id": "v-log", "force_reanalysis": true })),
    )
    .await;

    let request = Request::builder()
        .uri("/v1/visits/v-log/analysis-log")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["visit_id"], "v-log");
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().all(|e| e["method"] == "openai"));
}
