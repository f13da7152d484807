// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - POST /analyze (ok, detailed, missing text)
// - POST /quick_analyze
// - POST /headline_check (ok, missing field)
// - GET /metrics

use serde_json::json;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use biaslens::api::{create_router, AppState};
use biaslens::Analyzer;

const BODY_LIMIT: usize = 1024 * 1024;

fn test_router() -> Router {
    create_router(AppState::new(Analyzer::default()), None)
}

async fn post_json(app: Router, uri: &str, payload: Json) -> (StatusCode, Json) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("build POST");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    let v: Json = serde_json::from_slice(&bytes).expect("json body");
    (status, v)
}

#[tokio::test]
async fn health_returns_ok() {
    let req = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .expect("build GET /health");
    let resp = test_router().oneshot(req).await.expect("oneshot /health");
    assert_eq!(resp.status(), StatusCode::OK);

    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    assert_eq!(String::from_utf8_lossy(&bytes).trim(), "ok");
}

#[tokio::test]
async fn analyze_returns_trust_report() {
    let (status, v) = post_json(
        test_router(),
        "/analyze",
        json!({ "text": "The government announced new policies today.", "reference_date": "2025-06-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(v["score"].as_f64().expect("score") >= 70.0);
    assert!(v["indicator"].as_str().expect("indicator").contains("Trusted"));
    assert!(v["explanation"].is_array());
    assert!(v["tip"].is_string());
    assert_eq!(v["primary_bias_type"], json!("neutral"));
    assert!(v["metadata"]["component_processing_times"].is_object());
    assert!(v.get("detailed").is_none());
}

#[tokio::test]
async fn analyze_with_detail_and_headline() {
    let (status, v) = post_json(
        test_router(),
        "/analyze",
        json!({
            "text": "Yoruba domination must end, greedy Yoruba.",
            "headline": "SHOCKING! Terrified residents flee!",
            "url": "https://www.premiumtimesng.com/news/1.html",
            "include_detailed_results": true
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let risks = v["risk_factors"].as_array().expect("risk_factors");
    assert!(risks.contains(&json!("nigerian_bias")));
    let ctx = v["detailed"]["contextual_bias"].as_array().expect("contextual_bias");
    assert_eq!(ctx[0]["term"], json!("yoruba"));
    assert!(v["headline_analysis"]["mismatch_score"].is_number());
    assert_eq!(
        v["detailed"]["trust"]["auxiliary"]["credibility"]["info"]["tier"],
        json!("high")
    );
}

#[tokio::test]
async fn analyze_without_text_is_400_error_report() {
    let (status, v) = post_json(test_router(), "/analyze", json!({ "text": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["indicator"], json!("Error"));
    assert!(v["score"].is_null());

    let (status, _) = post_json(test_router(), "/analyze", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn quick_analyze_uses_basic_calculation() {
    let (status, v) = post_json(
        test_router(),
        "/quick_analyze",
        json!({ "text": "Nawa o! You won't believe what happened next." }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["metadata"]["mode"], json!("basic_calculation"));
    assert!(v["score"].as_f64().expect("score") <= 45.0);
}

#[tokio::test]
async fn headline_check_requires_both_fields() {
    let (status, v) = post_json(
        test_router(),
        "/headline_check",
        json!({
            "headline": "Water board schedules pipeline maintenance",
            "content": "The water board scheduled maintenance on the main pipeline."
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["mismatch_level"], json!("low"));
    assert_eq!(v["is_likely_clickbait"], json!(false));

    let (status, v) = post_json(test_router(), "/headline_check", json!({ "headline": "x" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(v["error"].is_string());
}

#[tokio::test]
async fn metrics_route_is_mounted() {
    let resp = test_router()
        .oneshot(Request::get("/metrics").body(Body::empty()).expect("build GET /metrics"))
        .await
        .expect("oneshot /metrics");
    assert_eq!(resp.status(), StatusCode::OK);
}
