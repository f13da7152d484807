use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use shuttle_axum::axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::analyzer::{AnalysisReport, AnalyzeOptions, Analyzer};
use crate::config::BiaslensConfig;
use crate::metrics;

#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
}

impl AppState {
    pub fn new(analyzer: Analyzer) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
        }
    }

    /// Analyzer built from `BIASLENS_CONFIG_PATH` (or defaults).
    pub fn from_env() -> Self {
        Self::new(Analyzer::from_config(&BiaslensConfig::load_or_default()))
    }
}

/// Router with default state and no metrics recorder.
pub fn router() -> Router {
    create_router(AppState::from_env(), None)
}

pub fn create_router(state: AppState, metrics_handle: Option<PrometheusHandle>) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/analyze", post(analyze))
        .route("/quick_analyze", post(quick_analyze))
        .route("/headline_check", post(headline_check))
        .with_state(state)
        .merge(metrics::router::<()>(metrics_handle))
        .layer(CorsLayer::very_permissive())
}

#[derive(serde::Deserialize)]
struct AnalyzeReq {
    #[serde(default)]
    text: Option<String>,
    #[serde(flatten)]
    options: AnalyzeOptions,
}

#[derive(serde::Deserialize)]
struct QuickReq {
    #[serde(default)]
    text: Option<String>,
}

#[derive(serde::Deserialize)]
struct HeadlineReq {
    #[serde(default)]
    headline: Option<String>,
    #[serde(default)]
    content: Option<String>,
}

fn bad_request(msg: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
}

fn non_blank(s: Option<String>) -> Option<String> {
    s.filter(|t| !t.trim().is_empty())
}

async fn analyze(State(state): State<AppState>, Json(body): Json<AnalyzeReq>) -> Response {
    let Some(text) = non_blank(body.text) else {
        let report = AnalysisReport::error("Empty or invalid text provided", "");
        return (StatusCode::BAD_REQUEST, Json(report)).into_response();
    };
    Json(state.analyzer.analyze(&text, &body.options)).into_response()
}

async fn quick_analyze(State(state): State<AppState>, Json(body): Json<QuickReq>) -> Response {
    let Some(text) = non_blank(body.text) else {
        return bad_request("missing `text`");
    };
    Json(state.analyzer.quick_analyze(&text)).into_response()
}

async fn headline_check(State(state): State<AppState>, Json(body): Json<HeadlineReq>) -> Response {
    let (Some(headline), Some(content)) = (non_blank(body.headline), non_blank(body.content)) else {
        return bad_request("both `headline` and `content` are required");
    };
    match state.analyzer.headline_mismatch(&headline, &content) {
        Ok(m) => Json(m).into_response(),
        Err(e) => bad_request(&e.to_string()),
    }
}
