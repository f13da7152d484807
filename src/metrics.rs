// src/metrics.rs
use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use shuttle_axum::axum::{routing::get, Router};
use tracing::warn;

pub const ANALYSES_TOTAL: &str = "biaslens_analyses_total";
pub const SIGNAL_FAILURES_TOTAL: &str = "biaslens_signal_failures_total";
pub const TRUST_SCORE: &str = "biaslens_trust_score";

static HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Installs the global Prometheus recorder once per process.
/// Returns `None` if another recorder is already installed.
pub fn install() -> Option<PrometheusHandle> {
    HANDLE
        .get_or_try_init(|| PrometheusBuilder::new().install_recorder())
        .map_err(|e| warn!(target: "metrics", error = %e, "prometheus recorder not installed"))
        .ok()
        .cloned()
}

/// `mode` is "full", "quick" or "headline". Error reports carry no score.
pub fn record_analysis(mode: &'static str, score: Option<f64>) {
    counter!(ANALYSES_TOTAL, "mode" => mode).increment(1);
    if let Some(s) = score {
        histogram!(TRUST_SCORE).record(s);
    }
}

pub fn record_signal_failure(signal: &'static str) {
    counter!(SIGNAL_FAILURES_TOTAL, "signal" => signal).increment(1);
}

/// `/metrics` in the Prometheus exposition format.
pub fn router<S>(handle: Option<PrometheusHandle>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/metrics",
        get(move || {
            let h = handle.clone();
            async move { h.map(|h| h.render()).unwrap_or_default() }
        }),
    )
}
