//! biaslens service entrypoint.
//! Boots the Axum HTTP server with the analyzer built from config.

use biaslens::api::{create_router, AppState};
use biaslens::config::BiaslensConfig;
use biaslens::{metrics, Analyzer};
use shuttle_axum::ShuttleAxum;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Enable compact tracing logs in development only.
/// Activation requires BOTH:
///   - dev environment (debug build OR SHUTTLE_ENV in {local, development, dev})
///   - BIASLENS_DEV_LOG=1
fn enable_dev_tracing() {
    let dev_flag = std::env::var("BIASLENS_DEV_LOG")
        .ok()
        .is_some_and(|v| v == "1");

    let is_dev_env = cfg!(debug_assertions)
        || matches!(
            std::env::var("SHUTTLE_ENV")
                .unwrap_or_default()
                .to_ascii_lowercase()
                .as_str(),
            "local" | "development" | "dev"
        );

    if !(dev_flag && is_dev_env) {
        return;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("biaslens=info,context=debug,config=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[shuttle_runtime::main]
async fn axum() -> ShuttleAxum {
    // Picks up BIASLENS_CONFIG_PATH / BIASLENS_DEV_LOG from .env locally.
    let _ = dotenvy::dotenv();

    enable_dev_tracing();

    let cfg = BiaslensConfig::load().map_err(anyhow::Error::from)?;
    let state = AppState::new(Analyzer::from_config(&cfg));
    let router = create_router(state, metrics::install());

    Ok(router.into())
}
