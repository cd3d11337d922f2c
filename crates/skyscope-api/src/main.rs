//! # skyscope-api: Binary Entry Point
//!
//! Loads configuration from the environment, the policy table and the
//! datasets, then serves the API on `0.0.0.0:$PORT` (default 8080).

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use skyscope_api::state::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().inspect_err(|e| {
        tracing::error!("configuration rejected: {e}");
    })?;
    tracing::info!(?config, "starting skyscope-api");

    let recorder = PrometheusBuilder::new()
        .install_recorder()
        .context("installing Prometheus recorder")?;

    let state = AppState::bootstrap(&config)
        .inspect_err(|e| tracing::error!("bootstrap failed: {e}"))?
        .with_metrics(recorder);

    let app = skyscope_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("skyscope-api listening on {addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
