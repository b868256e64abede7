//! Remote-job aggregation service — binary entrypoint.
//! Boots the Axum HTTP server wiring routes, shared state, and middleware.

use remotemap::api::{self, AppState};
use remotemap::config::{self, AppConfig};
use remotemap::jobs::sources;
use remotemap::metrics::Metrics;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("remotemap=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env in local/dev; no-op in prod environments.
    let _ = dotenvy::dotenv();
    init_tracing();

    let cfg = AppConfig::from_env();

    let allow = config::load_sources_default()?;
    let enabled = sources::enabled(&allow);
    tracing::info!(
        sources = ?enabled.iter().map(|s| s.name()).collect::<Vec<_>>(),
        "configured sources"
    );

    let metrics = Metrics::init(cfg.cache_ttl.as_secs());

    let bind = cfg.bind.clone();
    let state = AppState::new(cfg, enabled)?;
    let app = api::router(state).merge(metrics.router());

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    tracing::info!(%bind, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}
