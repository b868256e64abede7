// src/api.rs
//! HTTP surface: the aggregated collection as JSON, per-source counts, and
//! health. Aggregation results are cached for a bounded interval; a stale
//! cache is served immediately while one background task refreshes it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::jobs::{self, types::GeocodedJob, types::Source};
use crate::stats;

#[derive(Clone)]
struct CacheEntry {
    fetched_at: Instant,
    jobs: Arc<Vec<GeocodedJob>>,
}

#[derive(Clone)]
pub struct AppState {
    client: reqwest::Client,
    cfg: AppConfig,
    sources: Vec<&'static dyn Source>,
    cache: Arc<RwLock<Option<CacheEntry>>>,
    refreshing: Arc<AtomicBool>,
}

impl AppState {
    pub fn new(cfg: AppConfig, sources: Vec<&'static dyn Source>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(cfg.fetch_timeout)
            .build()?;
        Ok(Self {
            client,
            cfg,
            sources,
            cache: Arc::new(RwLock::new(None)),
            refreshing: Arc::new(AtomicBool::new(false)),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/api/jobs", get(api_jobs))
        .route("/api/stats", get(api_stats))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Fresh cache → serve it. Stale cache → serve it anyway and refresh in the
/// background, single-flight. Cold cache → fetch inline.
async fn cached_jobs(state: &AppState) -> Result<Arc<Vec<GeocodedJob>>> {
    let entry = state.cache.read().await.clone();
    if let Some(entry) = entry {
        if entry.fetched_at.elapsed() < state.cfg.cache_ttl {
            return Ok(entry.jobs);
        }
        if !state.refreshing.swap(true, Ordering::SeqCst) {
            let st = state.clone();
            tokio::spawn(async move {
                match jobs::fetch_and_aggregate(&st.client, &st.sources).await {
                    Ok(fresh) => {
                        *st.cache.write().await = Some(CacheEntry {
                            fetched_at: Instant::now(),
                            jobs: Arc::new(fresh),
                        });
                    }
                    Err(e) => tracing::warn!(error = ?e, "background refresh failed"),
                }
                st.refreshing.store(false, Ordering::SeqCst);
            });
        }
        return Ok(entry.jobs);
    }

    let fresh = jobs::fetch_and_aggregate(&state.client, &state.sources).await?;
    let fresh = Arc::new(fresh);
    *state.cache.write().await = Some(CacheEntry {
        fetched_at: Instant::now(),
        jobs: fresh.clone(),
    });
    Ok(fresh)
}

type ApiError = (StatusCode, Json<serde_json::Value>);

fn bad_gateway(e: anyhow::Error) -> ApiError {
    (
        StatusCode::BAD_GATEWAY,
        Json(json!({ "error": e.to_string() })),
    )
}

async fn api_jobs(State(state): State<AppState>) -> Result<Json<Vec<GeocodedJob>>, ApiError> {
    let jobs = cached_jobs(&state).await.map_err(bad_gateway)?;
    Ok(Json((*jobs).clone()))
}

async fn api_stats(
    State(state): State<AppState>,
) -> Result<Json<HashMap<String, usize>>, ApiError> {
    let jobs = cached_jobs(&state).await.map_err(bad_gateway)?;
    Ok(Json(stats::count_by_source(&jobs)))
}
