// src/jobs/fetch.rs
//! Concurrent fan-out across all configured boards. Every source gets an
//! entry in the result map even when it fails; a failing source degrades to
//! an empty list and a warning, never to a pipeline error.

use std::collections::HashMap;

use anyhow::{Context, Result};
use metrics::{counter, histogram};
use reqwest::header::ACCEPT;
use serde_json::Value;

use crate::jobs::types::Source;

async fn fetch_page(client: reqwest::Client, url: String) -> Result<Value> {
    let resp = client
        .get(&url)
        .header(ACCEPT, "application/json")
        .send()
        .await
        .with_context(|| format!("GET {url}"))?
        .error_for_status()
        .with_context(|| format!("non-2xx from {url}"))?;
    resp.json::<Value>()
        .await
        .with_context(|| format!("malformed JSON from {url}"))
}

/// Fetch every page of one source concurrently, preserving page order on
/// concatenation (ordinal id fallbacks depend on it). Any page failing
/// empties the whole source; partial pages would make ordinals unstable.
async fn fetch_source(client: reqwest::Client, source: &'static dyn Source) -> Vec<Value> {
    let t0 = std::time::Instant::now();

    let handles: Vec<_> = source
        .urls()
        .into_iter()
        .map(|url| tokio::spawn(fetch_page(client.clone(), url)))
        .collect();

    let mut items = Vec::new();
    for handle in handles {
        let page = match handle.await {
            Ok(Ok(payload)) => payload,
            Ok(Err(e)) => {
                tracing::warn!(source = source.name(), error = ?e, "source fetch failed");
                counter!("fetch_source_errors_total").increment(1);
                return Vec::new();
            }
            Err(e) => {
                tracing::warn!(source = source.name(), error = ?e, "fetch task panicked");
                counter!("fetch_source_errors_total").increment(1);
                return Vec::new();
            }
        };
        items.extend(source.extract(&page));
    }

    let ms = t0.elapsed().as_secs_f64() * 1_000.0;
    histogram!("fetch_source_ms").record(ms);
    items
}

/// Fetch all sources concurrently and collect into a name → raw-items map.
/// The map always has one entry per configured source.
pub async fn fetch_all(
    client: &reqwest::Client,
    sources: &[&'static dyn Source],
) -> HashMap<String, Vec<Value>> {
    let handles: Vec<_> = sources
        .iter()
        .map(|&source| {
            let client = client.clone();
            (
                source.name(),
                tokio::spawn(fetch_source(client, source)),
            )
        })
        .collect();

    let mut out = HashMap::with_capacity(handles.len());
    for (name, handle) in handles {
        let items = match handle.await {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!(source = name, error = ?e, "source task panicked");
                counter!("fetch_source_errors_total").increment(1);
                Vec::new()
            }
        };
        out.insert(name.to_string(), items);
    }
    out
}
