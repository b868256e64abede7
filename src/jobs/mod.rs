// src/jobs/mod.rs
//! Aggregation pipeline: fetch all boards, normalize each board's payload,
//! geocode, then deduplicate across boards by listing URL.

pub mod fetch;
pub mod heuristics;
pub mod sources;
pub mod types;

use std::collections::{HashMap, HashSet};

use anyhow::Result;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge};
use once_cell::sync::OnceCell;
use serde_json::Value;

use crate::geo::{self, Coordinates, UNRESOLVED_COUNTRY};
use crate::jobs::types::{GeocodedJob, Job};

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("fetch_source_errors_total", "Source fetch/parse failures.");
        describe_counter!("jobs_normalized_total", "Jobs emitted by the normalizers.");
        describe_counter!("jobs_missing_url_total", "Jobs dropped for an empty URL.");
        describe_counter!("jobs_dedup_total", "Jobs removed as cross-source duplicates.");
        describe_histogram!("fetch_source_ms", "Per-source fetch time in milliseconds.");
        describe_gauge!("aggregate_last_run_ts", "Unix ts of the last aggregation run.");
    });
}

/// Attach coordinates and a canonical country to a normalized job. An
/// unresolvable location is a documented absent-state, not an error: the job
/// keeps `country = "Worldwide"` and stays off the map.
pub fn geocode(job: Job) -> GeocodedJob {
    match geo::resolve(&job.candidate_required_location) {
        Some(hit) => GeocodedJob {
            job,
            coordinates: Some(Coordinates {
                lat: hit.lat,
                lng: hit.lng,
            }),
            country: hit.country.to_string(),
        },
        None => GeocodedJob {
            job,
            coordinates: None,
            country: UNRESOLVED_COUNTRY.to_string(),
        },
    }
}

/// Normalize and geocode every configured source's payload, concatenate in
/// the fixed priority order, and deduplicate by URL.
///
/// First occurrence wins, so source priority and intra-source order decide
/// which duplicate survives. Records with an empty URL cannot be deduped or
/// linked to a listing and are dropped unconditionally. A missing map entry
/// for a source is the same as an empty payload.
pub fn aggregate(
    specs: &[&'static dyn types::Source],
    per_source: &HashMap<String, Vec<Value>>,
) -> Vec<GeocodedJob> {
    ensure_metrics_described();

    let mut seen: HashSet<String> = HashSet::new();
    let mut merged: Vec<GeocodedJob> = Vec::new();
    let mut missing_url = 0usize;
    let mut duplicates = 0usize;

    for source in specs {
        let raw = per_source
            .get(source.name())
            .map(Vec::as_slice)
            .unwrap_or_default();
        let normalized = source.normalize(raw);
        counter!("jobs_normalized_total").increment(normalized.len() as u64);

        for job in normalized {
            if job.url.is_empty() {
                missing_url += 1;
                continue;
            }
            if !seen.insert(job.url.clone()) {
                duplicates += 1;
                continue;
            }
            merged.push(geocode(job));
        }
    }

    counter!("jobs_missing_url_total").increment(missing_url as u64);
    counter!("jobs_dedup_total").increment(duplicates as u64);
    tracing::debug!(
        kept = merged.len(),
        missing_url,
        duplicates,
        "aggregation pass done"
    );

    merged
}

/// Fetch every configured board and return the merged, geocoded, deduplicated
/// collection. Partial data beats no data: failed sources contribute zero
/// records and everything else still comes back.
pub async fn fetch_and_aggregate(
    client: &reqwest::Client,
    specs: &[&'static dyn types::Source],
) -> Result<Vec<GeocodedJob>> {
    ensure_metrics_described();

    let per_source = fetch::fetch_all(client, specs).await;
    let merged = aggregate(specs, &per_source);

    gauge!("aggregate_last_run_ts").set(chrono::Utc::now().timestamp().max(0) as f64);
    tracing::info!(
        total = merged.len(),
        per_source = ?specs
            .iter()
            .map(|s| (s.name(), per_source.get(s.name()).map_or(0, Vec::len)))
            .collect::<Vec<_>>(),
        "aggregated remote jobs"
    );

    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::types::JobType;

    fn job(url: &str, location: &str) -> Job {
        Job {
            id: 1,
            url: url.to_string(),
            title: "Engineer".into(),
            company_name: "Acme".into(),
            company_logo: None,
            category: "Software Development".into(),
            job_type: JobType::FullTime,
            publication_date: "2024-05-01T00:00:00Z".into(),
            candidate_required_location: location.to_string(),
            salary: String::new(),
            description: String::new(),
            tags: vec![],
            source: "Remotive".into(),
        }
    }

    #[test]
    fn geocode_resolves_known_location() {
        let g = geocode(job("https://x/1", "Paris"));
        let c = g.coordinates.unwrap();
        assert!((c.lat - 48.8566).abs() < 1e-9);
        assert_eq!(g.country, "France");
    }

    #[test]
    fn geocode_defaults_to_worldwide() {
        let g = geocode(job("https://x/1", "somewhere on a boat"));
        assert!(g.coordinates.is_none());
        assert_eq!(g.country, "Worldwide");
    }

    #[test]
    fn aggregate_tolerates_missing_source_entries() {
        let merged = aggregate(sources::all(), &HashMap::new());
        assert!(merged.is_empty());
    }
}
