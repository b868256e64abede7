// src/jobs/types.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::geo::Coordinates;

/// Closed job-type set. Unmapped raw values always normalize to `Other`,
/// never pass through raw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobType {
    FullTime,
    Contract,
    PartTime,
    Freelance,
    Internship,
    Other,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobType::FullTime => "full_time",
            JobType::Contract => "contract",
            JobType::PartTime => "part_time",
            JobType::Freelance => "freelance",
            JobType::Internship => "internship",
            JobType::Other => "other",
        }
    }
}

/// The canonical record every upstream board normalizes into.
///
/// `id` is unique per source; each source adds its own numeric offset so ids
/// never collide across sources. `url` is the cross-source dedup key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: u64,
    pub url: String,
    pub title: String,
    pub company_name: String,
    pub company_logo: Option<String>,
    pub category: String,
    pub job_type: JobType,
    pub publication_date: String,
    pub candidate_required_location: String,
    pub salary: String,
    pub description: String,
    pub tags: Vec<String>,
    pub source: String,
}

/// A canonical job annotated with map coordinates. `coordinates: None` keeps
/// the job in lists and counts but off the map; `country` is never absent,
/// it defaults to `"Worldwide"`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodedJob {
    #[serde(flatten)]
    pub job: Job,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub country: String,
}

/// A configured upstream board: request pages plus the source-specific pieces
/// of the pipeline (envelope extraction, normalization).
pub trait Source: Sync {
    /// Fixed display name, also the key in the per-source payload map.
    fn name(&self) -> &'static str;

    /// Reserved id range start for this source.
    fn id_offset(&self) -> u64;

    /// One or more GET endpoints; multi-page sources list pages in order.
    fn urls(&self) -> Vec<String>;

    /// Pull the item list out of the source's response envelope.
    /// Wrong top-level shape yields an empty list, never an error.
    fn extract(&self, payload: &Value) -> Vec<Value>;

    /// Convert raw items into canonical jobs. Individual malformed records
    /// normalize to best-effort defaults; only language-filtered records are
    /// dropped.
    fn normalize(&self, raw: &[Value]) -> Vec<Job>;
}

/// Recognized categories, surfaced to the filter UI. Classification data,
/// not pipeline logic.
pub const CATEGORIES: &[&str] = &[
    "Software Development",
    "Design",
    "Marketing",
    "Customer Support",
    "Sales",
    "Product",
    "DevOps / Sysadmin",
    "Data",
    "Business",
    "Finance / Legal",
    "HR",
    "QA",
    "Writing",
    "All others",
];

pub const JOB_TYPES: &[JobType] = &[
    JobType::FullTime,
    JobType::Contract,
    JobType::PartTime,
    JobType::Freelance,
    JobType::Internship,
    JobType::Other,
];
