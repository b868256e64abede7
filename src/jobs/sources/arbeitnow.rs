// src/jobs/sources/arbeitnow.rs
use chrono::{TimeZone, Utc};
use serde_json::Value;

use crate::jobs::heuristics::{infer_category, looks_german, normalize_job_type};
use crate::jobs::sources::{str_field, string_list};
use crate::jobs::types::{Job, Source};

/// Arbeitnow is primarily a German board, so listings run through the
/// language gate first; German-language jobs are dropped, not flagged.
/// Envelope: `{data: [...]}`, paginated. No native category (inferred from
/// tags) and no usable native id (ordinal over the kept listings).
pub struct Arbeitnow;

pub const NAME: &str = "Arbeitnow";
pub const ID_OFFSET: u64 = 100_000;

fn unix_to_rfc3339(secs: i64) -> String {
    Utc.timestamp_opt(secs, 0)
        .single()
        .map(|dt| dt.to_rfc3339())
        .unwrap_or_default()
}

impl Source for Arbeitnow {
    fn name(&self) -> &'static str {
        NAME
    }

    fn id_offset(&self) -> u64 {
        ID_OFFSET
    }

    fn urls(&self) -> Vec<String> {
        vec![
            "https://www.arbeitnow.com/api/job-board-api?lang=en".to_string(),
            "https://www.arbeitnow.com/api/job-board-api?lang=en&page=2".to_string(),
        ]
    }

    fn extract(&self, payload: &Value) -> Vec<Value> {
        payload
            .get("data")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    fn normalize(&self, raw: &[Value]) -> Vec<Job> {
        raw.iter()
            .filter(|item| {
                !looks_german(&str_field(item, "title"), &str_field(item, "description"))
            })
            .enumerate()
            .map(|(i, item)| {
                let tags = string_list(item.get("tags"));
                let location = str_field(item, "location");
                Job {
                    id: ID_OFFSET + i as u64,
                    url: str_field(item, "url"),
                    title: str_field(item, "title"),
                    company_name: str_field(item, "company_name"),
                    company_logo: None,
                    category: infer_category(&tags).to_string(),
                    job_type: normalize_job_type(item.get("job_types").unwrap_or(&Value::Null)),
                    publication_date: item
                        .get("created_at")
                        .and_then(Value::as_i64)
                        .map(unix_to_rfc3339)
                        .unwrap_or_default(),
                    candidate_required_location: if location.is_empty() {
                        "Worldwide".to_string()
                    } else {
                        location
                    },
                    salary: String::new(),
                    description: str_field(item, "description"),
                    tags,
                    source: NAME.to_string(),
                }
            })
            .collect()
    }
}
