// src/jobs/sources/remotive.rs
use serde_json::Value;

use crate::jobs::heuristics::normalize_job_type;
use crate::jobs::sources::{id_or_ordinal, opt_str_field, str_field, string_list};
use crate::jobs::types::{Job, Source};

/// Remotive's schema is what the canonical record was modeled on, so this is
/// the closest thing to a passthrough normalizer. Envelope: `{jobs: [...]}`.
pub struct Remotive;

pub const NAME: &str = "Remotive";
pub const ID_OFFSET: u64 = 0;

impl Source for Remotive {
    fn name(&self) -> &'static str {
        NAME
    }

    fn id_offset(&self) -> u64 {
        ID_OFFSET
    }

    fn urls(&self) -> Vec<String> {
        vec!["https://remotive.com/api/remote-jobs?limit=250".to_string()]
    }

    fn extract(&self, payload: &Value) -> Vec<Value> {
        payload
            .get("jobs")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    fn normalize(&self, raw: &[Value]) -> Vec<Job> {
        raw.iter()
            .enumerate()
            .map(|(i, item)| Job {
                id: ID_OFFSET + id_or_ordinal(item, "id", i),
                url: str_field(item, "url"),
                title: str_field(item, "title"),
                company_name: str_field(item, "company_name"),
                company_logo: opt_str_field(item, "company_logo"),
                category: str_field(item, "category"),
                job_type: normalize_job_type(item.get("job_type").unwrap_or(&Value::Null)),
                publication_date: str_field(item, "publication_date"),
                candidate_required_location: str_field(item, "candidate_required_location"),
                salary: str_field(item, "salary"),
                description: str_field(item, "description"),
                tags: string_list(item.get("tags")),
                source: NAME.to_string(),
            })
            .collect()
    }
}
