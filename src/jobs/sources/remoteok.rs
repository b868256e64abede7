// src/jobs/sources/remoteok.rs
use serde_json::Value;

use crate::jobs::heuristics::{clean_location, format_salary_range, infer_category};
use crate::jobs::sources::{id_or_ordinal, opt_str_field, str_field, string_list};
use crate::jobs::types::{Job, JobType, Source};

/// RemoteOK returns a bare array whose first element is a legal-notice
/// object, not a listing; extraction keeps only items that carry both `id`
/// and `position`. No category field (inferred from tags), no job type,
/// numeric `salary_min`/`salary_max`, and a location field that often embeds
/// qualifiers ("Probably worldwide", "Remote, Europe").
pub struct RemoteOk;

pub const NAME: &str = "RemoteOK";
pub const ID_OFFSET: u64 = 300_000;

impl Source for RemoteOk {
    fn name(&self) -> &'static str {
        NAME
    }

    fn id_offset(&self) -> u64 {
        ID_OFFSET
    }

    fn urls(&self) -> Vec<String> {
        vec!["https://remoteok.com/api".to_string()]
    }

    fn extract(&self, payload: &Value) -> Vec<Value> {
        match payload.as_array() {
            Some(items) => items
                .iter()
                .filter(|item| item.get("id").is_some() && item.get("position").is_some())
                .cloned()
                .collect(),
            None => Vec::new(),
        }
    }

    fn normalize(&self, raw: &[Value]) -> Vec<Job> {
        raw.iter()
            .enumerate()
            .map(|(i, item)| {
                let tags = string_list(item.get("tags"));
                Job {
                    id: ID_OFFSET + id_or_ordinal(item, "id", i),
                    url: str_field(item, "url"),
                    title: str_field(item, "position"),
                    company_name: str_field(item, "company"),
                    company_logo: opt_str_field(item, "company_logo"),
                    category: infer_category(&tags).to_string(),
                    job_type: JobType::Other,
                    publication_date: str_field(item, "date"),
                    candidate_required_location: clean_location(&str_field(item, "location")),
                    salary: format_salary_range(
                        item.get("salary_min").unwrap_or(&Value::Null),
                        item.get("salary_max").unwrap_or(&Value::Null),
                    ),
                    description: str_field(item, "description"),
                    tags,
                    source: NAME.to_string(),
                }
            })
            .collect()
    }
}
