// src/jobs/sources/working_nomads.rs
use serde_json::Value;

use crate::jobs::sources::str_field;
use crate::jobs::types::{Job, JobType, Source};

/// Working Nomads returns a bare array. Tags arrive as one comma-separated
/// string, there is no per-item id (ordinal fallback) and no job type.
pub struct WorkingNomads;

pub const NAME: &str = "WorkingNomads";
pub const ID_OFFSET: u64 = 400_000;

impl Source for WorkingNomads {
    fn name(&self) -> &'static str {
        NAME
    }

    fn id_offset(&self) -> u64 {
        ID_OFFSET
    }

    fn urls(&self) -> Vec<String> {
        vec!["https://www.workingnomads.com/api/exposed_jobs/".to_string()]
    }

    fn extract(&self, payload: &Value) -> Vec<Value> {
        payload.as_array().cloned().unwrap_or_default()
    }

    fn normalize(&self, raw: &[Value]) -> Vec<Job> {
        raw.iter()
            .enumerate()
            .map(|(i, item)| {
                let category = str_field(item, "category_name");
                let location = str_field(item, "location");
                let tags: Vec<String> = str_field(item, "tags")
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .collect();
                Job {
                    id: ID_OFFSET + i as u64,
                    url: str_field(item, "url"),
                    title: str_field(item, "title"),
                    company_name: str_field(item, "company_name"),
                    company_logo: None,
                    category: if category.is_empty() {
                        "All others".to_string()
                    } else {
                        category
                    },
                    job_type: JobType::Other,
                    publication_date: str_field(item, "pub_date"),
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
