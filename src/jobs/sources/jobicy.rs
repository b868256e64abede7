// src/jobs/sources/jobicy.rs
use serde_json::Value;

use crate::jobs::heuristics::normalize_job_type;
use crate::jobs::sources::{id_or_ordinal, opt_str_field, str_field, string_list};
use crate::jobs::types::{Job, Source};

/// Jobicy camelCases its fields and ships `jobType` as a one-element array
/// (`["Full-Time"]`). `tags` is often null. Envelope: `{jobs: [...]}`.
pub struct Jobicy;

pub const NAME: &str = "Jobicy";
pub const ID_OFFSET: u64 = 200_000;

impl Source for Jobicy {
    fn name(&self) -> &'static str {
        NAME
    }

    fn id_offset(&self) -> u64 {
        ID_OFFSET
    }

    fn urls(&self) -> Vec<String> {
        vec!["https://jobicy.com/api/v2/remote-jobs?count=50".to_string()]
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
            .map(|(i, item)| {
                let category = str_field(item, "jobCategory");
                let geo = str_field(item, "jobGeo");
                Job {
                    id: ID_OFFSET + id_or_ordinal(item, "id", i),
                    url: str_field(item, "url"),
                    title: str_field(item, "jobTitle"),
                    company_name: str_field(item, "companyName"),
                    company_logo: opt_str_field(item, "companyLogo"),
                    category: if category.is_empty() {
                        "All others".to_string()
                    } else {
                        category
                    },
                    job_type: normalize_job_type(item.get("jobType").unwrap_or(&Value::Null)),
                    publication_date: str_field(item, "pubDate"),
                    candidate_required_location: if geo.is_empty() {
                        "Worldwide".to_string()
                    } else {
                        geo
                    },
                    salary: str_field(item, "jobSalary"),
                    description: str_field(item, "jobDescription"),
                    tags: string_list(item.get("tags")),
                    source: NAME.to_string(),
                }
            })
            .collect()
    }
}
