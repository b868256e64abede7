// src/jobs/sources/themuse.rs
use serde_json::Value;

use crate::jobs::heuristics::clean_location;
use crate::jobs::sources::{id_or_ordinal, str_field};
use crate::jobs::types::{Job, JobType, Source};

/// The Muse nests everything: company, categories and locations are objects,
/// the apply link lives under `refs.landing_page`. Locations like
/// "Flexible / Remote" go through the location cleanup before geocoding.
/// Envelope: `{results: [...]}`, paginated.
pub struct TheMuse;

pub const NAME: &str = "TheMuse";
pub const ID_OFFSET: u64 = 500_000;

fn joined_names(item: &Value, key: &str) -> String {
    item.get(key)
        .and_then(Value::as_array)
        .map(|entries| {
            entries
                .iter()
                .filter_map(|e| e.get("name").and_then(Value::as_str))
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

impl Source for TheMuse {
    fn name(&self) -> &'static str {
        NAME
    }

    fn id_offset(&self) -> u64 {
        ID_OFFSET
    }

    fn urls(&self) -> Vec<String> {
        vec![
            "https://www.themuse.com/api/public/jobs?page=0&per_page=100".to_string(),
            "https://www.themuse.com/api/public/jobs?page=1&per_page=100".to_string(),
        ]
    }

    fn extract(&self, payload: &Value) -> Vec<Value> {
        payload
            .get("results")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }

    fn normalize(&self, raw: &[Value]) -> Vec<Job> {
        raw.iter()
            .enumerate()
            .map(|(i, item)| {
                let category = joined_names(item, "categories");
                Job {
                    id: ID_OFFSET + id_or_ordinal(item, "id", i),
                    url: item
                        .get("refs")
                        .map(|refs| str_field(refs, "landing_page"))
                        .unwrap_or_default(),
                    title: str_field(item, "name"),
                    company_name: item
                        .get("company")
                        .map(|c| str_field(c, "name"))
                        .unwrap_or_default(),
                    company_logo: None,
                    category: if category.is_empty() {
                        "All others".to_string()
                    } else {
                        category
                    },
                    job_type: JobType::Other,
                    publication_date: str_field(item, "publication_date"),
                    candidate_required_location: clean_location(&joined_names(item, "locations")),
                    salary: String::new(),
                    description: str_field(item, "contents"),
                    tags: Vec::new(),
                    source: NAME.to_string(),
                }
            })
            .collect()
    }
}
