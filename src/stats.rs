// src/stats.rs
//! Grouping and display helpers over the merged collection. Pure functions;
//! the UI consumes these for breakdowns and map clustering.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::jobs::types::{GeocodedJob, JobType};

/// Tally jobs by their source board. Display breakdown only, never used for
/// filtering. An empty source field tallies under "Unknown".
pub fn count_by_source(jobs: &[GeocodedJob]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for j in jobs {
        let key = if j.job.source.is_empty() {
            "Unknown"
        } else {
            j.job.source.as_str()
        };
        *counts.entry(key.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Bucket key for one map grid cell: lat/lng rounded to one decimal place
/// (roughly an 11 km grid).
pub fn location_key(lat: f64, lng: f64) -> String {
    format!("{lat:.1}_{lng:.1}")
}

/// Group jobs by rounded coordinates so visually co-located listings become
/// one selectable map point. Jobs without coordinates are excluded.
pub fn group_by_location(jobs: &[GeocodedJob]) -> HashMap<String, Vec<&GeocodedJob>> {
    let mut grouped: HashMap<String, Vec<&GeocodedJob>> = HashMap::new();
    for j in jobs {
        if let Some(c) = j.coordinates {
            grouped.entry(location_key(c.lat, c.lng)).or_default().push(j);
        }
    }
    grouped
}

static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// Reduce a markup-bearing description to plain text for card previews.
pub fn strip_html(html: &str) -> String {
    TAGS.replace_all(html, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_salary(salary: &str) -> &str {
    if salary.is_empty() {
        "Not specified"
    } else {
        salary
    }
}

pub fn job_type_label(job_type: JobType) -> &'static str {
    match job_type {
        JobType::FullTime => "Full-time",
        JobType::Contract => "Contract",
        JobType::PartTime => "Part-time",
        JobType::Freelance => "Freelance",
        JobType::Internship => "Internship",
        JobType::Other => "Other",
    }
}

/// Human relative date for listing cards. Unparseable dates pass through
/// unchanged rather than erroring.
pub fn relative_date(date: &str, now: DateTime<Utc>) -> String {
    let parsed = DateTime::parse_from_rfc3339(date)
        .map(|d| d.with_timezone(&Utc))
        .or_else(|_| {
            chrono::NaiveDateTime::parse_from_str(date, "%Y-%m-%d %H:%M:%S")
                .map(|d| d.and_utc())
        });
    let Ok(then) = parsed else {
        return date.to_string();
    };

    let days = (now - then).num_days().max(0);
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => format!("{} weeks ago", days / 7),
        _ => format!("{} months ago", days / 30),
    }
}
