// src/jobs/heuristics.rs
//! Source-agnostic inference rules shared by the normalizers: category from
//! tags, total job-type mapping, German-language detection, salary range
//! formatting, and location-text cleanup.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::jobs::types::JobType;

/// Ordered keyword rules for boards that ship tags instead of a category.
/// First match wins; tags like `["aws", "figma"]` classify as Design because
/// the design rule precedes the devops rule.
static CATEGORY_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (r"design|ux\b|ui\b|figma", "Design"),
        (r"marketing|seo|growth", "Marketing"),
        (r"\bdata\b|analytics|\bml\b|\bai\b", "Data"),
        (r"devops|cloud|\baws\b|azure|kubernetes|docker", "DevOps / Sysadmin"),
        (r"product manager|\bpm\b", "Product"),
        (r"sales|business dev", "Sales"),
        (r"support|customer success", "Customer Support"),
        (r"\bqa\b|testing", "QA"),
        (r"finance|legal", "Finance / Legal"),
        (r"\bhr\b|recruit", "HR"),
        (r"writ|content|copy", "Writing"),
    ]
    .iter()
    .map(|(pat, cat)| (Regex::new(pat).expect("category regex"), *cat))
    .collect()
});

/// Classify a listing by its tags. No rule hit falls back to
/// `"Software Development"`, the dominant category on these boards.
pub fn infer_category(tags: &[String]) -> &'static str {
    let haystack = tags.join(" ").to_lowercase();
    for (re, category) in CATEGORY_RULES.iter() {
        if re.is_match(&haystack) {
            return category;
        }
    }
    "Software Development"
}

/// Map a source-native job type onto the closed [`JobType`] set. Total over
/// arbitrary JSON: some boards send a scalar, some a one-element array, some
/// nothing at all. Separator variants ("Full-Time", "full_time", "full time")
/// collapse before matching; anything unrecognized is `Other`.
pub fn normalize_job_type(raw: &Value) -> JobType {
    let s = match raw {
        Value::String(s) => s.as_str(),
        Value::Array(items) => match items.first() {
            Some(Value::String(s)) => s.as_str(),
            _ => return JobType::Other,
        },
        _ => return JobType::Other,
    };
    match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
        "full-time" => JobType::FullTime,
        "part-time" => JobType::PartTime,
        "contract" => JobType::Contract,
        "freelance" => JobType::Freelance,
        "internship" => JobType::Internship,
        _ => JobType::Other,
    }
}

// Common German function words and job-posting terms that rarely appear in
// English titles. Whole-word, case-insensitive.
static DE_WORDS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(und|für|oder|mit|bei|zur|zum|eine[rnms]?|wir|dein[em]?|unser[em]?|arbeit|stelle|aufgaben|anforderungen|bewerbung|beruf|erfahrung|kenntnisse|verantwortung|bereich|unterstützung)\b",
    )
    .expect("german words regex")
});

/// Heuristic language gate for boards that mix German and English listings.
/// A hit in the title, or at least one hit in the first ~300 chars of the
/// description, classifies the listing as German.
pub fn looks_german(title: &str, description: &str) -> bool {
    if DE_WORDS.is_match(title) {
        return true;
    }
    let snippet: String = description.chars().take(300).collect();
    DE_WORDS.is_match(&snippet)
}

fn thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a numeric min/max salary as `"$min – $max"` with thousands
/// separators. Empty when either bound is missing or zero — the canonical
/// "not specified" salary is the empty string.
pub fn format_salary_range(min: &Value, max: &Value) -> String {
    let (lo, hi) = (min.as_u64().unwrap_or(0), max.as_u64().unwrap_or(0));
    if lo == 0 || hi == 0 {
        return String::new();
    }
    format!("${} – ${}", thousands(lo), thousands(hi))
}

static PARENS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").expect("parens regex"));
static REMOTE_WORDS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(remote|flexible)\b").expect("remote words regex"));

/// Strip parenthesized qualifiers and standalone "remote"/"flexible" words
/// before a gazetteer lookup ("Berlin (hybrid), Germany" → "Berlin, Germany").
/// Empty cleanup falls back to the raw text; empty raw text falls back to
/// `"Worldwide"`.
pub fn clean_location(raw: &str) -> String {
    let cleaned = PARENS.replace_all(raw, " ");
    let cleaned = REMOTE_WORDS.replace_all(&cleaned, " ");
    let cleaned = cleaned
        .trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | ';' | '/' | '|' | '-'))
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace(" ,", ",");
    if !cleaned.is_empty() {
        return cleaned;
    }
    if !raw.trim().is_empty() {
        return raw.trim().to_string();
    }
    "Worldwide".to_string()
}
