// tests/sources_normalize.rs
//
// Per-source normalization behavior: envelope quirks, id offsets and
// ordinal fallbacks, language filtering, category inference, salary
// formatting, and the total job-type mapping.

use rand::Rng;
use serde_json::{json, Value};

use remotemap::jobs::heuristics::normalize_job_type;
use remotemap::jobs::sources::{
    arbeitnow::Arbeitnow, jobicy::Jobicy, remoteok::RemoteOk, remotive::Remotive,
    themuse::TheMuse, working_nomads::WorkingNomads,
};
use remotemap::jobs::types::{JobType, Source, JOB_TYPES};

#[test]
fn remotive_passes_canonical_fields_through() {
    let raw = vec![json!({
        "id": 42,
        "url": "https://remotive.com/job/42",
        "title": "Rust Engineer",
        "company_name": "Acme",
        "company_logo": "https://logo",
        "category": "Software Development",
        "job_type": "full_time",
        "publication_date": "2024-05-01T00:00:00",
        "candidate_required_location": "Portugal",
        "salary": "$90k",
        "description": "desc",
        "tags": ["rust", "backend"]
    })];

    let jobs = Remotive.normalize(&raw);
    assert_eq!(jobs.len(), 1);
    let j = &jobs[0];
    assert_eq!(j.id, 42);
    assert_eq!(j.job_type, JobType::FullTime);
    assert_eq!(j.company_logo.as_deref(), Some("https://logo"));
    assert_eq!(j.tags, ["rust", "backend"]);
    assert_eq!(j.source, "Remotive");
}

#[test]
fn remotive_tolerates_a_malformed_record() {
    // Missing title/url still emits a best-effort record; dedup drops the
    // empty url later, normalization never aborts the batch.
    let raw = vec![json!({"id": 1}), json!({"id": 2, "url": "https://x/2", "title": "Ok"})];
    let jobs = Remotive.normalize(&raw);
    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].title, "");
    assert_eq!(jobs[0].url, "");
    assert_eq!(jobs[1].title, "Ok");
}

#[test]
fn arbeitnow_drops_german_listings_and_orders_ordinals_after_the_filter() {
    let raw = vec![
        json!({
            "url": "https://arbeitnow.com/j/1",
            "title": "Entwickler für Cloud und Backend",
            "company_name": "GmbH",
            "description": "Wir suchen dich.",
            "tags": [],
            "job_types": ["full_time"],
            "location": "Berlin",
            "created_at": 1714521600
        }),
        json!({
            "url": "https://arbeitnow.com/j/2",
            "title": "Backend Engineer",
            "company_name": "GmbH",
            "description": "English description.",
            "tags": ["aws", "figma"],
            "job_types": ["full_time"],
            "location": "",
            "created_at": 1714521600
        }),
    ];

    let jobs = Arbeitnow.normalize(&raw);
    assert_eq!(jobs.len(), 1);
    let j = &jobs[0];
    // Ordinals count kept listings, so the first survivor gets the offset.
    assert_eq!(j.id, 100_000);
    assert_eq!(j.category, "Design"); // design rule precedes devops
    assert_eq!(j.job_type, JobType::FullTime);
    assert_eq!(j.candidate_required_location, "Worldwide");
    assert_eq!(j.publication_date, "2024-05-01T00:00:00+00:00");
}

#[test]
fn jobicy_handles_array_job_type_and_null_tags() {
    let raw = vec![json!({
        "id": 7,
        "url": "https://jobicy.com/j/7",
        "jobTitle": "Product Designer",
        "companyName": "Acme",
        "companyLogo": "",
        "jobType": ["Full-Time"],
        "jobCategory": "",
        "jobGeo": "Europe",
        "jobSalary": "",
        "pubDate": "2024-05-01 10:00:05",
        "jobDescription": "desc",
        "tags": null
    })];

    let jobs = Jobicy.normalize(&raw);
    let j = &jobs[0];
    assert_eq!(j.id, 200_007);
    assert_eq!(j.job_type, JobType::FullTime);
    assert_eq!(j.category, "All others");
    assert_eq!(j.company_logo, None);
    assert!(j.tags.is_empty());
}

#[test]
fn remoteok_extraction_skips_the_legal_notice_head() {
    let payload = json!([
        {"legal": "this first element is metadata, not a listing"},
        {"id": 11, "position": "DevOps Engineer", "url": "https://remoteok.com/j/11",
         "company": "Acme", "tags": ["aws", "kubernetes"], "location": "Worldwide",
         "salary_min": 70000, "salary_max": 115000, "date": "2024-05-01T00:00:00+00:00"}
    ]);

    let items = RemoteOk.extract(&payload);
    assert_eq!(items.len(), 1);

    let jobs = RemoteOk.normalize(&items);
    let j = &jobs[0];
    assert_eq!(j.id, 300_011);
    assert_eq!(j.title, "DevOps Engineer");
    assert_eq!(j.category, "DevOps / Sysadmin");
    assert_eq!(j.salary, "$70,000 – $115,000");
    assert_eq!(j.job_type, JobType::Other);
}

#[test]
fn remoteok_string_id_falls_back_to_ordinal_when_non_numeric() {
    let items = vec![
        json!({"id": "93841", "position": "A", "url": "https://r/1", "company": "x"}),
        json!({"id": "remote-dev", "position": "B", "url": "https://r/2", "company": "x"}),
    ];
    let jobs = RemoteOk.normalize(&items);
    assert_eq!(jobs[0].id, 300_000 + 93841);
    assert_eq!(jobs[1].id, 300_000 + 50_001); // reserved-range ordinal 1
}

#[test]
fn working_nomads_splits_comma_tags_and_uses_ordinals() {
    let raw = vec![json!({
        "url": "https://wn.com/j/1",
        "title": "Content Writer",
        "company_name": "Acme",
        "category_name": "Writing",
        "tags": "writing, content,  seo ",
        "location": "USA",
        "pub_date": "2024-05-01",
        "description": "desc"
    })];

    let jobs = WorkingNomads.normalize(&raw);
    let j = &jobs[0];
    assert_eq!(j.id, 400_000);
    assert_eq!(j.tags, ["writing", "content", "seo"]);
    assert_eq!(j.category, "Writing");
    assert_eq!(j.source, "WorkingNomads");
}

#[test]
fn themuse_unnests_refs_company_and_locations() {
    let payload = json!({"results": [{
        "id": 123,
        "name": "Support Specialist",
        "company": {"name": "Acme"},
        "locations": [{"name": "Flexible / Remote"}],
        "categories": [{"name": "Customer Service"}],
        "refs": {"landing_page": "https://themuse.com/j/123"},
        "publication_date": "2024-05-01T00:00:00Z",
        "contents": "<p>desc</p>"
    }]});

    let items = TheMuse.extract(&payload);
    let jobs = TheMuse.normalize(&items);
    let j = &jobs[0];
    assert_eq!(j.id, 500_123);
    assert_eq!(j.url, "https://themuse.com/j/123");
    assert_eq!(j.company_name, "Acme");
    // Cleanup empties "Flexible / Remote", so the raw text is kept; it will
    // simply fail gazetteer resolution and stay off the map.
    assert_eq!(j.candidate_required_location, "Flexible / Remote");
}

#[test]
fn themuse_location_cleanup_improves_geocoding_input() {
    let payload = json!({"results": [{
        "id": 1,
        "name": "Engineer",
        "company": {"name": "Acme"},
        "locations": [{"name": "Berlin, Germany (Remote)"}],
        "refs": {"landing_page": "https://themuse.com/j/1"},
        "publication_date": "2024-05-01T00:00:00Z",
        "contents": ""
    }]});

    let jobs = TheMuse.normalize(&TheMuse.extract(&payload));
    assert_eq!(jobs[0].candidate_required_location, "Berlin, Germany");
}

#[test]
fn wrong_top_level_shape_yields_an_empty_batch() {
    for source in [
        &Remotive as &dyn Source,
        &Arbeitnow,
        &Jobicy,
        &RemoteOk,
        &WorkingNomads,
        &TheMuse,
    ] {
        assert!(source.extract(&json!("not a collection")).is_empty());
        assert!(source.extract(&json!({"unexpected": true})).is_empty());
    }
}

#[test]
fn job_type_mapping_is_total_over_fuzzed_inputs() {
    let mut rng = rand::rng();
    let charset: Vec<char> = "abcdefghijklmnopqrstuvwxyz -_/".chars().collect();

    for _ in 0..500 {
        let len = rng.random_range(0..24);
        let s: String = (0..len)
            .map(|_| charset[rng.random_range(0..charset.len())])
            .collect();
        let inputs = [json!(s.clone()), json!([s]), json!(null), json!(rng.random_range(0..9))];
        for v in inputs {
            let t = normalize_job_type(&v);
            assert!(JOB_TYPES.contains(&t), "unexpected job type {t:?} for {v}");
        }
    }
}
