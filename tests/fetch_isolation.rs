// tests/fetch_isolation.rs
//
// Orchestrator behavior against a local mock upstream: per-source failure
// isolation, page-order-preserving pagination, and all-pages-or-nothing
// semantics. No external network involved.

use axum::{routing::get, Router};
use serde_json::{json, Value};

use remotemap::jobs::fetch::fetch_all;
use remotemap::jobs::types::{Job, Source};

struct TestSource {
    name: &'static str,
    urls: Vec<String>,
}

impl Source for TestSource {
    fn name(&self) -> &'static str {
        self.name
    }
    fn id_offset(&self) -> u64 {
        0
    }
    fn urls(&self) -> Vec<String> {
        self.urls.clone()
    }
    fn extract(&self, payload: &Value) -> Vec<Value> {
        payload
            .get("jobs")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default()
    }
    fn normalize(&self, _raw: &[Value]) -> Vec<Job> {
        Vec::new()
    }
}

fn leak(name: &'static str, urls: Vec<String>) -> &'static dyn Source {
    Box::leak(Box::new(TestSource { name, urls }))
}

async fn spawn_mock() -> String {
    let app = Router::new()
        .route("/ok/1", get(|| async {
            axum::Json(json!({"jobs": [{"n": 1}, {"n": 2}]}))
        }))
        .route("/ok/2", get(|| async {
            axum::Json(json!({"jobs": [{"n": 3}]}))
        }))
        .route("/bad/status", get(|| async {
            (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "boom")
        }))
        .route("/bad/json", get(|| async { "definitely not json" }));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock upstream");
    let addr = listener.local_addr().expect("mock addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock");
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn failing_sources_are_isolated_and_always_present_in_the_map() {
    let base = spawn_mock().await;
    let sources: Vec<&'static dyn Source> = vec![
        leak("good", vec![format!("{base}/ok/1")]),
        leak("bad-status", vec![format!("{base}/bad/status")]),
        leak("bad-json", vec![format!("{base}/bad/json")]),
    ];

    let client = reqwest::Client::new();
    let out = fetch_all(&client, &sources).await;

    assert_eq!(out.len(), 3);
    assert_eq!(out["good"].len(), 2);
    assert!(out["bad-status"].is_empty());
    assert!(out["bad-json"].is_empty());
}

#[tokio::test]
async fn pages_concatenate_in_request_order() {
    let base = spawn_mock().await;
    let sources: Vec<&'static dyn Source> = vec![leak(
        "paged",
        vec![format!("{base}/ok/1"), format!("{base}/ok/2")],
    )];

    let client = reqwest::Client::new();
    let out = fetch_all(&client, &sources).await;

    let ns: Vec<i64> = out["paged"]
        .iter()
        .map(|v| v["n"].as_i64().unwrap())
        .collect();
    assert_eq!(ns, [1, 2, 3]);
}

#[tokio::test]
async fn one_bad_page_empties_the_whole_source_but_not_its_siblings() {
    let base = spawn_mock().await;
    let sources: Vec<&'static dyn Source> = vec![
        leak(
            "partial",
            vec![format!("{base}/ok/1"), format!("{base}/bad/status")],
        ),
        leak("whole", vec![format!("{base}/ok/2")]),
    ];

    let client = reqwest::Client::new();
    let out = fetch_all(&client, &sources).await;

    // No partial-page results: ordinal id fallbacks depend on a complete,
    // ordered batch.
    assert!(out["partial"].is_empty());
    assert_eq!(out["whole"].len(), 1);
}

#[tokio::test]
async fn unreachable_host_degrades_to_an_empty_entry() {
    // Nothing listens on this port.
    let sources: Vec<&'static dyn Source> =
        vec![leak("down", vec!["http://127.0.0.1:9/jobs".to_string()])];

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(2))
        .build()
        .unwrap();
    let out = fetch_all(&client, &sources).await;

    assert_eq!(out.len(), 1);
    assert!(out["down"].is_empty());
}
