// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod api;
pub mod config;
pub mod geo;
pub mod jobs;
pub mod metrics;
pub mod stats;

// ---- Re-exports for stable public API ----
pub use crate::api::{router, AppState};
pub use crate::geo::{resolve, Coordinates};
pub use crate::jobs::types::{GeocodedJob, Job, JobType};
pub use crate::jobs::{aggregate, fetch_and_aggregate, geocode};
