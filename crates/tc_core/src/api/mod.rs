//! Host-facing API surfaces.

pub mod json_api;
pub mod report;

pub use json_api::{simulate_contest_json, ContestRequest, ContestResponse, API_SCHEMA_VERSION};
pub use report::{contest_summary, ContestSummary, RoundSummary, ScoreboardEntry};
