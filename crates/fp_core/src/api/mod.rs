//! Headless entry points: one match from a JSON request, or many seeded
//! matches in parallel.

pub mod batch;
pub mod json_api;

pub use batch::{simulate_batch, BatchSummary};
pub use json_api::{
    run_match, run_match_with, simulate_match_json, GoalRecord, MatchRequest, MatchResponse,
    RefereeMode, SCHEMA_VERSION,
};
