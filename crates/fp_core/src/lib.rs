//! # fp_core - Deterministic Arcade Football Match Core
//!
//! A five-a-side match seen from the referee's whistle: ball physics, team
//! player and goalie AI, a bribable referee and an ice-cream truck, driven
//! one fixed tick at a time by a match orchestrator.
//!
//! ## Features
//! - Deterministic simulation (same seed and inputs = same trace)
//! - Tick API with per-tick events, sound cues and serializable snapshots
//! - JSON API and parallel batch runner for headless matches
//! - YAML / JSON tunable configuration with validation

// Doc formatting lints - purely cosmetic
#![allow(clippy::doc_lazy_continuation)]
// Struct initialization pattern used intentionally
#![allow(clippy::field_reassign_with_default)]
// Game engine APIs often require many parameters for physics, state, etc.
#![allow(clippy::too_many_arguments)]
// Method naming conventions - would require API changes
#![allow(clippy::wrong_self_convention)]

pub mod api;
pub mod engine;
pub mod error;

// Re-export main API functions
pub use api::{
    run_match, simulate_batch, simulate_match_json, BatchSummary, GoalRecord, MatchRequest,
    MatchResponse, RefereeMode,
};
pub use engine::{EngineConfig, Match, MatchPhase, TeamSide, Verdict};
pub use error::{ConfigError, MatchError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
