//! Test Fixtures Module
//!
//! Shared helpers for agent and match tests.
//!
//! ## Usage
//! ```rust,ignore
//! #[cfg(test)]
//! use crate::engine::match_sim::test_fixtures::*;
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::{Match, MatchPhase};
use crate::engine::animation::Animator;
use crate::engine::behaviors::{Agent, AgentView, BallView, WorldView};
use crate::engine::config::{EngineConfig, GOALIE_CLIPS, REFEREE_CLIPS, TEAM_PLAYER_CLIPS};
use crate::engine::field::{Field, Net};
use crate::engine::geometry::Vec2;
use crate::engine::timestep::FRAME_DT_MS;
use crate::engine::types::TeamSide;

/// Seed used by every fixture unless a test needs its own.
pub const TEST_SEED: u64 = 42;

// =============================================================================
// Config / RNG
// =============================================================================

/// Full shot power and full stamina so outcomes don't depend on rolls.
pub fn test_config() -> EngineConfig {
    EngineConfig::deterministic()
}

pub fn test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(TEST_SEED)
}

// =============================================================================
// Animators
// =============================================================================

pub fn team_player_animator(cfg: &EngineConfig) -> Animator {
    Animator::new("test player", cfg.animations.team_player.clone(), TEAM_PLAYER_CLIPS).unwrap()
}

pub fn goalie_animator(cfg: &EngineConfig) -> Animator {
    Animator::new("test goalie", cfg.animations.goalie.clone(), GOALIE_CLIPS).unwrap()
}

pub fn referee_animator(cfg: &EngineConfig) -> Animator {
    Animator::new("test referee", cfg.animations.referee.clone(), REFEREE_CLIPS).unwrap()
}

// =============================================================================
// World views
// =============================================================================

/// Live ball on the default field, no agents, no truck.
pub fn world_with_ball(position: Vec2, velocity: Vec2) -> WorldView {
    let field = Field::default();
    WorldView {
        ball: BallView { position, velocity, controllable: true },
        field,
        home_net: Net::new(TeamSide::Home, &field),
        away_net: Net::new(TeamSide::Away, &field),
        agents: Vec::new(),
        truck: None,
        phase: MatchPhase::Playing,
        elapsed_ms: 0.0,
    }
}

pub fn agent_view(agent: &impl Agent) -> AgentView {
    AgentView::of(agent)
}

// =============================================================================
// Matches
// =============================================================================

pub fn create_test_match() -> Match {
    Match::new(test_config(), TEST_SEED).unwrap()
}

pub fn create_test_match_with(config: EngineConfig) -> Match {
    Match::new(config, TEST_SEED).unwrap()
}

/// Playing, with the start event already handled.
pub fn started_match() -> Match {
    let mut m = create_test_match();
    m.start();
    m.tick(FRAME_DT_MS, &crate::engine::input::NoInput).unwrap();
    m
}

/// Put the ball somewhere with a given velocity and no kick throttle.
pub fn place_ball(m: &mut Match, position: Vec2, velocity: Vec2) {
    let ball = m.ball_mut();
    ball.place(position);
    ball.velocity = velocity;
    ball.clear_cooldown();
}

/// Tick with no referee input until `done` or `max_ticks` run out.
/// Returns the number of ticks run.
pub fn run_until(m: &mut Match, max_ticks: usize, mut done: impl FnMut(&Match) -> bool) -> usize {
    for n in 0..max_ticks {
        if done(m) {
            return n;
        }
        m.tick(FRAME_DT_MS, &crate::engine::input::NoInput).unwrap();
    }
    max_ticks
}
