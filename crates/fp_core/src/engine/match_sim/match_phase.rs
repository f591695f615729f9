//! Match phase machine.
//!
//! Idle → Playing → GoalScored → Resetting → Playing … → GameOver

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    /// Before the first whistle
    #[default]
    Idle,
    Playing,
    /// Transient: between the goal event and the reset it triggers
    GoalScored,
    /// Ball walking back to the kickoff spot
    Resetting,
    GameOver,
}

impl MatchPhase {
    /// Goals only count while the ball is live.
    pub fn is_live(self) -> bool {
        self == MatchPhase::Playing
    }

    /// A whistle in these phases starts the match instead of resetting it.
    pub fn whistle_starts(self) -> bool {
        matches!(self, MatchPhase::Idle | MatchPhase::GameOver)
    }
}

/// Phase after the ball reaches the kickoff spot.
pub fn phase_after_reset(game_over: bool, game_has_started: bool) -> MatchPhase {
    if game_over {
        MatchPhase::GameOver
    } else if game_has_started {
        MatchPhase::Playing
    } else {
        MatchPhase::Idle
    }
}
