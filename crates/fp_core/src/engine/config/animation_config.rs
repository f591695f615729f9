//! Clip sets per agent kind.
//!
//! Loop durations drive the kick-commit window, pain recovery and the
//! referee's action lock, so they are gameplay data rather than cosmetics.

use serde::{Deserialize, Serialize};

use crate::engine::animation::{AnimationName, ClipSet};

use AnimationName::*;

/// Clips every team player needs.
pub const TEAM_PLAYER_CLIPS: &[AnimationName] = &[Idle, Run, Pain, Kick];

/// Clips every goalie needs.
pub const GOALIE_CLIPS: &[AnimationName] = &[Idle, Run, Pain, Kick, BlockUp, BlockDown, HeartEyes];

/// Clips the referee needs.
pub const REFEREE_CLIPS: &[AnimationName] = &[Idle, Run, Kick, Punch, Whistle, GiveMoney];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationLibrary {
    pub team_player: ClipSet,
    pub goalie: ClipSet,
    pub referee: ClipSet,
}

impl Default for AnimationLibrary {
    fn default() -> Self {
        Self {
            team_player: ClipSet::from_pairs(&[
                (Idle, 600.0),
                (Run, 400.0),
                (Pain, 300.0),
                (Kick, 300.0),
            ]),
            goalie: ClipSet::from_pairs(&[
                (Idle, 600.0),
                (Run, 400.0),
                (Pain, 300.0),
                (Kick, 300.0),
                (Slide, 400.0),
                (BlockUp, 400.0),
                (BlockDown, 400.0),
                (HeartEyes, 800.0),
            ]),
            referee: ClipSet::from_pairs(&[
                (Idle, 600.0),
                (Run, 400.0),
                (Kick, 300.0),
                (Punch, 300.0),
                (Whistle, 600.0),
                (GiveMoney, 600.0),
                (RedCard, 600.0),
                (DropItem, 400.0),
            ]),
        }
    }
}
