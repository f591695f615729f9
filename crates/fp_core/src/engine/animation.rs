//! Named animation clips and the per-agent animator.
//!
//! The engine never draws anything, but several behaviors are timed by clip
//! loops (kick commit, pain, referee action lock), so the animator tracks
//! loop boundaries and reports them back to the owning agent.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AnimationName {
    Idle,
    Run,
    Pain,
    Kick,
    Slide,
    BlockUp,
    BlockDown,
    HeartEyes,
    Punch,
    Whistle,
    GiveMoney,
    RedCard,
    DropItem,
}

impl AnimationName {
    pub fn as_str(self) -> &'static str {
        match self {
            AnimationName::Idle => "Idle",
            AnimationName::Run => "Run",
            AnimationName::Pain => "Pain",
            AnimationName::Kick => "Kick",
            AnimationName::Slide => "Slide",
            AnimationName::BlockUp => "BlockUp",
            AnimationName::BlockDown => "BlockDown",
            AnimationName::HeartEyes => "HeartEyes",
            AnimationName::Punch => "Punch",
            AnimationName::Whistle => "Whistle",
            AnimationName::GiveMoney => "GiveMoney",
            AnimationName::RedCard => "RedCard",
            AnimationName::DropItem => "DropItem",
        }
    }
}

impl fmt::Display for AnimationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loop durations (ms) for one sprite sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClipSet {
    pub clips: BTreeMap<AnimationName, f32>,
}

impl ClipSet {
    pub fn from_pairs(pairs: &[(AnimationName, f32)]) -> Self {
        Self { clips: pairs.iter().copied().collect() }
    }

    pub fn loop_ms(&self, name: AnimationName) -> Option<f32> {
        self.clips.get(&name).copied()
    }

    pub fn remove(&mut self, name: AnimationName) -> Option<f32> {
        self.clips.remove(&name)
    }

    /// Fails on the first required clip that is missing or has no duration.
    pub fn validate(&self, agent: &str, required: &[AnimationName]) -> Result<(), ConfigError> {
        for &animation in required {
            match self.loop_ms(animation) {
                None => {
                    return Err(ConfigError::MissingAnimation { agent: agent.to_string(), animation })
                }
                Some(ms) if ms <= 0.0 || !ms.is_finite() => {
                    return Err(ConfigError::InvalidClip { agent: agent.to_string(), animation })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }
}

/// Plays one clip at a time and reports loop boundaries.
#[derive(Debug, Clone)]
pub struct Animator {
    owner: String,
    clips: ClipSet,
    current: AnimationName,
    elapsed_ms: f32,
}

impl Animator {
    /// `required` must include `Idle`, which the animator starts on.
    pub fn new(owner: impl Into<String>, clips: ClipSet, required: &[AnimationName]) -> Result<Self, ConfigError> {
        let owner = owner.into();
        clips.validate(&owner, required)?;
        clips.validate(&owner, &[AnimationName::Idle])?;
        Ok(Self { owner, clips, current: AnimationName::Idle, elapsed_ms: 0.0 })
    }

    pub fn current(&self) -> AnimationName {
        self.current
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Switch clips. Re-selecting the playing clip keeps its phase.
    pub fn set(&mut self, name: AnimationName) -> Result<(), ConfigError> {
        if name == self.current {
            return Ok(());
        }
        self.restart(name)
    }

    /// Switch clips and always start from the first frame.
    pub fn restart(&mut self, name: AnimationName) -> Result<(), ConfigError> {
        if self.clips.loop_ms(name).is_none() {
            return Err(ConfigError::MissingAnimation { agent: self.owner.clone(), animation: name });
        }
        self.current = name;
        self.elapsed_ms = 0.0;
        Ok(())
    }

    /// Advance the current clip. Returns the number of loops completed.
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        let Some(loop_ms) = self.clips.loop_ms(self.current) else {
            return 0;
        };
        self.elapsed_ms += dt_ms;
        let mut loops = 0;
        while self.elapsed_ms >= loop_ms {
            self.elapsed_ms -= loop_ms;
            loops += 1;
        }
        loops
    }
}
