//! Trait definitions for agent behaviors
//!
//! Every agent on the pitch is a `MovingBody` plus a role behavior. The
//! orchestrator drives them all through this interface:
//! - `decide`: read the world, steer the body, return cross-entity requests
//! - `kick_resolved`: learn whether this tick's kick request landed
//! - `on_reset` / `on_start`: kickoff hooks

use rand_chacha::ChaCha8Rng;

use super::{Intent, KickRequest, WorldView};
use crate::engine::body::MovingBody;
use crate::engine::input::InputState;
use crate::engine::types::{EntityId, Role};
use crate::error::ConfigError;

/// Everything an agent may look at while deciding.
pub struct DecisionContext<'a> {
    pub world: &'a WorldView,
    pub dt_ms: f32,
    pub rng: &'a mut ChaCha8Rng,
    /// Only the referee reads controls.
    pub input: &'a dyn InputState,
}

pub trait Agent {
    fn entity(&self) -> EntityId;

    fn role(&self) -> Role;

    fn body(&self) -> &MovingBody;

    fn body_mut(&mut self) -> &mut MovingBody;

    /// Run one tick of control logic.
    ///
    /// Errors only when a clip the behavior needs is missing, which match
    /// setup validation rules out.
    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Result<Intent, ConfigError>;

    fn kick_resolved(&mut self, _request: KickRequest, _accepted: bool) -> Result<(), ConfigError> {
        Ok(())
    }

    fn on_reset(&mut self) {}

    fn on_start(&mut self) {}

    /// Stamina for the snapshot; only team players have it.
    fn stamina(&self) -> Option<f32> {
        None
    }
}
