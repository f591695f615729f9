//! Referee agent.
//!
//! Driven by an operator (or the autopilot) through `InputState`. Every
//! dirty trick raises a hidden suspicion score that decides the end-of-match
//! verdict. Actions share a single lock: while one plays out the referee
//! can't move or start another, except the whistle which cuts in.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{Agent, DecisionContext};
use super::{Intent, KickRequest, PunchRequest, WorldView};
use crate::engine::animation::{AnimationName, Animator};
use crate::engine::body::MovingBody;
use crate::engine::config::RefereeConfig;
use crate::engine::direction_queue::DirectionQueue;
use crate::engine::geometry::{distance, normalize_or_zero, Vec2};
use crate::engine::input::Control;
use crate::engine::match_sim::MatchPhase;
use crate::engine::types::{EntityId, Role};
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefereeAction {
    Punch,
    Whistle,
    Kick,
    GiveMoney,
}

impl RefereeAction {
    /// The lock clears when this clip loops.
    pub fn clip(self) -> AnimationName {
        match self {
            RefereeAction::Punch => AnimationName::Punch,
            RefereeAction::Whistle => AnimationName::Whistle,
            RefereeAction::Kick => AnimationName::Kick,
            RefereeAction::GiveMoney => AnimationName::GiveMoney,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PunchOutcome {
    /// Another action is playing.
    Locked,
    /// Swung at nobody.
    Whiff,
    Landed(PunchRequest),
}

#[derive(Debug, Clone)]
pub struct Referee {
    body: MovingBody,
    queue: DirectionQueue,
    action: Option<RefereeAction>,
    suspicion: u32,
    config: RefereeConfig,
    bribe_radius: f32,
    start_position: Vec2,
    debug: bool,
}

impl Referee {
    pub fn new(position: Vec2, config: &RefereeConfig, bribe_radius: f32, animator: Animator, debug: bool) -> Self {
        Self {
            body: MovingBody::new(position, animator),
            queue: DirectionQueue::new(),
            action: None,
            suspicion: 0,
            config: *config,
            bribe_radius,
            start_position: position,
            debug,
        }
    }

    pub fn suspicion(&self) -> u32 {
        self.suspicion
    }

    pub fn reset_suspicion(&mut self) {
        self.suspicion = 0;
    }

    pub fn action(&self) -> Option<RefereeAction> {
        self.action
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    fn lock(&mut self, action: RefereeAction) -> Result<(), ConfigError> {
        self.action = Some(action);
        self.body.stop();
        self.body.restart_animation(action.clip())
    }

    /// Hit the single nearest player-type agent in reach.
    pub fn punch(&mut self, world: &WorldView) -> Result<PunchOutcome, ConfigError> {
        if self.action.is_some() {
            return Ok(PunchOutcome::Locked);
        }
        self.lock(RefereeAction::Punch)?;

        let me = self.body.position;
        let nearest = world
            .agents
            .iter()
            .filter(|a| a.role != Role::Referee)
            .map(|a| (distance(me, a.position), a))
            .filter(|(d, _)| *d < self.config.punch_radius)
            .min_by(|(da, a), (db, b)| da.total_cmp(db).then(a.id.cmp(&b.id)));

        let Some((_, target)) = nearest else {
            debug!("referee punches the air");
            return Ok(PunchOutcome::Whiff);
        };

        self.suspicion += self.config.punch_suspicion;
        debug!(target = %target.id, suspicion = self.suspicion, "referee punch");
        Ok(PunchOutcome::Landed(PunchRequest { target: target.id, direction: normalize_or_zero(target.position - me) }))
    }

    /// Returns true if the whistle sounded. Only a repeat whistle is refused.
    pub fn blow_whistle(&mut self, reset: bool, phase: MatchPhase) -> Result<bool, ConfigError> {
        if self.action == Some(RefereeAction::Whistle) {
            return Ok(false);
        }
        self.lock(RefereeAction::Whistle)?;
        if reset && phase == MatchPhase::Playing {
            self.suspicion += self.config.whistle_suspicion;
            debug!(suspicion = self.suspicion, "referee whistles play dead");
        }
        Ok(true)
    }

    /// Kick the ball on contact, if free to.
    pub fn kick_request(&self, ball: Vec2) -> Option<KickRequest> {
        if self.action.is_some() {
            return None;
        }
        let impulse = normalize_or_zero(ball - self.body.position) * self.config.kick_power;
        Some(KickRequest { impulse, force: false })
    }

    fn give_money(&mut self) -> Result<bool, ConfigError> {
        if self.action.is_some() {
            return Ok(false);
        }
        self.lock(RefereeAction::GiveMoney)?;
        self.suspicion += self.config.bribe_suspicion;
        debug!(suspicion = self.suspicion, "referee pays the ice-cream truck");
        Ok(true)
    }

    fn truck_in_reach(&self, world: &WorldView) -> bool {
        world
            .truck
            .map(|t| t.has_ice_cream && self.body.distance_to(t.position) < self.bribe_radius)
            .unwrap_or(false)
    }
}

impl Agent for Referee {
    fn entity(&self) -> EntityId {
        EntityId::Referee
    }

    fn role(&self) -> Role {
        Role::Referee
    }

    fn body(&self) -> &MovingBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MovingBody {
        &mut self.body
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Result<Intent, ConfigError> {
        if let Some(clip) = self.body.advance_animation(ctx.dt_ms)? {
            if self.action.map(RefereeAction::clip) == Some(clip) {
                self.action = None;
            }
        }
        self.queue.update(ctx.input);

        let mut intent = Intent::none();
        if ctx.input.was_pressed(Control::Context) {
            if self.truck_in_reach(ctx.world) {
                intent.bribe = self.give_money()?;
            } else if let PunchOutcome::Landed(punch) = self.punch(ctx.world)? {
                intent.punch = Some(punch);
            }
        }
        if ctx.input.was_pressed(Control::Whistle) && self.blow_whistle(true, ctx.world.phase)? {
            intent.whistle = Some(true);
        }

        if self.action.is_none() {
            self.body.velocity = self.queue.velocity(self.config.move_speed);
            self.body.face_velocity();
            let clip = if self.body.velocity.norm_squared() > 0.0 { AnimationName::Run } else { AnimationName::Idle };
            self.body.set_animation(clip)?;
        } else {
            self.body.stop();
        }
        Ok(intent)
    }

    fn kick_resolved(&mut self, request: KickRequest, accepted: bool) -> Result<(), ConfigError> {
        if !accepted {
            return Ok(());
        }
        self.lock(RefereeAction::Kick)?;
        self.body.face_toward(request.impulse.x);
        self.suspicion += self.config.kick_suspicion;
        debug!(suspicion = self.suspicion, "referee kicks the ball");
        Ok(())
    }

    fn on_start(&mut self) {
        if self.debug {
            debug!(suspicion = self.suspicion, "referee ready");
        }
    }
}
