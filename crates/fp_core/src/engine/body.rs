//! Moving body shared by every agent: position, velocity, facing, the
//! animator and the pain/knockback state.

use super::animation::{AnimationName, Animator};
use super::geometry::{normalize_or_zero, Aabb, Vec2};
use super::physics_constants::body;
use super::steering::seek_until;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct MovingBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing_left: bool,
    animator: Animator,
    pain_loops_left: u32,
}

impl MovingBody {
    pub fn new(position: Vec2, animator: Animator) -> Self {
        Self { position, velocity: Vec2::zeros(), facing_left: false, animator, pain_loops_left: 0 }
    }

    /// Feet box under the sprite anchor.
    pub fn collider(&self) -> Aabb {
        Aabb::new(
            self.position.x - body::HALF_WIDTH,
            self.position.y,
            self.position.x + body::HALF_WIDTH,
            self.position.y + body::HEIGHT,
        )
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        (point - self.position).norm()
    }

    /// Head for `target` at `speed`; zero velocity once within reach.
    pub fn move_to(&mut self, target: Vec2, speed: f32) {
        self.velocity = seek_until(self.position, target, speed, body::ARRIVE_EPSILON);
    }

    pub fn stop(&mut self) {
        self.velocity = Vec2::zeros();
    }

    pub fn integrate(&mut self, dt_ms: f32) {
        self.position += self.velocity * (dt_ms / 1000.0);
    }

    pub fn keep_inside(&mut self, walls: &Aabb) {
        self.position = walls.clamp_point(self.position);
    }

    pub fn animation(&self) -> AnimationName {
        self.animator.current()
    }

    pub fn set_animation(&mut self, name: AnimationName) -> Result<(), ConfigError> {
        self.animator.set(name)
    }

    pub fn restart_animation(&mut self, name: AnimationName) -> Result<(), ConfigError> {
        self.animator.restart(name)
    }

    /// Advance the animator. Returns the clip that completed a loop, if any.
    /// Finishing the last pain loop ends the pain state.
    pub fn advance_animation(&mut self, dt_ms: f32) -> Result<Option<AnimationName>, ConfigError> {
        let clip = self.animator.current();
        let loops = self.animator.advance(dt_ms);
        if loops == 0 {
            return Ok(None);
        }
        if clip == AnimationName::Pain && self.pain_loops_left > 0 {
            self.pain_loops_left = self.pain_loops_left.saturating_sub(loops);
            if self.pain_loops_left == 0 {
                self.animator.set(AnimationName::Idle)?;
            }
        }
        Ok(Some(clip))
    }

    /// Knock the body back along `direction` and enter pain.
    pub fn hit(&mut self, direction: Vec2, knockback_power: f32, pain_loops: u32) -> Result<(), ConfigError> {
        self.animator.restart(AnimationName::Pain)?;
        self.velocity = normalize_or_zero(direction) * knockback_power;
        self.pain_loops_left = pain_loops.max(1);
        Ok(())
    }

    pub fn is_in_pain(&self) -> bool {
        self.pain_loops_left > 0
    }

    pub fn clear_pain(&mut self) {
        self.pain_loops_left = 0;
    }

    pub fn decay_velocity(&mut self, factor: f32) {
        self.velocity *= factor;
    }

    /// Flip toward the horizontal velocity; keep the old facing when still.
    pub fn face_velocity(&mut self) {
        self.face_toward(self.velocity.x);
    }

    pub fn face_toward(&mut self, dx: f32) {
        if dx != 0.0 {
            self.facing_left = dx < 0.0;
        }
    }
}
