//! Ball physics
//!
//! This module contains:
//! - Ball state (position, velocity, kick throttle, controllability)
//! - The per-tick friction / clamp / integrate step
//! - Bounce resolution against walls and net posts
//! - The reset walk back to the kickoff spot

use serde::{Deserialize, Serialize};

use super::config::BallConfig;
use super::geometry::{circle_box_contact, Aabb, Vec2};
use super::steering::step_toward;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    kick_cooldown_ms: f32,
    controllable: bool,
    params: BallConfig,
}

impl Ball {
    pub fn new(position: Vec2, params: BallConfig) -> Self {
        Self { position, velocity: Vec2::zeros(), kick_cooldown_ms: 0.0, controllable: true, params }
    }

    pub fn radius(&self) -> f32 {
        self.params.radius
    }

    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    pub fn kick_cooldown_ms(&self) -> f32 {
        self.kick_cooldown_ms
    }

    pub fn is_controllable(&self) -> bool {
        self.controllable
    }

    pub fn set_controllable(&mut self, controllable: bool) {
        self.controllable = controllable;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::from_center(self.position, self.params.radius, self.params.radius)
    }

    /// Add an impulse. Rejected while throttled unless `force`, and always
    /// while the ball is being walked back for a kickoff.
    pub fn kick(&mut self, impulse: Vec2, force: bool) -> bool {
        if !self.controllable {
            return false;
        }
        if !force && self.kick_cooldown_ms > 0.0 {
            return false;
        }
        self.kick_cooldown_ms = self.params.kick_throttle_ms;
        self.velocity.x += impulse.x;
        self.velocity.y += impulse.y * self.params.perspective_y_scale;
        true
    }

    /// Friction, per-axis clamp and throttle countdown.
    pub fn update(&mut self, dt_ms: f32) {
        self.velocity *= 1.0 - self.params.friction;
        self.clamp_velocity();
        self.kick_cooldown_ms = (self.kick_cooldown_ms - dt_ms).max(0.0);
    }

    /// Per-axis speed limit.
    pub fn clamp_velocity(&mut self) {
        let max = self.params.max_speed;
        self.velocity.x = self.velocity.x.clamp(-max, max);
        self.velocity.y = self.velocity.y.clamp(-max, max);
    }

    pub fn integrate(&mut self, dt_ms: f32) {
        self.position += self.velocity * (dt_ms / 1000.0);
    }

    /// Keep the ball inside `walls`, reflecting the penetrating component.
    /// Returns true if any wall was hit.
    pub fn bounce_inside(&mut self, walls: &Aabb) -> bool {
        let r = self.params.radius;
        let b = self.params.bounciness;
        let mut hit = false;

        if self.position.x - r < walls.left {
            self.position.x = walls.left + r;
            if self.velocity.x < 0.0 {
                self.velocity.x = -self.velocity.x * b;
            }
            hit = true;
        } else if self.position.x + r > walls.right {
            self.position.x = walls.right - r;
            if self.velocity.x > 0.0 {
                self.velocity.x = -self.velocity.x * b;
            }
            hit = true;
        }

        if self.position.y - r < walls.top {
            self.position.y = walls.top + r;
            if self.velocity.y < 0.0 {
                self.velocity.y = -self.velocity.y * b;
            }
            hit = true;
        } else if self.position.y + r > walls.bottom {
            self.position.y = walls.bottom - r;
            if self.velocity.y > 0.0 {
                self.velocity.y = -self.velocity.y * b;
            }
            hit = true;
        }

        hit
    }

    /// Bounce off a solid box (net post). Returns true on contact.
    pub fn bounce_off(&mut self, obstacle: &Aabb) -> bool {
        let Some(contact) = circle_box_contact(self.position, self.params.radius, obstacle) else {
            return false;
        };
        self.position += contact.normal * contact.depth;
        let into = self.velocity.dot(&contact.normal);
        if into < 0.0 {
            self.velocity -= contact.normal * (into * (1.0 + self.params.bounciness));
        }
        true
    }

    /// Send the ball straight back along its path (blocking goalie).
    pub fn reflect(&mut self) {
        self.velocity = -self.velocity;
    }

    /// Walk toward the kickoff spot ignoring friction. Returns true on arrival.
    pub fn walk_toward(&mut self, target: Vec2, speed: f32, dt_ms: f32) -> bool {
        let (position, arrived) = step_toward(self.position, target, speed, dt_ms);
        self.position = position;
        self.velocity = Vec2::zeros();
        arrived
    }

    /// Put the ball at rest at `position`.
    pub fn place(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::zeros();
    }

    /// Drop any pending throttle (test and scenario setup).
    pub fn clear_cooldown(&mut self) {
        self.kick_cooldown_ms = 0.0;
    }
}
