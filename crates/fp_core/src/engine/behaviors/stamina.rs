//! Sprint economy.
//!
//! Sprinting drains stamina faster than resting refills it. A sprint can
//! only start from a full tank and is forced off when the tank runs dry.

use serde::{Deserialize, Serialize};

use crate::engine::config::TeamPlayerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stamina {
    current: f32,
    max: f32,
    is_sprinting: bool,
    /// Per ms, already scaled by move speed
    regen_rate: f32,
    depletion_rate: f32,
}

impl Stamina {
    pub fn new(max: f32, initial: f32, move_speed: f32, cfg: &TeamPlayerConfig) -> Self {
        let scale = move_speed / 100.0;
        Self {
            current: initial.clamp(0.0, max),
            max,
            is_sprinting: false,
            regen_rate: cfg.stamina_regen_rate * scale,
            depletion_rate: cfg.stamina_depletion_rate * scale,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    pub fn is_sprinting(&self) -> bool {
        self.is_sprinting
    }

    /// Start sprinting if the tank is full. Returns whether sprinting now.
    pub fn try_engage_sprint(&mut self) -> bool {
        if !self.is_sprinting && self.is_full() {
            self.is_sprinting = true;
        }
        self.is_sprinting
    }

    pub fn force_stop_sprint(&mut self) {
        self.is_sprinting = false;
    }

    pub fn tick(&mut self, dt_ms: f32) {
        if self.is_sprinting {
            self.current -= self.depletion_rate * dt_ms;
        } else {
            self.current += self.regen_rate * dt_ms;
        }
        self.current = self.current.clamp(0.0, self.max);
        if self.current <= 0.0 {
            self.is_sprinting = false;
        }
    }

    /// Chase speed multiplier.
    pub fn speed_factor(&self, cfg: &TeamPlayerConfig) -> f32 {
        if self.is_sprinting {
            cfg.sprint_speed_factor
        } else if self.current < self.max {
            cfg.recovering_speed_factor
        } else {
            1.0
        }
    }
}
