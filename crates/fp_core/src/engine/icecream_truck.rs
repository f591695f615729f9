//! Ice-cream truck parked above the away half.
//!
//! Pops up when the referee walks close while it has stock. Paying it lures
//! the away goalie off the line; the orchestrator schedules the end of the
//! handout and the restock.

use serde::{Deserialize, Serialize};

use super::field::Field;
use super::geometry::{distance, vec2, Aabb, Vec2};
use super::physics_constants::truck;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IceCreamTruck {
    pub position: Vec2,
    has_ice_cream: bool,
    is_giving: bool,
    popped_up: bool,
    popup_radius: f32,
}

impl IceCreamTruck {
    pub fn new(field: &Field, popup_radius: f32) -> Self {
        let position = vec2(
            field.bounds.right - truck::WIDTH / 2.0 - truck::RIGHT_OFFSET,
            field.bounds.top + truck::HEIGHT + truck::TOP_GAP,
        );
        Self { position, has_ice_cream: true, is_giving: false, popped_up: false, popup_radius }
    }

    pub fn has_ice_cream(&self) -> bool {
        self.has_ice_cream
    }

    pub fn is_giving(&self) -> bool {
        self.is_giving
    }

    pub fn is_popped_up(&self) -> bool {
        self.popped_up
    }

    /// Solid box, anchored at the bottom center.
    pub fn bounds(&self) -> Aabb {
        Aabb::new(
            self.position.x - truck::WIDTH / 2.0,
            self.position.y - truck::HEIGHT,
            self.position.x + truck::WIDTH / 2.0,
            self.position.y,
        )
    }

    /// Pop up or down for the referee. Stays up while handing out.
    /// Returns true on the tick it pops up.
    pub fn update(&mut self, referee: Vec2) -> bool {
        if self.is_giving {
            return false;
        }
        let near = distance(referee, self.position) < self.popup_radius;
        let was_up = self.popped_up;
        self.popped_up = near && self.has_ice_cream;
        self.popped_up && !was_up
    }

    /// Hand out the ice cream. False when empty or already giving.
    pub fn give(&mut self) -> bool {
        if self.is_giving || !self.has_ice_cream {
            return false;
        }
        self.is_giving = true;
        self.has_ice_cream = false;
        self.popped_up = true;
        true
    }

    pub fn finish_giving(&mut self) {
        self.is_giving = false;
        self.popped_up = false;
    }

    pub fn restock(&mut self) {
        self.has_ice_cream = true;
    }
}
