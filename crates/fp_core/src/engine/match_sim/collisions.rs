//! Ball contact tracking.
//!
//! Overlap is polled every tick; only the tick an entity starts touching
//! the ball produces a `CollisionStart` event.

use std::collections::BTreeSet;

use crate::engine::events::MatchEvent;
use crate::engine::geometry::{circle_box_contact, Aabb, Vec2};
use crate::engine::types::EntityId;

#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    touching: BTreeSet<EntityId>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare this tick's overlaps with the last. Returns start events in
    /// the order the colliders were given.
    pub fn update<'a>(
        &mut self,
        ball: Vec2,
        radius: f32,
        colliders: impl IntoIterator<Item = (EntityId, &'a Aabb)>,
    ) -> Vec<MatchEvent> {
        let mut now = BTreeSet::new();
        let mut started = Vec::new();
        for (id, aabb) in colliders {
            if circle_box_contact(ball, radius, aabb).is_none() {
                continue;
            }
            if !self.touching.contains(&id) {
                started.push(MatchEvent::CollisionStart { a: EntityId::Ball, b: id });
            }
            now.insert(id);
        }
        self.touching = now;
        started
    }

    pub fn is_touching(&self, id: EntityId) -> bool {
        self.touching.contains(&id)
    }

    pub fn clear(&mut self) {
        self.touching.clear();
    }
}
