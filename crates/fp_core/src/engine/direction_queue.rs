//! Held-direction queue for the referee's movement keys.
//!
//! The most recently pressed direction that is still held is the active
//! one. Velocity resolves both axes independently so diagonals work.

use serde::{Deserialize, Serialize};

use super::geometry::{vec2, Vec2};
use super::input::{Control, InputState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Left, Direction::Right, Direction::Up, Direction::Down];

    pub fn control(self) -> Control {
        match self {
            Direction::Left => Control::Left,
            Direction::Right => Control::Right,
            Direction::Up => Control::Up,
            Direction::Down => Control::Down,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DirectionQueue {
    held: Vec<Direction>,
}

impl DirectionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Active direction: the front of the queue.
    pub fn direction(&self) -> Option<Direction> {
        self.held.first().copied()
    }

    pub fn is_held(&self, dir: Direction) -> bool {
        self.held.contains(&dir)
    }

    /// Push to the front unless already held.
    pub fn add(&mut self, dir: Direction) {
        if !self.is_held(dir) {
            self.held.insert(0, dir);
        }
    }

    pub fn remove(&mut self, dir: Direction) {
        self.held.retain(|d| *d != dir);
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }

    pub fn update(&mut self, input: &(impl InputState + ?Sized)) {
        for dir in Direction::ALL {
            if input.was_pressed(dir.control()) {
                self.add(dir);
            }
            if input.was_released(dir.control()) {
                self.remove(dir);
            }
        }
    }

    /// Right wins over left, down over up.
    pub fn velocity(&self, speed: f32) -> Vec2 {
        let x = if self.is_held(Direction::Right) {
            speed
        } else if self.is_held(Direction::Left) {
            -speed
        } else {
            0.0
        };
        let y = if self.is_held(Direction::Down) {
            speed
        } else if self.is_held(Direction::Up) {
            -speed
        } else {
            0.0
        };
        vec2(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::InputFrame;

    #[test]
    fn test_latest_press_is_active() {
        let mut q = DirectionQueue::new();
        q.add(Direction::Left);
        q.add(Direction::Up);
        assert_eq!(q.direction(), Some(Direction::Up));
        q.remove(Direction::Up);
        assert_eq!(q.direction(), Some(Direction::Left));
    }

    #[test]
    fn test_repeat_press_keeps_position() {
        let mut q = DirectionQueue::new();
        q.add(Direction::Left);
        q.add(Direction::Down);
        q.add(Direction::Left);
        assert_eq!(q.direction(), Some(Direction::Down));
    }

    #[test]
    fn test_diagonal_velocity() {
        let mut q = DirectionQueue::new();
        q.add(Direction::Right);
        q.add(Direction::Up);
        assert_eq!(q.velocity(125.0), vec2(125.0, -125.0));

        q.add(Direction::Left);
        q.add(Direction::Down);
        assert_eq!(q.velocity(125.0), vec2(125.0, 125.0));
    }

    #[test]
    fn test_update_from_input() {
        let mut q = DirectionQueue::new();
        let mut frame = InputFrame::new();
        frame.press(Control::Left).press(Control::Whistle);
        q.update(&frame);
        assert_eq!(q.direction(), Some(Direction::Left));

        let mut next = frame.next();
        next.release(Control::Left);
        q.update(&next);
        assert_eq!(q.direction(), None);
    }
}
