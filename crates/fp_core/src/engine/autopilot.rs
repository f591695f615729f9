//! Scripted referee operator for headless runs.
//!
//! Produces one `InputFrame` per tick from the world view: trails the ball,
//! and when it favors a team, punches that team's opponents within reach.
//! It never whistles, so a match it drives only resets on goals and
//! out-of-bounds.

use super::behaviors::WorldView;
use super::direction_queue::Direction;
use super::geometry::{distance, Vec2};
use super::input::{Control, InputFrame, InputState};
use super::types::{Role, TeamSide};

/// Gap kept above the ball so the referee doesn't block play
const TRAIL_OFFSET_Y: f32 = -40.0;
/// No steering within this distance of the trail point on an axis
const DEAD_ZONE: f32 = 6.0;
/// Only swing at targets this close (inside the referee's punch reach)
const PUNCH_REACH: f32 = 20.0;
const PUNCH_COOLDOWN_MS: f32 = 1500.0;

#[derive(Debug, Clone, Default)]
pub struct RefereeAutopilot {
    favored: Option<TeamSide>,
    frame: InputFrame,
    punch_cooldown_ms: f32,
}

impl RefereeAutopilot {
    pub fn new(favored: Option<TeamSide>) -> Self {
        Self { favored, frame: InputFrame::new(), punch_cooldown_ms: 0.0 }
    }

    pub fn favored(&self) -> Option<TeamSide> {
        self.favored
    }

    /// Controls for the coming tick.
    pub fn next_frame(&mut self, world: &WorldView, dt_ms: f32) -> &InputFrame {
        let mut frame = self.frame.next();
        self.punch_cooldown_ms = (self.punch_cooldown_ms - dt_ms).max(0.0);

        let wanted = match world.referee_position() {
            Some(referee) => {
                let target = world.ball.position + Vec2::new(0.0, TRAIL_OFFSET_Y);
                wanted_directions(referee, target)
            }
            None => Vec::new(),
        };
        for dir in Direction::ALL {
            let control = dir.control();
            let want = wanted.contains(&dir);
            if want && !frame.is_held(control) {
                frame.press(control);
            } else if !want && frame.is_held(control) {
                frame.release(control);
            }
        }

        if self.punch_cooldown_ms <= 0.0 && self.has_target(world) {
            frame.press(Control::Context).release(Control::Context);
            self.punch_cooldown_ms = PUNCH_COOLDOWN_MS;
        }

        self.frame = frame;
        &self.frame
    }

    fn has_target(&self, world: &WorldView) -> bool {
        let (Some(favored), Some(referee)) = (self.favored, world.referee_position()) else {
            return false;
        };
        let victim = favored.opposite();
        world
            .agents
            .iter()
            .filter(|a| a.role != Role::Referee && a.team == Some(victim))
            .any(|a| distance(a.position, referee) < PUNCH_REACH)
    }
}

fn wanted_directions(from: Vec2, to: Vec2) -> Vec<Direction> {
    let mut dirs = Vec::with_capacity(2);
    let d = to - from;
    if d.x > DEAD_ZONE {
        dirs.push(Direction::Right);
    } else if d.x < -DEAD_ZONE {
        dirs.push(Direction::Left);
    }
    if d.y > DEAD_ZONE {
        dirs.push(Direction::Down);
    } else if d.y < -DEAD_ZONE {
        dirs.push(Direction::Up);
    }
    dirs
}
