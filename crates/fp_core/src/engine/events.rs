//! Match events and the per-tick event queue.
//!
//! Collisions and rule decisions push events; the orchestrator drains the
//! queue in order once per tick. Handlers may push follow-up events, which
//! are processed in the same drain (goal before reset, possession before
//! kickoff).

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::match_sim::Verdict;
use super::types::{EntityId, TeamSide};

/// Outbound cue for the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Kick,
    Hit,
    Whistle,
    Goal,
    Bell,
    WatchOut,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MatchEvent {
    Start,
    Reset { kickoff: Option<TeamSide> },
    /// Two entities started touching this tick.
    CollisionStart { a: EntityId, b: EntityId },
    Goal { scoring: TeamSide },
    ScoreChanged { home: u32, away: u32 },
    PossessionChanged { team: TeamSide },
    BallOutOfBounds,
    Punched { target: EntityId },
    Distracted { team: TeamSide, by: EntityId },
    DistractionEnded { team: TeamSide },
    TruckRestocked,
    GameOver { winner: TeamSide, verdict: Verdict },
}

impl MatchEvent {
    /// Collision plumbing isn't interesting to report consumers.
    pub fn is_internal(&self) -> bool {
        matches!(self, MatchEvent::CollisionStart { .. })
    }
}

#[derive(Debug, Default, Clone)]
pub struct EventQueue {
    pending: VecDeque<MatchEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MatchEvent) {
        self.pending.push_back(event);
    }

    pub fn pop(&mut self) -> Option<MatchEvent> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut q = EventQueue::new();
        q.push(MatchEvent::Goal { scoring: TeamSide::Away });
        q.push(MatchEvent::Reset { kickoff: Some(TeamSide::Home) });
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(MatchEvent::Goal { scoring: TeamSide::Away }));
        assert_eq!(q.pop(), Some(MatchEvent::Reset { kickoff: Some(TeamSide::Home) }));
        assert!(q.is_empty());
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&MatchEvent::Goal { scoring: TeamSide::Home }).unwrap();
        assert_eq!(json, r#"{"type":"goal","scoring":"home"}"#);
    }

    #[test]
    fn test_internal_events() {
        let collision = MatchEvent::CollisionStart { a: EntityId::Ball, b: EntityId::Referee };
        assert!(collision.is_internal());
        assert!(!MatchEvent::BallOutOfBounds.is_internal());
    }
}
