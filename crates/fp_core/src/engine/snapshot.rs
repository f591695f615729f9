//! Serializable per-tick picture of the match for render collaborators.
//!
//! Carries only what a renderer needs to draw a frame: positions, facing
//! and the animation each agent should be playing. The referee's suspicion
//! is hidden until the final verdict.

use serde::{Deserialize, Serialize};

use super::animation::AnimationName;
use super::behaviors::Agent;
use super::geometry::Vec2;
use super::match_sim::MatchPhase;
use super::types::{EntityId, Role, TeamSide};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub controllable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: EntityId,
    pub role: Role,
    pub team: Option<TeamSide>,
    pub position: Vec2,
    pub velocity: Vec2,
    pub animation: AnimationName,
    pub facing_left: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamina: Option<f32>,
}

impl AgentSnapshot {
    pub fn of(agent: &dyn Agent) -> Self {
        let id = agent.entity();
        let body = agent.body();
        Self {
            id,
            role: agent.role(),
            team: id.team(),
            position: body.position,
            velocity: body.velocity,
            animation: body.animation(),
            facing_left: body.facing_left,
            stamina: agent.stamina(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruckSnapshot {
    pub position: Vec2,
    pub popped_up: bool,
    pub has_ice_cream: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchSnapshot {
    pub tick: u64,
    pub elapsed_ms: f64,
    pub phase: MatchPhase,
    pub score_home: u32,
    pub score_away: u32,
    pub last_possession: Option<TeamSide>,
    pub ball: BallSnapshot,
    pub agents: Vec<AgentSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub truck: Option<TruckSnapshot>,
}

impl MatchSnapshot {
    pub fn agent(&self, id: EntityId) -> Option<&AgentSnapshot> {
        self.agents.iter().find(|a| a.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::match_sim::test_fixtures::create_test_match;

    #[test]
    fn test_snapshot_lists_every_agent() {
        let m = create_test_match();
        let snap = m.snapshot();
        // 2 x (5 players + goalie) + referee
        assert_eq!(snap.agents.len(), 13);
        assert!(snap.agent(EntityId::Referee).is_some());
        assert!(snap.agent(EntityId::goalie(TeamSide::Away)).is_some());
        assert_eq!(snap.phase, MatchPhase::Idle);
    }

    #[test]
    fn test_snapshot_hides_suspicion() {
        let json = serde_json::to_string(&create_test_match().snapshot()).unwrap();
        assert!(!json.contains("suspicion"));
        assert!(json.contains("\"animation\":\"Idle\""));
    }

    #[test]
    fn test_only_team_players_report_stamina() {
        let snap = create_test_match().snapshot();
        for a in &snap.agents {
            assert_eq!(a.stamina.is_some(), a.role.is_outfield(), "{}", a.id);
        }
    }
}
