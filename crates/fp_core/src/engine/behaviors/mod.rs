//! Agent behaviors
//!
//! - `team_player`: forwards, midfielders and defenders
//! - `goalkeeper`: line keeping, slides, distraction
//! - `referee`: operator-driven agent with hidden suspicion
//! - `stamina`: sprint economy used by team players
//!
//! Agents never touch each other or the ball directly. They read a
//! `WorldView` built at the start of the tick and return an `Intent`; the
//! orchestrator applies it.

pub mod goalkeeper;
pub mod referee;
pub mod stamina;
pub mod team_player;
pub mod traits;

pub use goalkeeper::Goalie;
pub use referee::{Referee, RefereeAction};
pub use stamina::Stamina;
pub use team_player::TeamPlayer;
pub use traits::{Agent, DecisionContext};

use serde::{Deserialize, Serialize};

use super::field::{Field, Net};
use super::geometry::Vec2;
use super::match_sim::MatchPhase;
use super::types::{EntityId, Role, TeamSide};

/// Whether an agent is playing, walking back for a kickoff, or standing at
/// its start position waiting for the whistle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlMode {
    Active,
    Returning,
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KickRequest {
    pub impulse: Vec2,
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PunchRequest {
    pub target: EntityId,
    pub direction: Vec2,
}

/// Requests an agent makes of the rest of the world this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Intent {
    pub kick: Option<KickRequest>,
    pub punch: Option<PunchRequest>,
    /// Whistle blown; `true` asks for a reset.
    pub whistle: Option<bool>,
    pub bribe: bool,
}

impl Intent {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn kick(impulse: Vec2) -> Self {
        Self { kick: Some(KickRequest { impulse, force: false }), ..Self::default() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallView {
    pub position: Vec2,
    pub velocity: Vec2,
    pub controllable: bool,
}

impl BallView {
    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentView {
    pub id: EntityId,
    pub role: Role,
    pub team: Option<TeamSide>,
    pub position: Vec2,
}

impl AgentView {
    pub fn of(agent: &dyn Agent) -> Self {
        let id = agent.entity();
        Self { id, role: agent.role(), team: id.team(), position: agent.body().position }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruckView {
    pub position: Vec2,
    pub has_ice_cream: bool,
}

/// Read-only picture of the match at the start of a tick.
#[derive(Debug, Clone)]
pub struct WorldView {
    pub ball: BallView,
    pub field: Field,
    pub home_net: Net,
    pub away_net: Net,
    pub agents: Vec<AgentView>,
    pub truck: Option<TruckView>,
    pub phase: MatchPhase,
    pub elapsed_ms: f64,
}

impl WorldView {
    pub fn net(&self, team: TeamSide) -> &Net {
        match team {
            TeamSide::Home => &self.home_net,
            TeamSide::Away => &self.away_net,
        }
    }

    /// Outfield players of `team`.
    pub fn team_players(&self, team: TeamSide) -> impl Iterator<Item = &AgentView> + '_ {
        self.agents.iter().filter(move |a| a.team == Some(team) && a.role.is_outfield())
    }

    pub fn position_of(&self, id: EntityId) -> Option<Vec2> {
        if id == EntityId::Ball {
            return Some(self.ball.position);
        }
        if id == EntityId::Truck {
            return self.truck.map(|t| t.position);
        }
        self.agents.iter().find(|a| a.id == id).map(|a| a.position)
    }

    pub fn referee_position(&self) -> Option<Vec2> {
        self.position_of(EntityId::Referee)
    }
}
