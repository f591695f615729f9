//! Identity types shared across the engine.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Home defends the left net, away the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    Home,
    Away,
}

impl TeamSide {
    pub const ALL: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    pub fn opposite(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// +1 when attacking toward +x.
    pub fn attack_dir(self) -> f32 {
        match self {
            TeamSide::Home => 1.0,
            TeamSide::Away => -1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeamSide::Home => "home",
            TeamSide::Away => "away",
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behavior selector for every agent on the pitch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Defender,
    Midfielder,
    Forward,
    Goalie,
    Referee,
}

impl Role {
    /// Outfield roles that run the team-player decision tree.
    pub fn is_outfield(self) -> bool {
        matches!(self, Role::Defender | Role::Midfielder | Role::Forward)
    }

    /// Defenders never chase outside their zone.
    pub fn can_leave_zone(self) -> bool {
        matches!(self, Role::Midfielder | Role::Forward)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Defender => "defender",
            Role::Midfielder => "midfielder",
            Role::Forward => "forward",
            Role::Goalie => "goalie",
            Role::Referee => "referee",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable identity of a team player. Ordering is used for tie-breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId {
    pub team: TeamSide,
    pub index: u8,
}

impl PlayerId {
    pub fn new(team: TeamSide, index: u8) -> Self {
        Self { team, index }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.team, self.index)
    }
}

/// Anything that can collide, own a scheduled continuation or be targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntityId {
    Ball,
    Player { id: PlayerId },
    Goalie { team: TeamSide },
    Referee,
    Truck,
    GoalLine { team: TeamSide },
}

impl EntityId {
    pub fn player(id: PlayerId) -> Self {
        EntityId::Player { id }
    }

    pub fn goalie(team: TeamSide) -> Self {
        EntityId::Goalie { team }
    }

    /// Team of a player-type entity.
    pub fn team(self) -> Option<TeamSide> {
        match self {
            EntityId::Player { id } => Some(id.team),
            EntityId::Goalie { team } => Some(team),
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Ball => f.write_str("ball"),
            EntityId::Player { id } => write!(f, "player {id}"),
            EntityId::Goalie { team } => write!(f, "{team} goalie"),
            EntityId::Referee => f.write_str("referee"),
            EntityId::Truck => f.write_str("ice-cream truck"),
            EntityId::GoalLine { team } => write!(f, "{team} goal line"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_side_basics() {
        assert_eq!(TeamSide::Home.opposite(), TeamSide::Away);
        assert_eq!(TeamSide::Away.attack_dir(), -1.0);
        assert!(TeamSide::Home < TeamSide::Away);
    }

    #[test]
    fn test_role_zone_rules() {
        assert!(!Role::Defender.can_leave_zone());
        assert!(Role::Forward.can_leave_zone());
        assert!(!Role::Goalie.is_outfield());
    }

    #[test]
    fn test_player_id_ordering() {
        let a = PlayerId::new(TeamSide::Home, 0);
        let b = PlayerId::new(TeamSide::Home, 3);
        assert!(a < b);
        assert_eq!(EntityId::player(b).team(), Some(TeamSide::Home));
        assert_eq!(EntityId::Referee.team(), None);
    }

    #[test]
    fn test_entity_id_serde() {
        let json = serde_json::to_string(&EntityId::goalie(TeamSide::Away)).unwrap();
        assert_eq!(json, r#"{"kind":"goalie","team":"away"}"#);
    }
}
