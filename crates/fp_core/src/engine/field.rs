//! Field, zones and nets.
//!
//! - The field box is fixed for a match; zones are its lateral thirds.
//! - Home defends the left net, away the right.
//! - Each net has three post colliders and a goal-line collider set a little
//!   inside the mouth so that a ball grazing the front doesn't score.

use serde::{Deserialize, Serialize};

use super::config::FieldConfig;
use super::geometry::{vec2, Aabb, Vec2};
use super::physics_constants::{field as field_consts, net as net_consts};
use super::types::{Role, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneId {
    Left,
    Mid,
    Right,
}

impl ZoneId {
    pub const ALL: [ZoneId; field_consts::ZONE_COUNT] = [ZoneId::Left, ZoneId::Mid, ZoneId::Right];

    fn index(self) -> usize {
        match self {
            ZoneId::Left => 0,
            ZoneId::Mid => 1,
            ZoneId::Right => 2,
        }
    }

    /// Zone a role is assigned to. Defenders guard their own third,
    /// forwards the attacking third, everyone else the middle.
    pub fn for_role(team: TeamSide, role: Role) -> ZoneId {
        let (own, attacking) = match team {
            TeamSide::Home => (ZoneId::Left, ZoneId::Right),
            TeamSide::Away => (ZoneId::Right, ZoneId::Left),
        };
        match role {
            Role::Defender => own,
            Role::Forward => attacking,
            _ => ZoneId::Mid,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub bounds: Aabb,
    pub walls: Aabb,
    zones: [Aabb; field_consts::ZONE_COUNT],
}

impl Field {
    pub fn new(cfg: &FieldConfig) -> Self {
        let bounds = Aabb::new(cfg.left, cfg.top, cfg.right, cfg.bottom);
        let walls = Aabb::new(
            cfg.left - cfg.wall_margin,
            cfg.top - cfg.wall_margin,
            cfg.right + cfg.wall_margin,
            cfg.bottom + cfg.wall_margin,
        );
        let third = bounds.width() / field_consts::ZONE_COUNT as f32;
        let zone = |i: usize| {
            Aabb::new(
                bounds.left + third * i as f32,
                bounds.top,
                bounds.left + third * (i + 1) as f32,
                bounds.bottom,
            )
        };
        Self { bounds, walls, zones: [zone(0), zone(1), zone(2)] }
    }

    pub fn zone(&self, id: ZoneId) -> Aabb {
        self.zones[id.index()]
    }

    pub fn center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// Kickoff spot: the field center snapped to whole units.
    pub fn kickoff_spot(&self) -> Vec2 {
        let c = self.center();
        vec2(c.x.round(), c.y.round())
    }
}

impl Default for Field {
    fn default() -> Self {
        Self::new(&FieldConfig::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Net {
    pub owner: TeamSide,
    /// Field edge x the net opens onto
    pub front_x: f32,
    /// Back of the net
    pub back_x: f32,
    pub mouth_top: f32,
    pub mouth_bottom: f32,
    pub goal_line: Aabb,
    pub posts: [Aabb; 3],
}

impl Net {
    pub fn new(owner: TeamSide, field: &Field) -> Self {
        let center_y = field.center().y;
        let mouth_top = center_y - net_consts::MOUTH_HALF_HEIGHT;
        let mouth_bottom = center_y + net_consts::MOUTH_HALF_HEIGHT;

        // Direction from the field edge into the net.
        let (front_x, into) = match owner {
            TeamSide::Home => (field.bounds.left, -1.0),
            TeamSide::Away => (field.bounds.right, 1.0),
        };
        let back_x = front_x + into * net_consts::DEPTH;
        let line_x = front_x + into * net_consts::GOAL_LINE_INSET;
        let goal_line = Aabb::new(
            line_x,
            mouth_top + net_consts::GOAL_LINE_TOP_INSET,
            line_x,
            mouth_bottom - net_consts::GOAL_LINE_BOTTOM_INSET,
        );

        let half = net_consts::POST_THICKNESS / 2.0;
        let (near, far) = (front_x.min(back_x), front_x.max(back_x));
        let posts = [
            Aabb::new(near, mouth_top - half, far, mouth_top + half),
            Aabb::new(near, mouth_bottom - half, far, mouth_bottom + half),
            Aabb::new(back_x - half, mouth_top, back_x + half, mouth_bottom),
        ];

        Self { owner, front_x, back_x, mouth_top, mouth_bottom, goal_line, posts }
    }

    pub fn mouth_center_y(&self) -> f32 {
        (self.mouth_top + self.mouth_bottom) / 2.0
    }

    pub fn goal_line_x(&self) -> f32 {
        self.goal_line.left
    }

    /// Where attackers aim.
    pub fn shot_position(&self) -> Vec2 {
        vec2(self.goal_line_x(), self.mouth_center_y())
    }

    /// True when `x` lies beyond this net's front edge.
    pub fn is_past_front(&self, x: f32) -> bool {
        match self.owner {
            TeamSide::Home => x < self.front_x,
            TeamSide::Away => x > self.front_x,
        }
    }

    /// Point in front of the net used to knock a trapped ball back out.
    pub fn kick_out_target(&self) -> Vec2 {
        let out = -self.owner_into_dir();
        vec2(self.front_x + out * net_consts::KICK_OUT_DISTANCE, self.mouth_center_y())
    }

    pub fn contains_y(&self, y: f32) -> bool {
        y >= self.mouth_top && y <= self.mouth_bottom
    }

    fn owner_into_dir(&self) -> f32 {
        match self.owner {
            TeamSide::Home => -1.0,
            TeamSide::Away => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zones_are_offset_thirds() {
        let field = Field::default();
        let left = field.zone(ZoneId::Left);
        let right = field.zone(ZoneId::Right);
        assert_eq!(left.left, 38.0);
        assert!((right.right - 825.0).abs() < 1e-3);
        assert!((field.zone(ZoneId::Mid).left - (38.0 + 787.0 / 3.0)).abs() < 1e-3);
    }

    #[test]
    fn test_role_zones() {
        assert_eq!(ZoneId::for_role(TeamSide::Home, Role::Defender), ZoneId::Left);
        assert_eq!(ZoneId::for_role(TeamSide::Away, Role::Defender), ZoneId::Right);
        assert_eq!(ZoneId::for_role(TeamSide::Home, Role::Forward), ZoneId::Right);
        assert_eq!(ZoneId::for_role(TeamSide::Away, Role::Midfielder), ZoneId::Mid);
    }

    #[test]
    fn test_kickoff_spot() {
        assert_eq!(Field::default().kickoff_spot(), vec2(432.0, 174.0));
    }

    #[test]
    fn test_net_geometry() {
        let field = Field::default();
        let home = Net::new(TeamSide::Home, &field);
        let away = Net::new(TeamSide::Away, &field);

        assert_eq!(home.goal_line_x(), 26.0);
        assert_eq!(away.goal_line_x(), 837.0);
        assert_eq!(away.shot_position(), vec2(837.0, 173.5));
        assert_eq!(home.back_x, 6.0);
        assert!(home.goal_line.top > home.mouth_top);
        assert!(home.goal_line.bottom < home.mouth_bottom);
    }

    #[test]
    fn test_past_front_and_kick_out() {
        let field = Field::default();
        let away = Net::new(TeamSide::Away, &field);
        assert!(away.is_past_front(830.0));
        assert!(!away.is_past_front(800.0));
        assert_eq!(away.kick_out_target().x, 825.0 - 48.0);

        let home = Net::new(TeamSide::Home, &field);
        assert_eq!(home.kick_out_target().x, 38.0 + 48.0);
    }
}
