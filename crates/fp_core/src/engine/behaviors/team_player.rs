//! Outfield player behavior (forward / midfielder / defender).
//!
//! Per tick, first matching branch wins:
//! 1. Pain: velocity decays, no control
//! 2. Kick commit: stand still until the Kick clip loops
//! 3. Kickoff walk / wait (after a reset)
//! 4. Chase or hold, then maybe kick

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use super::stamina::Stamina;
use super::traits::{Agent, DecisionContext};
use super::{ControlMode, Intent, KickRequest, WorldView};
use crate::engine::animation::{AnimationName, Animator};
use crate::engine::body::MovingBody;
use crate::engine::config::{RoleTemplate, TeamPlayerConfig};
use crate::engine::field::{Field, ZoneId};
use crate::engine::geometry::{distance, normalize_or_zero, vec2, Vec2};
use crate::engine::physics_constants::body;
use crate::engine::types::{EntityId, PlayerId, Role, TeamSide};
use crate::error::ConfigError;

/// Where a player sits among teammates sharing its role (and zone).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Formation {
    /// 0-based, ordered by player id
    pub rank: usize,
    pub partners: usize,
}

impl Formation {
    pub const LONE: Formation = Formation { rank: 0, partners: 1 };
}

/// Hold position for a given ball position: the zone edge nearer the ball,
/// at the formation's height.
pub fn formation_slot(field: &Field, zone: ZoneId, ball: Vec2, formation: Formation) -> Vec2 {
    let z = field.zone(zone);
    let x = if (ball.x - z.left).abs() <= (z.right - ball.x).abs() { z.left } else { z.right };
    let h = z.height();
    let y = if formation.partners <= 1 {
        ball.y.clamp(z.top + h / 3.0, z.top + h * 2.0 / 3.0)
    } else {
        z.top + h * (formation.rank + 1) as f32 / (formation.partners + 1) as f32
    };
    vec2(x, y)
}

/// Kickoff position: the hold slot for a ball on the kickoff spot, kept
/// inside the own half.
pub fn start_position(field: &Field, team: TeamSide, zone: ZoneId, formation: Formation, margin: f32) -> Vec2 {
    let slot = formation_slot(field, zone, field.kickoff_spot(), formation);
    let center_x = field.center().x;
    let x = match team {
        TeamSide::Home => slot.x.min(center_x - margin),
        TeamSide::Away => slot.x.max(center_x + margin),
    };
    vec2(x, slot.y)
}

/// Construction parameters for one roster slot.
#[derive(Debug, Clone, Copy)]
pub struct PlayerSetup {
    pub id: PlayerId,
    pub role: Role,
    pub formation: Formation,
    /// Fraction of max stamina at kickoff
    pub stamina_fraction: f32,
}

#[derive(Debug, Clone)]
pub struct TeamPlayer {
    id: PlayerId,
    role: Role,
    zone: ZoneId,
    formation: Formation,
    body: MovingBody,
    stamina: Stamina,
    template: RoleTemplate,
    config: TeamPlayerConfig,
    control: ControlMode,
    start_position: Vec2,
    is_kicking: bool,
    chase_target: Option<Vec2>,
    debug: bool,
}

impl TeamPlayer {
    pub fn new(setup: PlayerSetup, field: &Field, config: &TeamPlayerConfig, animator: Animator, debug: bool) -> Self {
        let team = setup.id.team;
        let zone = ZoneId::for_role(team, setup.role);
        let template = config.template(setup.role);
        let start = start_position(field, team, zone, setup.formation, config.start_line_margin);
        let stamina = Stamina::new(
            template.max_stamina,
            template.max_stamina * setup.stamina_fraction,
            template.move_speed,
            config,
        );

        let mut body = MovingBody::new(start, animator);
        body.facing_left = team == TeamSide::Away;

        Self {
            id: setup.id,
            role: setup.role,
            zone,
            formation: setup.formation,
            body,
            stamina,
            template,
            config: *config,
            control: ControlMode::Waiting,
            start_position: start,
            is_kicking: false,
            chase_target: None,
            debug,
        }
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn team(&self) -> TeamSide {
        self.id.team
    }

    pub fn zone(&self) -> ZoneId {
        self.zone
    }

    pub fn control(&self) -> ControlMode {
        self.control
    }

    pub fn is_kicking(&self) -> bool {
        self.is_kicking
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    pub fn stamina_state(&self) -> &Stamina {
        &self.stamina
    }

    pub fn template(&self) -> RoleTemplate {
        self.template
    }

    /// Ball position this player chased on its last decision, if it chased.
    pub fn chase_target(&self) -> Option<Vec2> {
        self.chase_target
    }

    /// Knocked back by the referee (or anything else that hurts).
    pub fn hit(&mut self, direction: Vec2) -> Result<(), ConfigError> {
        self.body.hit(direction, self.config.knockback_power, self.config.pain_loops)?;
        self.stamina.force_stop_sprint();
        self.is_kicking = false;
        self.chase_target = None;
        Ok(())
    }

    fn play(&mut self, world: &WorldView, rng: &mut ChaCha8Rng) -> Intent {
        let ball = world.ball.position;
        let dist = self.body.distance_to(ball);
        let zone = world.field.zone(self.zone);
        let speed = self.template.move_speed * self.stamina.speed_factor(&self.config);

        let chase = zone.contains_point(ball) || (self.role.can_leave_zone() && self.is_closest_teammate(world, dist));
        if chase {
            self.body.move_to(ball, speed);
            self.chase_target = Some(ball);
            if dist < self.config.sprint_engage_distance {
                self.stamina.try_engage_sprint();
            }
        } else {
            let hold = formation_slot(&world.field, self.zone, ball, self.formation);
            self.body.move_to(hold, speed);
        }

        if self.debug {
            trace!(player = %self.id, role = %self.role, chase, dist, "decide");
        }

        if dist < self.config.kick_distance {
            self.plan_kick(world, rng)
        } else {
            Intent::none()
        }
    }

    /// Rounded distances; any teammate as near or nearer rules this player out.
    fn is_closest_teammate(&self, world: &WorldView, my_distance: f32) -> bool {
        let me = EntityId::player(self.id);
        let mine = my_distance.round();
        !world.team_players(self.id.team).any(|other| {
            if other.id == me {
                return false;
            }
            let theirs = distance(other.position, world.ball.position).round();
            theirs <= mine
        })
    }

    fn plan_kick(&self, world: &WorldView, rng: &mut ChaCha8Rng) -> Intent {
        let ball = &world.ball;
        if !ball.controllable || ball.speed() > self.config.max_controllable_ball_speed {
            return Intent::none();
        }

        let team = self.id.team;
        let mut power = self.template.kick_power;
        if self.stamina.is_sprinting() {
            power *= self.config.sprint_kick_multiplier;
        }

        let impulse = if self.role == Role::Defender {
            let field = world.field.bounds;
            let target = vec2(
                ball.position.x + team.attack_dir() * self.config.clear_distance,
                rng.gen_range(field.top..=field.bottom),
            );
            normalize_or_zero(target - ball.position) * power
        } else {
            let net = world.net(team.opposite());
            if net.is_past_front(self.body.position.x) {
                normalize_or_zero(net.kick_out_target() - ball.position) * power
            } else {
                let shot = net.shot_position();
                if self.role == Role::Forward && self.body.distance_to(shot) > self.config.long_range_distance {
                    power *= self.config.long_range_multiplier;
                }
                let ratio = rng.gen_range(self.config.shot_power_min_ratio..=1.0);
                normalize_or_zero(shot - ball.position) * power * ratio
            }
        };
        Intent::kick(impulse)
    }

    fn walk_to_start(&mut self) {
        if self.body.distance_to(self.start_position) <= body::ARRIVE_EPSILON {
            self.body.stop();
            self.control = ControlMode::Waiting;
        } else {
            self.body.move_to(self.start_position, self.template.move_speed);
        }
    }

    fn refresh_animation(&mut self) -> Result<(), ConfigError> {
        if self.body.is_in_pain() || self.is_kicking {
            return Ok(());
        }
        self.body.face_velocity();
        let clip = if self.body.velocity.norm_squared() > 0.0 { AnimationName::Run } else { AnimationName::Idle };
        self.body.set_animation(clip)
    }
}

impl Agent for TeamPlayer {
    fn entity(&self) -> EntityId {
        EntityId::player(self.id)
    }

    fn role(&self) -> Role {
        self.role
    }

    fn body(&self) -> &MovingBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MovingBody {
        &mut self.body
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Result<Intent, ConfigError> {
        if let Some(clip) = self.body.advance_animation(ctx.dt_ms)? {
            if clip == AnimationName::Kick && self.is_kicking {
                self.is_kicking = false;
            }
        }
        self.chase_target = None;

        let intent = if self.body.is_in_pain() {
            self.body.decay_velocity(body::PAIN_DECAY);
            Intent::none()
        } else if self.is_kicking {
            Intent::none()
        } else {
            match self.control {
                ControlMode::Returning => {
                    self.walk_to_start();
                    Intent::none()
                }
                ControlMode::Waiting => {
                    self.body.stop();
                    Intent::none()
                }
                ControlMode::Active => self.play(ctx.world, &mut *ctx.rng),
            }
        };

        self.stamina.tick(ctx.dt_ms);
        self.refresh_animation()?;
        Ok(intent)
    }

    fn kick_resolved(&mut self, request: KickRequest, accepted: bool) -> Result<(), ConfigError> {
        if !accepted {
            return Ok(());
        }
        self.is_kicking = true;
        self.body.stop();
        self.body.face_toward(request.impulse.x);
        self.body.restart_animation(AnimationName::Kick)?;
        if self.role == Role::Defender {
            self.stamina.force_stop_sprint();
        }
        debug!(player = %self.id, role = %self.role, impulse_x = request.impulse.x, impulse_y = request.impulse.y, "kick");
        Ok(())
    }

    fn on_reset(&mut self) {
        self.is_kicking = false;
        self.chase_target = None;
        self.stamina.force_stop_sprint();
        self.control = ControlMode::Returning;
    }

    fn on_start(&mut self) {
        self.control = ControlMode::Active;
    }

    fn stamina(&self) -> Option<f32> {
        Some(self.stamina.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::NoInput;
    use crate::engine::match_sim::test_fixtures::*;

    fn player(team: TeamSide, index: u8, role: Role, formation: Formation) -> TeamPlayer {
        let cfg = test_config();
        let field = Field::default();
        let setup = PlayerSetup { id: PlayerId::new(team, index), role, formation, stamina_fraction: 1.0 };
        let mut p = TeamPlayer::new(setup, &field, &cfg.team_player, team_player_animator(&cfg), false);
        p.on_start();
        p
    }

    fn decide(p: &mut TeamPlayer, world: &WorldView) -> Intent {
        let mut rng = test_rng();
        let mut ctx = DecisionContext { world, dt_ms: 16.0, rng: &mut rng, input: &NoInput };
        p.decide(&mut ctx).unwrap()
    }

    #[test]
    fn test_formation_slot_partners_split_zone() {
        let field = Field::default();
        let zone = field.zone(ZoneId::Left);
        let ball = vec2(100.0, 300.0);
        let upper = formation_slot(&field, ZoneId::Left, ball, Formation { rank: 0, partners: 2 });
        let lower = formation_slot(&field, ZoneId::Left, ball, Formation { rank: 1, partners: 2 });
        assert!((upper.y - (zone.top + zone.height() / 3.0)).abs() < 1e-3);
        assert!((lower.y - (zone.top + zone.height() * 2.0 / 3.0)).abs() < 1e-3);
        // Ball is nearer the zone's left edge.
        assert_eq!(upper.x, zone.left);
    }

    #[test]
    fn test_formation_slot_lone_role_clamps_ball_y() {
        let field = Field::default();
        let zone = field.zone(ZoneId::Mid);
        let slot = formation_slot(&field, ZoneId::Mid, vec2(500.0, 30.0), Formation::LONE);
        assert!((slot.y - (zone.top + zone.height() / 3.0)).abs() < 1e-3);
        assert_eq!(slot.x, zone.right);
    }

    #[test]
    fn test_start_positions_in_own_half() {
        let field = Field::default();
        let center = field.center().x;
        for role in [Role::Defender, Role::Midfielder, Role::Forward] {
            let home = start_position(&field, TeamSide::Home, ZoneId::for_role(TeamSide::Home, role), Formation::LONE, 24.0);
            let away = start_position(&field, TeamSide::Away, ZoneId::for_role(TeamSide::Away, role), Formation::LONE, 24.0);
            assert!(home.x <= center - 24.0, "{role} home start {home:?}");
            assert!(away.x >= center + 24.0, "{role} away start {away:?}");
        }
    }

    #[test]
    fn test_defender_holds_when_ball_outside_zone() {
        let mut p = player(TeamSide::Home, 3, Role::Defender, Formation::LONE);
        let world = world_with_ball(vec2(600.0, 174.0), Vec2::zeros());
        decide(&mut p, &world);
        assert!(p.chase_target().is_none());
    }

    #[test]
    fn test_defender_chases_inside_zone() {
        let mut p = player(TeamSide::Home, 3, Role::Defender, Formation::LONE);
        let world = world_with_ball(vec2(150.0, 174.0), Vec2::zeros());
        decide(&mut p, &world);
        assert_eq!(p.chase_target(), Some(vec2(150.0, 174.0)));
        assert!(p.body().velocity.norm() > 0.0);
    }

    #[test]
    fn test_equally_near_teammates_both_hold() {
        let ball = vec2(432.0, 174.0);
        let mut world = world_with_ball(ball, Vec2::zeros());
        // Two home forwards, both 100 units from the ball, outside their zone.
        let mut a = player(TeamSide::Home, 0, Role::Forward, Formation { rank: 0, partners: 2 });
        let mut b = player(TeamSide::Home, 1, Role::Forward, Formation { rank: 1, partners: 2 });
        a.body_mut().position = vec2(432.0, 74.0);
        b.body_mut().position = vec2(432.0, 274.0);
        world.agents.push(agent_view(&a));
        world.agents.push(agent_view(&b));

        decide(&mut a, &world);
        decide(&mut b, &world);
        assert!(a.chase_target().is_none());
        assert!(b.chase_target().is_none());
    }

    #[test]
    fn test_nearer_teammate_chases_alone() {
        let ball = vec2(432.0, 174.0);
        let mut world = world_with_ball(ball, Vec2::zeros());
        let mut a = player(TeamSide::Home, 0, Role::Forward, Formation { rank: 0, partners: 2 });
        let mut b = player(TeamSide::Home, 1, Role::Forward, Formation { rank: 1, partners: 2 });
        a.body_mut().position = vec2(432.0, 74.0);
        b.body_mut().position = vec2(432.0, 264.0);
        world.agents.push(agent_view(&a));
        world.agents.push(agent_view(&b));

        decide(&mut a, &world);
        decide(&mut b, &world);
        assert!(a.chase_target().is_none());
        assert_eq!(b.chase_target(), Some(ball));
    }

    #[test]
    fn test_pain_skips_control() {
        let mut p = player(TeamSide::Home, 0, Role::Forward, Formation::LONE);
        p.hit(vec2(1.0, 0.0)).unwrap();
        let world = world_with_ball(p.body().position, Vec2::zeros());
        let intent = decide(&mut p, &world);
        assert_eq!(intent, Intent::none());
        assert!((p.body().velocity.x - 135.0).abs() < 1e-3);
    }

    #[test]
    fn test_kick_commit_window() {
        let mut p = player(TeamSide::Home, 0, Role::Forward, Formation::LONE);
        let ball = p.body().position + vec2(5.0, 0.0);
        let world = world_with_ball(ball, Vec2::zeros());

        let intent = decide(&mut p, &world);
        let request = intent.kick.expect("kick within range");
        assert!(request.impulse.x > 0.0);

        p.kick_resolved(request, true).unwrap();
        assert!(p.is_kicking());
        assert_eq!(p.body().velocity, Vec2::zeros());

        // Second attempt while committed: nothing.
        assert_eq!(decide(&mut p, &world), Intent::none());

        // Kick clip is 300 ms; the commit clears on its loop.
        for _ in 0..20 {
            decide(&mut p, &world);
        }
        assert!(!p.is_kicking());
    }

    #[test]
    fn test_fast_ball_is_not_kicked() {
        let mut p = player(TeamSide::Home, 0, Role::Forward, Formation::LONE);
        let ball = p.body().position + vec2(5.0, 0.0);
        let world = world_with_ball(ball, vec2(200.0, 0.0));
        assert!(decide(&mut p, &world).kick.is_none());
    }

    #[test]
    fn test_defender_clears_forward() {
        let mut p = player(TeamSide::Away, 3, Role::Defender, Formation::LONE);
        let ball = p.body().position + vec2(-5.0, 0.0);
        let world = world_with_ball(ball, Vec2::zeros());
        let request = decide(&mut p, &world).kick.expect("clear");
        // Away attacks toward -x.
        assert!(request.impulse.x < 0.0);
    }

    #[test]
    fn test_reset_walks_back_then_waits() {
        let mut p = player(TeamSide::Home, 2, Role::Midfielder, Formation::LONE);
        let start = p.start_position();
        p.body_mut().position = start + vec2(0.5, 0.0);
        p.on_reset();
        assert_eq!(p.control(), ControlMode::Returning);

        let world = world_with_ball(vec2(600.0, 100.0), Vec2::zeros());
        decide(&mut p, &world);
        assert_eq!(p.control(), ControlMode::Waiting);
        assert!(p.chase_target().is_none());

        p.on_start();
        assert_eq!(p.control(), ControlMode::Active);
    }
}
