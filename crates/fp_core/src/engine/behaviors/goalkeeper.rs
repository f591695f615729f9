//! Goalkeeper behavior
//!
//! Priority per tick:
//! 1. Pain: velocity decays
//! 2. Kick commit: no movement until the Kick clip loops
//! 3. Distracted: walk to the distractor, ignore the ball
//! 4. Kickoff walk / wait
//! 5. Slide at a fast incoming ball, else track it along the angled line
//!
//! Independently of 5, a slow ball close by is cleared upfield.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::traits::{Agent, DecisionContext};
use super::{BallView, ControlMode, Intent, KickRequest, WorldView};
use crate::engine::animation::{AnimationName, Animator};
use crate::engine::body::MovingBody;
use crate::engine::config::GoalieConfig;
use crate::engine::field::Net;
use crate::engine::geometry::{vec2, Vec2};
use crate::engine::physics_constants::body;
use crate::engine::types::{EntityId, Role, TeamSide};
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct Goalie {
    team: TeamSide,
    net: Net,
    body: MovingBody,
    config: GoalieConfig,
    control: ControlMode,
    /// Between start and reset
    in_play: bool,
    start_position: Vec2,
    is_kicking: bool,
    slide_remaining_ms: f32,
    distraction: Option<EntityId>,
    debug: bool,
}

impl Goalie {
    pub fn new(team: TeamSide, net: Net, config: &GoalieConfig, animator: Animator, debug: bool) -> Self {
        let y = net.mouth_center_y() - body::HEIGHT / 2.0 - config.middle_offset;
        let start = vec2(line_x(team, &net, config, y), y);
        let mut body = MovingBody::new(start, animator);
        body.facing_left = team == TeamSide::Away;

        Self {
            team,
            net,
            body,
            config: *config,
            control: ControlMode::Waiting,
            in_play: false,
            start_position: start,
            is_kicking: false,
            slide_remaining_ms: 0.0,
            distraction: None,
            debug,
        }
    }

    pub fn team(&self) -> TeamSide {
        self.team
    }

    pub fn control(&self) -> ControlMode {
        self.control
    }

    pub fn start_position(&self) -> Vec2 {
        self.start_position
    }

    pub fn is_kicking(&self) -> bool {
        self.is_kicking
    }

    pub fn is_sliding(&self) -> bool {
        self.slide_remaining_ms > 0.0
    }

    /// A distracted goalie lets the ball through.
    pub fn is_blocking(&self) -> bool {
        self.distraction.is_none()
    }

    pub fn distraction(&self) -> Option<EntityId> {
        self.distraction
    }

    /// Lure the goalie toward `actor`. Cancels slide, pain and kick commit.
    pub fn distract(&mut self, actor: EntityId) {
        self.distraction = Some(actor);
        self.slide_remaining_ms = 0.0;
        self.is_kicking = false;
        self.body.clear_pain();
        debug!(team = %self.team, by = %actor, "goalie distracted");
    }

    /// Ends the distraction only if `actor` is still the one distracting.
    pub fn end_distraction(&mut self, actor: EntityId) -> bool {
        if self.distraction != Some(actor) {
            return false;
        }
        self.distraction = None;
        self.control = ControlMode::Returning;
        debug!(team = %self.team, "goalie back on duty");
        true
    }

    pub fn hit(&mut self, direction: Vec2) -> Result<(), ConfigError> {
        self.body.hit(direction, self.config.knockback_power, self.config.pain_loops)?;
        self.is_kicking = false;
        self.slide_remaining_ms = 0.0;
        Ok(())
    }

    fn sprite_middle_y(&self) -> f32 {
        self.body.position.y + body::HEIGHT / 2.0 + self.config.middle_offset
    }

    fn is_lined_up(&self, ball_y: f32) -> bool {
        (self.sprite_middle_y() - ball_y).abs() < self.config.lined_up_tolerance
    }

    fn should_slide(&self, ball: &BallView) -> bool {
        let cfg = &self.config;
        let pos = self.body.position;
        let in_net = pos.y > self.net.mouth_top && pos.y < self.net.mouth_bottom;
        let incoming = match self.team {
            TeamSide::Home => ball.velocity.x < -cfg.slide_trigger_speed,
            TeamSide::Away => ball.velocity.x > cfg.slide_trigger_speed,
        };
        let x_distance = (pos.x - ball.position.x).abs();

        in_net
            && self.net.contains_y(ball.position.y)
            && incoming
            && !self.is_lined_up(ball.position.y)
            && x_distance > cfg.slide_min_x_distance
            && x_distance < cfg.slide_max_x_distance
    }

    fn slide(&mut self, down: bool) -> Result<(), ConfigError> {
        if self.is_sliding() {
            return Ok(());
        }
        self.slide_remaining_ms = self.config.slide_duration_ms;
        self.body.velocity.y = if down { self.config.slide_speed } else { -self.config.slide_speed };
        let clip = if down { AnimationName::BlockDown } else { AnimationName::BlockUp };
        self.body.restart_animation(clip)?;
        debug!(team = %self.team, down, "goalie slide");
        Ok(())
    }

    fn track(&mut self, ball_y: f32) -> Result<(), ConfigError> {
        let cfg = &self.config;
        let target_y = ball_y.clamp(self.net.mouth_top + cfg.mouth_top_inset, self.net.mouth_bottom - cfg.mouth_bottom_inset);
        let target = vec2(line_x(self.team, &self.net, cfg, self.body.position.y), target_y);

        let top = self.body.position.y;
        let bottom = top + body::HEIGHT;
        let move_up = ball_y < top && (top - target_y).abs() > cfg.lined_up_tolerance;
        let move_down = ball_y > bottom && (target_y - bottom).abs() > cfg.lined_up_tolerance;

        if !self.is_lined_up(ball_y) && (move_up || move_down) {
            self.body.move_to(target, cfg.track_speed);
        } else {
            self.body.stop();
        }
        self.run_or_idle()
    }

    fn follow_distractor(&mut self, world: &WorldView, actor: EntityId) -> Result<(), ConfigError> {
        match world.position_of(actor) {
            Some(target) if self.body.distance_to(target) > self.config.distracted_stop_distance => {
                self.body.move_to(target, self.config.distracted_speed);
                self.body.face_velocity();
                self.body.set_animation(AnimationName::Run)
            }
            _ => {
                self.body.stop();
                self.body.set_animation(AnimationName::HeartEyes)
            }
        }
    }

    fn walk_to_start(&mut self) -> Result<(), ConfigError> {
        if self.body.distance_to(self.start_position) <= body::ARRIVE_EPSILON {
            self.body.stop();
            self.control = if self.in_play { ControlMode::Active } else { ControlMode::Waiting };
        } else {
            self.body.move_to(self.start_position, self.config.distracted_speed);
        }
        self.run_or_idle()
    }

    fn maybe_clear(&self, ball: &BallView, rng: &mut ChaCha8Rng) -> Intent {
        let cfg = &self.config;
        if !ball.controllable {
            return Intent::none();
        }
        let close = self.body.distance_to(ball.position) < cfg.clear_radius;
        let slow = ball.velocity.x.abs() < cfg.clear_max_ball_speed && ball.velocity.y.abs() < cfg.clear_max_ball_speed;
        if !(close && slow) {
            return Intent::none();
        }
        let y = if rng.gen_bool(0.5) { cfg.kick_power } else { -cfg.kick_power };
        Intent::kick(vec2(self.team.attack_dir() * cfg.kick_power, y))
    }

    fn run_or_idle(&mut self) -> Result<(), ConfigError> {
        self.body.facing_left = self.team == TeamSide::Away;
        let clip = if self.body.velocity.norm_squared() > 0.0 { AnimationName::Run } else { AnimationName::Idle };
        self.body.set_animation(clip)
    }
}

/// Angled keeping line: the goalie steps off the line toward the near post.
pub fn line_x(team: TeamSide, net: &Net, cfg: &GoalieConfig, y: f32) -> f32 {
    match team {
        TeamSide::Home => net.front_x + cfg.line_offset + (net.mouth_top - y) / 5.0,
        TeamSide::Away => net.front_x - cfg.line_offset + (y - net.mouth_top) / 5.0,
    }
}

impl Agent for Goalie {
    fn entity(&self) -> EntityId {
        EntityId::goalie(self.team)
    }

    fn role(&self) -> Role {
        Role::Goalie
    }

    fn body(&self) -> &MovingBody {
        &self.body
    }

    fn body_mut(&mut self) -> &mut MovingBody {
        &mut self.body
    }

    fn decide(&mut self, ctx: &mut DecisionContext<'_>) -> Result<Intent, ConfigError> {
        if let Some(AnimationName::Kick) = self.body.advance_animation(ctx.dt_ms)? {
            self.is_kicking = false;
        }

        if self.body.is_in_pain() {
            self.body.decay_velocity(body::PAIN_DECAY);
            return Ok(Intent::none());
        }
        if self.is_kicking {
            return Ok(Intent::none());
        }
        if let Some(actor) = self.distraction {
            self.follow_distractor(ctx.world, actor)?;
            return Ok(Intent::none());
        }
        match self.control {
            ControlMode::Returning => {
                self.walk_to_start()?;
                return Ok(Intent::none());
            }
            ControlMode::Waiting => {
                self.body.stop();
                self.run_or_idle()?;
                return Ok(Intent::none());
            }
            ControlMode::Active => {}
        }

        let ball = ctx.world.ball;
        if self.should_slide(&ball) {
            let down = self.body.position.y < ball.position.y;
            self.slide(down)?;
        } else if !self.is_sliding() {
            self.track(ball.position.y)?;
        }

        let intent = self.maybe_clear(&ball, &mut *ctx.rng);

        if self.is_sliding() {
            self.body.decay_velocity(1.0 - self.config.slide_friction);
            self.slide_remaining_ms = (self.slide_remaining_ms - ctx.dt_ms).max(0.0);
        }
        Ok(intent)
    }

    fn kick_resolved(&mut self, request: KickRequest, accepted: bool) -> Result<(), ConfigError> {
        if !accepted {
            return Ok(());
        }
        self.is_kicking = true;
        self.body.stop();
        self.body.restart_animation(AnimationName::Kick)?;
        debug!(team = %self.team, impulse_x = request.impulse.x, impulse_y = request.impulse.y, "goalie clears");
        Ok(())
    }

    fn on_reset(&mut self) {
        self.in_play = false;
        self.is_kicking = false;
        self.slide_remaining_ms = 0.0;
        self.control = ControlMode::Returning;
    }

    fn on_start(&mut self) {
        self.in_play = true;
        // A goalie still walking back takes up play on arrival.
        if self.control != ControlMode::Returning {
            self.control = ControlMode::Active;
        }
        if self.debug {
            debug!(team = %self.team, "goalie ready");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::behaviors::TruckView;
    use crate::engine::field::Field;
    use crate::engine::input::NoInput;
    use crate::engine::match_sim::test_fixtures::*;

    fn goalie(team: TeamSide) -> Goalie {
        let cfg = test_config();
        let net = Net::new(team, &Field::default());
        let mut g = Goalie::new(team, net, &cfg.goalie, goalie_animator(&cfg), false);
        g.on_start();
        g
    }

    fn decide(g: &mut Goalie, world: &WorldView) -> Intent {
        let mut rng = test_rng();
        let mut ctx = DecisionContext { world, dt_ms: 16.0, rng: &mut rng, input: &NoInput };
        g.decide(&mut ctx).unwrap()
    }

    #[test]
    fn test_line_x() {
        let cfg = GoalieConfig::default();
        let field = Field::default();
        let home = Net::new(TeamSide::Home, &field);
        let away = Net::new(TeamSide::Away, &field);
        // Mouth top is 141.5.
        assert!((line_x(TeamSide::Home, &home, &cfg, 151.5) - 52.0).abs() < 1e-4);
        assert!((line_x(TeamSide::Away, &away, &cfg, 151.5) - 811.0).abs() < 1e-4);
    }

    #[test]
    fn test_start_is_lined_up_with_mouth_center() {
        let g = goalie(TeamSide::Home);
        assert!(g.is_lined_up(173.5));
        assert!((g.start_position().x - 50.8).abs() < 1e-3);
    }

    #[test]
    fn test_slide_at_fast_incoming_ball() {
        let mut g = goalie(TeamSide::Home);
        let ball = vec2(g.body().position.x - 15.0, 195.0);
        let world = world_with_ball(ball, vec2(-300.0, 0.0));

        let intent = decide(&mut g, &world);
        assert!(intent.kick.is_none());
        assert!(g.is_sliding());
        assert!((g.body().velocity.y - 270.0).abs() < 1e-3);
        assert_eq!(g.body().animation(), AnimationName::BlockDown);
    }

    #[test]
    fn test_no_slide_when_ball_moves_away() {
        let mut g = goalie(TeamSide::Home);
        let ball = vec2(g.body().position.x - 15.0, 195.0);
        let world = world_with_ball(ball, vec2(300.0, 0.0));
        decide(&mut g, &world);
        assert!(!g.is_sliding());
    }

    #[test]
    fn test_tracks_ball_down_the_line() {
        let mut g = goalie(TeamSide::Home);
        let world = world_with_ball(vec2(300.0, 250.0), Vec2::zeros());
        decide(&mut g, &world);
        assert!(g.body().velocity.y > 49.0);
        assert_eq!(g.body().animation(), AnimationName::Run);
    }

    #[test]
    fn test_lined_up_goalie_holds() {
        let mut g = goalie(TeamSide::Home);
        let world = world_with_ball(vec2(300.0, 175.0), Vec2::zeros());
        decide(&mut g, &world);
        assert_eq!(g.body().velocity, Vec2::zeros());
    }

    #[test]
    fn test_clears_slow_ball_upfield() {
        let mut g = goalie(TeamSide::Away);
        let ball = g.body().position + vec2(-10.0, 10.0);
        let world = world_with_ball(ball, Vec2::zeros());
        let request = decide(&mut g, &world).kick.expect("clear");
        assert_eq!(request.impulse.x, -300.0);
        assert_eq!(request.impulse.y.abs(), 300.0);

        g.kick_resolved(request, true).unwrap();
        assert!(g.is_kicking());
        assert!(decide(&mut g, &world).kick.is_none());
    }

    #[test]
    fn test_distraction_follows_truck() {
        let mut g = goalie(TeamSide::Away);
        let mut world = world_with_ball(vec2(432.0, 174.0), Vec2::zeros());
        world.truck = Some(TruckView { position: vec2(705.0, 76.0), has_ice_cream: false });

        g.distract(EntityId::Truck);
        assert!(!g.is_blocking());
        decide(&mut g, &world);
        assert!((g.body().velocity.norm() - 100.0).abs() < 1e-3);
        assert!(g.body().velocity.y < 0.0);

        // Only the distractor can end the distraction.
        assert!(!g.end_distraction(EntityId::Referee));
        assert!(g.end_distraction(EntityId::Truck));
        assert!(g.is_blocking());
        assert_eq!(g.control(), ControlMode::Returning);
    }

    #[test]
    fn test_distracted_goalie_idles_at_distractor() {
        let mut g = goalie(TeamSide::Away);
        let mut world = world_with_ball(vec2(432.0, 174.0), Vec2::zeros());
        let here = g.body().position + vec2(3.0, 0.0);
        world.truck = Some(TruckView { position: here, has_ice_cream: false });
        g.distract(EntityId::Truck);
        decide(&mut g, &world);
        assert_eq!(g.body().velocity, Vec2::zeros());
        assert_eq!(g.body().animation(), AnimationName::HeartEyes);
    }
}
