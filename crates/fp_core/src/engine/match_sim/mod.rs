//! Match Orchestrator
//!
//! Owns every record on the pitch and advances them one tick at a time:
//!
//! - Match phase machine (idle, playing, goal, reset walk, game over)
//! - Agent decisions in fixed order, kick resolution against the ball
//! - Ball step, contact tracking, goal / out-of-bounds detection
//! - Score, possession, kickoff bias, win condition and the referee verdict
//! - Ice-cream truck handouts and their scheduled continuations
//!
//! ## Tick order
//!
//! ```text
//! clock → queued events → due continuations → truck popup → WorldView
//!   → decide (home players, away players, home goalie, away goalie, referee)
//!   → integrate bodies → ball step → contacts → drain events → out-of-bounds
//! ```
//!
//! Agents only see the `WorldView` taken before anyone decides, so the
//! decision order matters for kick resolution alone.

pub mod collisions;
pub mod match_phase;
pub mod verdict;

#[cfg(test)]
pub mod test_fixtures;


pub use match_phase::MatchPhase;
pub use verdict::Verdict;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace, warn};
use validator::Validate;

use self::collisions::ContactTracker;
use self::match_phase::phase_after_reset;
use super::animation::Animator;
use super::ball::Ball;
use super::behaviors::team_player::{Formation, PlayerSetup};
use super::behaviors::{Agent, AgentView, BallView, DecisionContext, Goalie, Intent, PunchRequest, Referee, TeamPlayer, TruckView, WorldView};
use super::config::{EngineConfig, InitialStamina, GOALIE_CLIPS, REFEREE_CLIPS, TEAM_PLAYER_CLIPS};
use super::events::{EventQueue, MatchEvent, SoundCue};
use super::field::{Field, Net};
use super::geometry::{vec2, Aabb, Vec2};
use super::icecream_truck::IceCreamTruck;
use super::input::InputState;
use super::physics_constants::referee as referee_consts;
use super::scheduler::Scheduler;
use super::snapshot::{AgentSnapshot, BallSnapshot, MatchSnapshot, TruckSnapshot};
use super::timestep::clamp_dt;
use super::types::{EntityId, PlayerId, Role, TeamSide};
use crate::error::ConfigError;

/// Roster order: index 0 and 1 forwards, 2 midfielder, 3 and 4 defenders.
const ROSTER: [(Role, Formation); 5] = [
    (Role::Forward, Formation { rank: 0, partners: 2 }),
    (Role::Forward, Formation { rank: 1, partners: 2 }),
    (Role::Midfielder, Formation::LONE),
    (Role::Defender, Formation { rank: 0, partners: 2 }),
    (Role::Defender, Formation { rank: 1, partners: 2 }),
];

/// Work deferred on the match clock. Every entry is owned by the truck, so
/// removing the truck drops all of them.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Continuation {
    EndDistraction { team: TeamSide, distractor: EntityId },
    TruckDoneGiving,
    TruckRestock,
}

#[derive(Debug, Clone)]
pub struct Team {
    pub side: TeamSide,
    pub net: Net,
    pub goalie: Goalie,
    pub players: Vec<TeamPlayer>,
    pub score: u32,
}

impl Team {
    fn new(side: TeamSide, config: &EngineConfig, field: &Field, rng: &mut ChaCha8Rng) -> Result<Self, ConfigError> {
        let net = Net::new(side, field);
        let mut players = Vec::with_capacity(ROSTER.len());
        for (index, (role, formation)) in ROSTER.iter().enumerate() {
            let id = PlayerId::new(side, index as u8);
            let stamina_fraction = match config.rules.initial_stamina {
                InitialStamina::Full => 1.0,
                InitialStamina::RandomFraction { min } => rng.gen_range(min..=1.0),
            };
            let animator =
                Animator::new(EntityId::player(id).to_string(), config.animations.team_player.clone(), TEAM_PLAYER_CLIPS)?;
            let setup = PlayerSetup { id, role: *role, formation: *formation, stamina_fraction };
            players.push(TeamPlayer::new(setup, field, &config.team_player, animator, config.debug));
        }

        let animator = Animator::new(EntityId::goalie(side).to_string(), config.animations.goalie.clone(), GOALIE_CLIPS)?;
        let goalie = Goalie::new(side, net, &config.goalie, animator, config.debug);

        Ok(Self { side, net, goalie, players, score: 0 })
    }

    pub fn player(&self, id: PlayerId) -> Option<&TeamPlayer> {
        self.players.iter().find(|p| p.id() == id)
    }

    fn player_mut(&mut self, id: PlayerId) -> Option<&mut TeamPlayer> {
        self.players.iter_mut().find(|p| p.id() == id)
    }
}

/// What happened during one tick, for hosts that play sounds or log.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    pub tick: u64,
    pub elapsed_ms: f64,
    /// Drained events, collision plumbing excluded
    pub events: Vec<MatchEvent>,
    pub sounds: Vec<SoundCue>,
}

impl TickReport {
    pub fn goals(&self) -> impl Iterator<Item = TeamSide> + '_ {
        self.events.iter().filter_map(|e| match e {
            MatchEvent::Goal { scoring } => Some(*scoring),
            _ => None,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Match {
    config: EngineConfig,
    field: Field,
    ball: Ball,
    home: Team,
    away: Team,
    referee: Referee,
    truck: Option<IceCreamTruck>,
    phase: MatchPhase,
    game_has_started: bool,
    game_over: bool,
    last_possession: Option<TeamSide>,
    reset_target: Vec2,
    verdict: Option<Verdict>,
    scheduler: Scheduler<Continuation>,
    events: EventQueue,
    contacts: ContactTracker,
    rng: ChaCha8Rng,
    tick: u64,
    elapsed_ms: f64,
}

impl Match {
    /// Validate `config`, build both squads, the referee and the truck.
    ///
    /// Fails if a value is out of range or an agent's clip set lacks a clip
    /// its behavior plays.
    pub fn new(config: EngineConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let field = Field::new(&config.field);
        let home = Team::new(TeamSide::Home, &config, &field, &mut rng)?;
        let away = Team::new(TeamSide::Away, &config, &field, &mut rng)?;

        let kickoff = field.kickoff_spot();
        let animator = Animator::new(EntityId::Referee.to_string(), config.animations.referee.clone(), REFEREE_CLIPS)?;
        let referee = Referee::new(
            kickoff + vec2(0.0, referee_consts::START_OFFSET_Y),
            &config.referee,
            config.truck.bribe_radius,
            animator,
            config.debug,
        );
        let truck = config.truck.enabled.then(|| IceCreamTruck::new(&field, config.truck.popup_radius));

        info!(seed, score_to_win = config.rules.score_to_win, "match created");

        Ok(Self {
            ball: Ball::new(kickoff, config.ball),
            config,
            field,
            home,
            away,
            referee,
            truck,
            phase: MatchPhase::Idle,
            game_has_started: false,
            game_over: false,
            last_possession: None,
            reset_target: kickoff,
            verdict: None,
            scheduler: Scheduler::new(),
            events: EventQueue::new(),
            contacts: ContactTracker::new(),
            rng,
            tick: 0,
            elapsed_ms: 0.0,
        })
    }

    // ========== Accessors ==========

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn game_has_started(&self) -> bool {
        self.game_has_started
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn last_possession(&self) -> Option<TeamSide> {
        self.last_possession
    }

    pub fn score(&self, side: TeamSide) -> u32 {
        self.team(side).score
    }

    /// Final verdict, set when a team reaches the winning score.
    pub fn verdict(&self) -> Option<Verdict> {
        self.verdict
    }

    pub fn winner(&self) -> Option<TeamSide> {
        if !self.game_over {
            return None;
        }
        TeamSide::ALL.into_iter().find(|side| self.score(*side) >= self.config.rules.score_to_win)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    /// Direct ball access for hosts and scenario setup.
    pub fn ball_mut(&mut self) -> &mut Ball {
        &mut self.ball
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        match side {
            TeamSide::Home => &self.home,
            TeamSide::Away => &self.away,
        }
    }

    pub(crate) fn team_mut(&mut self, side: TeamSide) -> &mut Team {
        match side {
            TeamSide::Home => &mut self.home,
            TeamSide::Away => &mut self.away,
        }
    }

    pub fn referee(&self) -> &Referee {
        &self.referee
    }

    pub fn referee_mut(&mut self) -> &mut Referee {
        &mut self.referee
    }

    pub fn suspicion(&self) -> u32 {
        self.referee.suspicion()
    }

    pub fn truck(&self) -> Option<&IceCreamTruck> {
        self.truck.as_ref()
    }

    pub fn pending_continuations(&self) -> usize {
        self.scheduler.len()
    }

    /// Agents in decision order.
    pub fn agents(&self) -> Vec<&dyn Agent> {
        let mut out: Vec<&dyn Agent> = Vec::with_capacity(2 * ROSTER.len() + 3);
        out.extend(self.home.players.iter().map(|p| p as &dyn Agent));
        out.extend(self.away.players.iter().map(|p| p as &dyn Agent));
        out.push(&self.home.goalie);
        out.push(&self.away.goalie);
        out.push(&self.referee);
        out
    }

    pub fn world_view(&self) -> WorldView {
        WorldView {
            ball: BallView {
                position: self.ball.position,
                velocity: self.ball.velocity,
                controllable: self.ball.is_controllable(),
            },
            field: self.field,
            home_net: self.home.net,
            away_net: self.away.net,
            agents: self.agents().into_iter().map(AgentView::of).collect(),
            truck: self.truck.as_ref().map(|t| TruckView { position: t.position, has_ice_cream: t.has_ice_cream() }),
            phase: self.phase,
            elapsed_ms: self.elapsed_ms,
        }
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            tick: self.tick,
            elapsed_ms: self.elapsed_ms,
            phase: self.phase,
            score_home: self.home.score,
            score_away: self.away.score,
            last_possession: self.last_possession,
            ball: BallSnapshot {
                position: self.ball.position,
                velocity: self.ball.velocity,
                controllable: self.ball.is_controllable(),
            },
            agents: self.agents().into_iter().map(AgentSnapshot::of).collect(),
            truck: self.truck.as_ref().map(|t| TruckSnapshot {
                position: t.position,
                popped_up: t.is_popped_up(),
                has_ice_cream: t.has_ice_cream(),
            }),
        }
    }

    // ========== Phase control ==========

    /// Start play. From game over this begins a fresh match (scores,
    /// verdict and suspicion cleared). During a reset walk play begins when
    /// the ball reaches the kickoff spot.
    pub fn start(&mut self) {
        if self.game_over {
            self.game_over = false;
            self.verdict = None;
            self.home.score = 0;
            self.away.score = 0;
            self.referee.reset_suspicion();
            self.events.push(MatchEvent::ScoreChanged { home: 0, away: 0 });
            info!("new match");
        }
        self.game_has_started = true;
        if self.phase == MatchPhase::Resetting {
            return;
        }
        self.begin_play();
    }

    fn begin_play(&mut self) {
        self.phase = MatchPhase::Playing;
        self.events.push(MatchEvent::Start);
        info!(home = self.home.score, away = self.away.score, "kickoff");
    }

    /// Walk the ball back to the kickoff spot, shifted toward the half of
    /// the team that did not last have possession. Ignored mid-reset.
    pub fn reset(&mut self) {
        if self.phase == MatchPhase::Resetting {
            return;
        }
        let kickoff = self.last_possession.map(TeamSide::opposite);
        let offset = match kickoff {
            Some(TeamSide::Home) => -self.config.rules.kickoff_offset,
            Some(TeamSide::Away) => self.config.rules.kickoff_offset,
            None => 0.0,
        };
        self.reset_target = self.field.kickoff_spot() + vec2(offset, 0.0);
        self.phase = MatchPhase::Resetting;
        self.ball.set_controllable(false);
        self.events.push(MatchEvent::Reset { kickoff });
        info!(kickoff = ?kickoff, target_x = self.reset_target.x, "reset");
    }

    fn finish_reset(&mut self) {
        self.ball.place(self.reset_target);
        self.ball.set_controllable(true);
        match phase_after_reset(self.game_over, self.game_has_started) {
            MatchPhase::Playing => self.begin_play(),
            phase => self.phase = phase,
        }
    }

    /// Take the truck off the pitch. Its pending continuations are dropped
    /// and a goalie it was luring goes back to the net.
    pub fn remove_truck(&mut self) {
        if self.truck.take().is_none() {
            return;
        }
        let cancelled = self.scheduler.cancel_owned_by(EntityId::Truck);
        for side in TeamSide::ALL {
            if self.team_mut(side).goalie.end_distraction(EntityId::Truck) {
                self.events.push(MatchEvent::DistractionEnded { team: side });
            }
        }
        debug!(cancelled, "truck removed");
    }

    // ========== Tick ==========

    /// Advance the match by `dt_ms` (clamped to the timestep limits).
    ///
    /// Only errors when an agent plays a clip its set lacks, which
    /// `Match::new` already rules out.
    pub fn tick(&mut self, dt_ms: f32, input: &impl InputState) -> Result<TickReport, ConfigError> {
        let dt = clamp_dt(dt_ms);
        self.tick += 1;
        self.elapsed_ms += f64::from(dt);
        let mut report = TickReport { tick: self.tick, elapsed_ms: self.elapsed_ms, ..TickReport::default() };

        if self.config.debug {
            trace!(tick = self.tick, phase = ?self.phase, ball_x = self.ball.position.x, ball_y = self.ball.position.y, "tick");
        }

        // Events queued by calls between ticks (start, reset, remove_truck).
        self.drain_events(&mut report)?;

        for continuation in self.scheduler.take_due(self.elapsed_ms) {
            self.fire(continuation, &mut report);
        }

        if let Some(truck) = self.truck.as_mut() {
            if truck.update(self.referee.body().position) {
                debug!("truck pops up");
            }
        }

        let world = self.world_view();
        let referee_intent = self.run_agents(&world, dt, input, &mut report)?;
        self.apply_referee(referee_intent, &mut report)?;

        let walls = self.field.walls;
        for team in [&mut self.home, &mut self.away] {
            for body in team.players.iter_mut().map(|p| p.body_mut()).chain(std::iter::once(team.goalie.body_mut())) {
                body.integrate(dt);
                body.keep_inside(&walls);
            }
        }
        self.referee.body_mut().integrate(dt);
        self.referee.body_mut().keep_inside(&walls);

        self.step_ball(dt);

        if self.phase != MatchPhase::Resetting {
            self.detect_contacts();
        }
        self.drain_events(&mut report)?;

        // After contacts, so a ball that crossed a goal line this tick
        // counts as a goal rather than going out.
        if self.phase != MatchPhase::Resetting && self.ball.bounds().is_fully_outside(&self.field.bounds) {
            self.events.push(MatchEvent::BallOutOfBounds);
            self.drain_events(&mut report)?;
        }
        Ok(report)
    }

    /// Decide for every agent and resolve kicks in order. Returns the
    /// referee's intent for the actions only the orchestrator can apply.
    fn run_agents(
        &mut self,
        world: &WorldView,
        dt: f32,
        input: &dyn InputState,
        report: &mut TickReport,
    ) -> Result<Intent, ConfigError> {
        let Self { home, away, referee, ball, rng, .. } = self;
        let mut ctx = DecisionContext { world, dt_ms: dt, rng, input };

        let mut agents: Vec<&mut dyn Agent> = Vec::with_capacity(2 * ROSTER.len() + 3);
        agents.extend(home.players.iter_mut().map(|p| p as &mut dyn Agent));
        agents.extend(away.players.iter_mut().map(|p| p as &mut dyn Agent));
        agents.push(&mut home.goalie);
        agents.push(&mut away.goalie);
        agents.push(referee);

        let mut referee_intent = Intent::none();
        for agent in agents {
            let intent = agent.decide(&mut ctx)?;
            if let Some(kick) = intent.kick {
                let accepted = ball.kick(kick.impulse, kick.force);
                if accepted {
                    report.sounds.push(SoundCue::Kick);
                }
                agent.kick_resolved(kick, accepted)?;
            }
            if agent.role() == Role::Referee {
                referee_intent = intent;
            }
        }
        Ok(referee_intent)
    }

    fn apply_referee(&mut self, intent: Intent, report: &mut TickReport) -> Result<(), ConfigError> {
        if let Some(punch) = intent.punch {
            self.apply_punch(punch, report)?;
        }
        if intent.bribe {
            self.apply_bribe(report);
        }
        if let Some(reset) = intent.whistle {
            report.sounds.push(SoundCue::Whistle);
            if reset {
                if self.phase.whistle_starts() {
                    self.start();
                } else {
                    self.reset();
                }
            }
        }
        Ok(())
    }

    fn apply_punch(&mut self, punch: PunchRequest, report: &mut TickReport) -> Result<(), ConfigError> {
        match punch.target {
            EntityId::Player { id } => {
                let Some(player) = self.team_mut(id.team).player_mut(id) else {
                    return Ok(());
                };
                player.hit(punch.direction)?;
            }
            EntityId::Goalie { team } => self.team_mut(team).goalie.hit(punch.direction)?,
            _ => return Ok(()),
        }
        report.sounds.push(SoundCue::Hit);
        self.events.push(MatchEvent::Punched { target: punch.target });
        Ok(())
    }

    /// Pay the truck: it lures the away goalie, then restocks later.
    fn apply_bribe(&mut self, report: &mut TickReport) {
        let Some(truck) = self.truck.as_mut() else {
            return;
        };
        if !truck.give() {
            return;
        }
        report.sounds.push(SoundCue::Bell);

        let team = TeamSide::Away;
        let distractor = EntityId::Truck;
        self.team_mut(team).goalie.distract(distractor);
        let delay = f64::from(self.config.truck.distraction_ms);
        self.scheduler.schedule(self.elapsed_ms, delay, distractor, Continuation::EndDistraction { team, distractor });
        self.scheduler.schedule(self.elapsed_ms, delay, distractor, Continuation::TruckDoneGiving);
        self.events.push(MatchEvent::Distracted { team, by: distractor });
    }

    fn fire(&mut self, continuation: Continuation, report: &mut TickReport) {
        match continuation {
            Continuation::EndDistraction { team, distractor } => {
                if self.team_mut(team).goalie.end_distraction(distractor) {
                    self.events.push(MatchEvent::DistractionEnded { team });
                }
            }
            Continuation::TruckDoneGiving => {
                let Some(truck) = self.truck.as_mut() else {
                    return;
                };
                truck.finish_giving();
                let delay = f64::from(self.config.truck.restock_ms);
                self.scheduler.schedule(self.elapsed_ms, delay, EntityId::Truck, Continuation::TruckRestock);
            }
            Continuation::TruckRestock => {
                let Some(truck) = self.truck.as_mut() else {
                    return;
                };
                truck.restock();
                report.sounds.push(SoundCue::WatchOut);
                self.events.push(MatchEvent::TruckRestocked);
            }
        }
    }

    fn step_ball(&mut self, dt: f32) {
        if self.phase == MatchPhase::Resetting {
            if self.ball.walk_toward(self.reset_target, self.config.rules.reset_ball_speed, dt) {
                self.finish_reset();
            }
            return;
        }

        self.ball.update(dt);
        self.ball.integrate(dt);
        self.ball.bounce_inside(&self.field.walls);
        for post in self.home.net.posts.iter().chain(self.away.net.posts.iter()) {
            self.ball.bounce_off(post);
        }
        if let Some(truck) = &self.truck {
            self.ball.bounce_off(&truck.bounds());
        }
        self.ball.clamp_velocity();
    }

    fn detect_contacts(&mut self) {
        let mut colliders: Vec<(EntityId, Aabb)> = self.agents().iter().map(|a| (a.entity(), a.body().collider())).collect();
        for net in [&self.home.net, &self.away.net] {
            colliders.push((EntityId::GoalLine { team: net.owner }, net.goal_line));
        }

        let started = self.contacts.update(self.ball.position, self.ball.radius(), colliders.iter().map(|(id, b)| (*id, b)));
        for event in started {
            self.events.push(event);
        }
    }

    // ========== Events ==========

    fn drain_events(&mut self, report: &mut TickReport) -> Result<(), ConfigError> {
        while let Some(event) = self.events.pop() {
            self.handle_event(&event, report)?;
            if !event.is_internal() {
                report.events.push(event);
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: &MatchEvent, report: &mut TickReport) -> Result<(), ConfigError> {
        match *event {
            MatchEvent::CollisionStart { a: EntityId::Ball, b } | MatchEvent::CollisionStart { a: b, b: EntityId::Ball } => {
                self.on_ball_contact(b, report)?;
            }
            MatchEvent::Goal { scoring } => self.on_goal(scoring, report),
            MatchEvent::BallOutOfBounds => {
                if self.phase != MatchPhase::Resetting {
                    warn!(x = self.ball.position.x, y = self.ball.position.y, "ball out of bounds");
                    self.reset();
                }
            }
            MatchEvent::Reset { .. } => {
                self.contacts.clear();
                for team in [&mut self.home, &mut self.away] {
                    team.players.iter_mut().for_each(|p| p.on_reset());
                    team.goalie.on_reset();
                }
                self.referee.on_reset();
                if self.referee.blow_whistle(false, self.phase)? {
                    report.sounds.push(SoundCue::Whistle);
                }
            }
            MatchEvent::Start => {
                for team in [&mut self.home, &mut self.away] {
                    team.players.iter_mut().for_each(|p| p.on_start());
                    team.goalie.on_start();
                }
                self.referee.on_start();
            }
            MatchEvent::GameOver { winner, verdict } => {
                info!(%winner, %verdict, flavor = verdict.flavor_text(), "game over");
            }
            _ => {}
        }
        Ok(())
    }

    fn on_ball_contact(&mut self, other: EntityId, report: &mut TickReport) -> Result<(), ConfigError> {
        match other {
            EntityId::Player { id } => self.set_possession(id.team),
            EntityId::Goalie { team } => {
                self.set_possession(team);
                if self.team(team).goalie.is_blocking() {
                    self.ball.reflect();
                }
            }
            EntityId::Referee => {
                if let Some(kick) = self.referee.kick_request(self.ball.position) {
                    let accepted = self.ball.kick(kick.impulse, kick.force);
                    if accepted {
                        report.sounds.push(SoundCue::Kick);
                    }
                    self.referee.kick_resolved(kick, accepted)?;
                }
            }
            EntityId::GoalLine { team } => {
                if self.phase.is_live() {
                    self.events.push(MatchEvent::Goal { scoring: team.opposite() });
                }
            }
            EntityId::Ball | EntityId::Truck => {}
        }
        Ok(())
    }

    fn set_possession(&mut self, team: TeamSide) {
        if self.last_possession != Some(team) {
            self.last_possession = Some(team);
            self.events.push(MatchEvent::PossessionChanged { team });
        }
    }

    fn on_goal(&mut self, scoring: TeamSide, report: &mut TickReport) {
        self.phase = MatchPhase::GoalScored;
        self.team_mut(scoring).score += 1;
        self.set_possession(scoring);
        self.events.push(MatchEvent::ScoreChanged { home: self.home.score, away: self.away.score });
        report.sounds.push(SoundCue::Goal);
        info!(%scoring, home = self.home.score, away = self.away.score, "goal");

        if self.score(scoring) >= self.config.rules.score_to_win {
            let verdict = Verdict::from_suspicion(self.referee.suspicion(), &self.config.referee);
            self.game_over = true;
            self.game_has_started = false;
            self.verdict = Some(verdict);
            self.events.push(MatchEvent::GameOver { winner: scoring, verdict });
        }
        self.reset();
    }
}
