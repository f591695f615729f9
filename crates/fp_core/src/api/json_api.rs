use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::engine::autopilot::RefereeAutopilot;
use crate::engine::config::EngineConfig;
use crate::engine::input::NoInput;
use crate::engine::match_sim::{Match, TickReport, Verdict};
use crate::engine::timestep::FRAME_DT_MS;
use crate::engine::types::TeamSide;
use crate::error::{MatchError, Result};

pub const SCHEMA_VERSION: u8 = 1;

/// Five minutes at 60 ticks per second.
const DEFAULT_MAX_TICKS: u64 = 60 * 60 * 5;

fn default_schema_version() -> u8 {
    SCHEMA_VERSION
}

fn default_max_ticks() -> u64 {
    DEFAULT_MAX_TICKS
}

fn default_dt_ms() -> f32 {
    FRAME_DT_MS
}

/// Who holds the whistle in a headless match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RefereeMode {
    /// Stands at the start position and never touches a control.
    Idle,
    /// Follows the ball and punches opponents of `favored`.
    Autopilot {
        #[serde(default)]
        favored: Option<TeamSide>,
    },
}

impl Default for RefereeMode {
    fn default() -> Self {
        RefereeMode::Autopilot { favored: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    pub seed: u64,
    /// Hard stop even if nobody has won yet
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
    #[serde(default = "default_dt_ms")]
    pub dt_ms: f32,
    #[serde(default)]
    pub referee: RefereeMode,
    /// Engine tuning; `None` uses the defaults
    #[serde(default)]
    pub config: Option<EngineConfig>,
}

impl MatchRequest {
    pub fn new(seed: u64) -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            seed,
            max_ticks: DEFAULT_MAX_TICKS,
            dt_ms: FRAME_DT_MS,
            referee: RefereeMode::default(),
            config: None,
        }
    }

    fn check(&self) -> Result<()> {
        if self.schema_version != SCHEMA_VERSION {
            return Err(MatchError::InvalidRequest(format!(
                "unsupported schema version: {}",
                self.schema_version
            )));
        }
        if !self.dt_ms.is_finite() || self.dt_ms <= 0.0 {
            return Err(MatchError::InvalidRequest(format!("dt_ms must be positive, got {}", self.dt_ms)));
        }
        if self.max_ticks == 0 {
            return Err(MatchError::InvalidRequest("max_ticks must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub tick: u64,
    pub elapsed_ms: f64,
    pub scoring: TeamSide,
    /// Score right after this goal
    pub score_home: u32,
    pub score_away: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResponse {
    pub seed: u64,
    pub score_home: u32,
    pub score_away: u32,
    /// `None` when `max_ticks` ran out first
    pub winner: Option<TeamSide>,
    pub ticks: u64,
    pub elapsed_ms: f64,
    pub suspicion: u32,
    pub verdict: Option<Verdict>,
    pub goals: Vec<GoalRecord>,
}

pub fn run_match(request: &MatchRequest) -> Result<MatchResponse> {
    run_match_with(request, |_, _| {})
}

/// Play a whole match, handing every tick to `observe` (trace writers,
/// renderers) before moving on.
pub fn run_match_with(request: &MatchRequest, mut observe: impl FnMut(&Match, &TickReport)) -> Result<MatchResponse> {
    request.check()?;
    let config = request.config.clone().unwrap_or_default();
    let mut m = Match::new(config, request.seed)?;
    let mut pilot = match request.referee {
        RefereeMode::Idle => None,
        RefereeMode::Autopilot { favored } => Some(RefereeAutopilot::new(favored)),
    };

    m.start();
    let mut goals = Vec::new();
    while m.tick_count() < request.max_ticks && !m.is_game_over() {
        let report = match pilot.as_mut() {
            Some(pilot) => {
                let world = m.world_view();
                m.tick(request.dt_ms, pilot.next_frame(&world, request.dt_ms))?
            }
            None => m.tick(request.dt_ms, &NoInput)?,
        };
        for scoring in report.goals() {
            debug!(tick = report.tick, %scoring, "goal recorded");
            goals.push(GoalRecord {
                tick: report.tick,
                elapsed_ms: report.elapsed_ms,
                scoring,
                score_home: m.score(TeamSide::Home),
                score_away: m.score(TeamSide::Away),
            });
        }
        observe(&m, &report);
    }

    let response = MatchResponse {
        seed: request.seed,
        score_home: m.score(TeamSide::Home),
        score_away: m.score(TeamSide::Away),
        winner: m.winner(),
        ticks: m.tick_count(),
        elapsed_ms: m.elapsed_ms(),
        suspicion: m.suspicion(),
        verdict: m.verdict(),
        goals,
    };
    info!(
        seed = response.seed,
        ticks = response.ticks,
        home = response.score_home,
        away = response.score_away,
        "match finished"
    );
    Ok(response)
}

/// JSON in, JSON out. Missing request fields take their defaults.
pub fn simulate_match_json(request_json: &str) -> Result<String> {
    let request: MatchRequest = serde_json::from_str(request_json)?;
    let response = run_match(&request)?;
    Ok(serde_json::to_string(&response)?)
}
