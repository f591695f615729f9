//! # Engine Configuration Module
//!
//! Every tuning number of the match lives here.
//!
//! ## Purpose
//! - Keep gameplay constants out of behavior code
//! - Load overrides from YAML / JSON (missing keys fall back to defaults)
//! - Presets (default, arcade, deterministic)
//!
//! ## Usage
//! ```rust
//! use fp_core::engine::config::EngineConfig;
//!
//! let config = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.ball.max_speed > config.ball.max_speed);
//! ```

mod animation_config;
mod ball_config;
mod field_config;
mod goalie_config;
mod player_config;
mod referee_config;
mod rules_config;

pub use animation_config::{AnimationLibrary, GOALIE_CLIPS, REFEREE_CLIPS, TEAM_PLAYER_CLIPS};
pub use ball_config::BallConfig;
pub use field_config::FieldConfig;
pub use goalie_config::GoalieConfig;
pub use player_config::{RoleTemplate, TeamPlayerConfig};
pub use referee_config::{RefereeConfig, TruckConfig};
pub use rules_config::{InitialStamina, RulesConfig};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_finite"))]
pub struct EngineConfig {
    #[validate]
    pub ball: BallConfig,
    #[validate]
    pub field: FieldConfig,
    #[validate]
    pub team_player: TeamPlayerConfig,
    #[validate]
    pub goalie: GoalieConfig,
    #[validate]
    pub referee: RefereeConfig,
    #[validate]
    pub truck: TruckConfig,
    #[validate]
    pub rules: RulesConfig,
    /// Checked against each agent's required clips at match setup
    pub animations: AnimationLibrary,
    /// Per-tick trace logging and extra decision logs
    pub debug: bool,
}

impl EngineConfig {
    /// Faster ball, longer matches, uneven starting legs.
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.ball.friction = 0.03;
        cfg.ball.max_speed = 600.0;
        cfg.team_player.sprint_speed_factor = 1.4;
        cfg.rules.score_to_win = 5;
        cfg.rules.initial_stamina = InitialStamina::RandomFraction { min: 0.5 };
        cfg
    }

    /// Tests: full shot power and full stamina, no random magnitudes.
    pub fn deterministic() -> Self {
        let mut cfg = Self::default();
        cfg.team_player.shot_power_min_ratio = 1.0;
        cfg.rules.initial_stamina = InitialStamina::Full;
        cfg
    }

    pub fn preset(name: &str) -> Option<Self> {
        match name {
            "default" => Some(Self::default()),
            "arcade" => Some(Self::arcade()),
            "deterministic" => Some(Self::deterministic()),
            _ => None,
        }
    }

    /// Run the field validators and return the config unchanged.
    pub fn validated(self) -> Result<Self, ConfigError> {
        self.validate()?;
        Ok(self)
    }

    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(yaml)?;
        cfg.validated()
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(json)?;
        cfg.validated()
    }

    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// Range checks let NaN through, so every tuning float is checked here.
fn validate_finite(cfg: &EngineConfig) -> Result<(), ValidationError> {
    let EngineConfig { ball, field, team_player: tp, goalie: gk, referee, truck, rules, .. } = cfg;
    let templates = [tp.defender, tp.midfielder, tp.forward];
    let stamina_min = match rules.initial_stamina {
        InitialStamina::Full => 1.0,
        InitialStamina::RandomFraction { min } => min,
    };

    let values = [
        ball.friction,
        ball.max_speed,
        ball.kick_throttle_ms,
        ball.radius,
        ball.bounciness,
        ball.perspective_y_scale,
        field.left,
        field.right,
        field.top,
        field.bottom,
        field.wall_margin,
        tp.sprint_speed_factor,
        tp.recovering_speed_factor,
        tp.sprint_engage_distance,
        tp.stamina_regen_rate,
        tp.stamina_depletion_rate,
        tp.kick_distance,
        tp.max_controllable_ball_speed,
        tp.long_range_distance,
        tp.long_range_multiplier,
        tp.sprint_kick_multiplier,
        tp.shot_power_min_ratio,
        tp.clear_distance,
        tp.knockback_power,
        tp.start_line_margin,
        gk.kick_power,
        gk.track_speed,
        gk.distracted_speed,
        gk.distracted_stop_distance,
        gk.line_offset,
        gk.mouth_top_inset,
        gk.mouth_bottom_inset,
        gk.middle_offset,
        gk.lined_up_tolerance,
        gk.slide_duration_ms,
        gk.slide_speed,
        gk.slide_friction,
        gk.slide_trigger_speed,
        gk.slide_min_x_distance,
        gk.slide_max_x_distance,
        gk.clear_radius,
        gk.clear_max_ball_speed,
        gk.knockback_power,
        referee.move_speed,
        referee.punch_radius,
        referee.kick_power,
        truck.popup_radius,
        truck.bribe_radius,
        truck.distraction_ms,
        truck.restock_ms,
        rules.kickoff_offset,
        rules.reset_ball_speed,
        stamina_min,
    ];
    let template_values = templates.iter().flat_map(|t| [t.max_stamina, t.move_speed, t.kick_power]);

    if values.into_iter().chain(template_values).all(f32::is_finite) {
        Ok(())
    } else {
        Err(ValidationError::new("non_finite_value"))
    }
}

// ========== Tests ==========

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = EngineConfig::default();
        assert!((cfg.ball.friction - 0.05).abs() < 1e-6);
        assert_eq!(cfg.rules.score_to_win, 3);
        assert!(!cfg.debug);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_arcade_is_livelier() {
        let base = EngineConfig::default();
        let arcade = EngineConfig::arcade();
        assert!(arcade.ball.friction < base.ball.friction);
        assert!(arcade.rules.score_to_win > base.rules.score_to_win);
        assert!(arcade.validate().is_ok());
    }

    #[test]
    fn test_deterministic_removes_shot_spread() {
        let det = EngineConfig::deterministic();
        assert_eq!(det.team_player.shot_power_min_ratio, 1.0);
        assert_eq!(det.rules.initial_stamina, InitialStamina::Full);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let cfg = EngineConfig::from_yaml_str("rules:\n  score_to_win: 7\ndebug: true\n").unwrap();
        assert_eq!(cfg.rules.score_to_win, 7);
        assert!(cfg.debug);
        assert_eq!(cfg.ball, BallConfig::default());
    }

    #[test]
    fn test_invalid_yaml_value_rejected() {
        let err = EngineConfig::from_yaml_str("ball:\n  friction: 2.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_nan_rejected() {
        let err = EngineConfig::from_yaml_str("team_player:\n  shot_power_min_ratio: .nan\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));

        let mut cfg = EngineConfig::default();
        cfg.field.right = f32::NAN;
        assert!(cfg.validate().is_err());

        let mut cfg = EngineConfig::default();
        cfg.goalie.slide_speed = f32::INFINITY;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let cfg = EngineConfig::arcade();
        let yaml = cfg.to_yaml_string().unwrap();
        let parsed = EngineConfig::from_yaml_str(&yaml).unwrap();
        assert_eq!(parsed, cfg);

        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), cfg);
    }

    #[test]
    fn test_preset_lookup() {
        assert!(EngineConfig::preset("arcade").is_some());
        assert!(EngineConfig::preset("realistic").is_none());
    }
}
