//! Match rules

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// How much stamina each team player starts the match with.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum InitialStamina {
    #[default]
    Full,
    /// Uniform in `[min, 1.0] * max_stamina`
    RandomFraction { min: f32 },
}

fn validate_initial_stamina(value: &InitialStamina) -> Result<(), ValidationError> {
    match value {
        InitialStamina::Full => Ok(()),
        InitialStamina::RandomFraction { min } if (0.0..=1.0).contains(min) => Ok(()),
        InitialStamina::RandomFraction { .. } => Err(ValidationError::new("fraction_out_of_range")),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RulesConfig {
    /// First team to this many goals wins (default: 3)
    #[validate(range(min = 1))]
    pub score_to_win: u32,
    /// Kickoff spot shift toward the half of the team to kick off (default: 16)
    #[validate(range(min = 0.0))]
    pub kickoff_offset: f32,
    /// Speed of the ball walking back to the kickoff spot (default: 300)
    #[validate(range(min = 1.0))]
    pub reset_ball_speed: f32,
    #[validate(custom = "validate_initial_stamina")]
    pub initial_stamina: InitialStamina,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            score_to_win: 3,
            kickoff_offset: 16.0,
            reset_ball_speed: 300.0,
            initial_stamina: InitialStamina::Full,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = RulesConfig::default();
        assert_eq!(rules.score_to_win, 3);
        assert!(rules.validate().is_ok());
    }

    #[test]
    fn test_zero_score_to_win_rejected() {
        let rules = RulesConfig { score_to_win: 0, ..RulesConfig::default() };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_initial_stamina_range() {
        let rules = RulesConfig {
            initial_stamina: InitialStamina::RandomFraction { min: 1.5 },
            ..RulesConfig::default()
        };
        assert!(rules.validate().is_err());
    }

    #[test]
    fn test_initial_stamina_yaml() {
        let parsed: InitialStamina = serde_yaml::from_str("mode: random_fraction\nmin: 0.5\n").unwrap();
        assert_eq!(parsed, InitialStamina::RandomFraction { min: 0.5 });
    }
}
