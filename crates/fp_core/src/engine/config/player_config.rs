//! Team player tuning: role templates, stamina economy, kick rules.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::engine::types::Role;

/// Per-role attributes. Defenders carry the most stamina and the least
/// speed; forwards the least stamina and the most power.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct RoleTemplate {
    #[validate(range(min = 1.0))]
    pub max_stamina: f32,
    #[validate(range(min = 1.0))]
    pub move_speed: f32,
    #[validate(range(min = 1.0))]
    pub kick_power: f32,
}

impl RoleTemplate {
    pub const fn new(max_stamina: f32, move_speed: f32, kick_power: f32) -> Self {
        Self { max_stamina, move_speed, kick_power }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
#[validate(schema(function = "validate_stamina_economy"))]
pub struct TeamPlayerConfig {
    // === Role templates ===
    #[validate]
    pub defender: RoleTemplate,
    #[validate]
    pub midfielder: RoleTemplate,
    #[validate]
    pub forward: RoleTemplate,

    // === Speed factors ===
    /// Chase speed multiplier while sprinting (default: 1.25)
    #[validate(range(min = 1.0))]
    pub sprint_speed_factor: f32,
    /// Chase speed multiplier while stamina refills (default: 0.85)
    #[validate(range(min = 0.0, max = 1.0))]
    pub recovering_speed_factor: f32,
    /// Sprint is attempted within this distance of the ball (default: 200)
    #[validate(range(min = 0.0))]
    pub sprint_engage_distance: f32,

    // === Stamina economy (per ms at move speed 100) ===
    /// default: 0.02
    #[validate(range(min = 0.0))]
    pub stamina_regen_rate: f32,
    /// default: 0.05
    #[validate(range(min = 0.0))]
    pub stamina_depletion_rate: f32,

    // === Kicking ===
    /// Kick is considered within this distance of the ball (default: 10)
    #[validate(range(min = 0.0))]
    pub kick_distance: f32,
    /// Faster balls can't be kicked (default: 150)
    #[validate(range(min = 0.0))]
    pub max_controllable_ball_speed: f32,
    /// Forwards double power beyond this distance to the shot target (default: 150)
    #[validate(range(min = 0.0))]
    pub long_range_distance: f32,
    /// default: 2.0
    #[validate(range(min = 1.0))]
    pub long_range_multiplier: f32,
    /// default: 1.5
    #[validate(range(min = 1.0))]
    pub sprint_kick_multiplier: f32,
    /// Lower bound of the random shot magnitude ratio (default: 0.8)
    #[validate(range(min = 0.0, max = 1.0))]
    pub shot_power_min_ratio: f32,
    /// Defenders clear this far ahead of the ball (default: 200)
    #[validate(range(min = 0.0))]
    pub clear_distance: f32,

    // === Pain ===
    /// Knockback speed when hit (default: 150)
    #[validate(range(min = 0.0))]
    pub knockback_power: f32,
    /// Pain clip loops before control returns (default: 2)
    #[validate(range(min = 1))]
    pub pain_loops: u32,

    /// Start positions stay this far inside the own half (default: 24)
    #[validate(range(min = 0.0))]
    pub start_line_margin: f32,
}

impl Default for TeamPlayerConfig {
    fn default() -> Self {
        Self {
            defender: RoleTemplate::new(150.0, 55.0, 250.0),
            midfielder: RoleTemplate::new(100.0, 60.0, 300.0),
            forward: RoleTemplate::new(50.0, 70.0, 350.0),

            sprint_speed_factor: 1.25,
            recovering_speed_factor: 0.85,
            sprint_engage_distance: 200.0,

            stamina_regen_rate: 0.02,
            stamina_depletion_rate: 0.05,

            kick_distance: 10.0,
            max_controllable_ball_speed: 150.0,
            long_range_distance: 150.0,
            long_range_multiplier: 2.0,
            sprint_kick_multiplier: 1.5,
            shot_power_min_ratio: 0.8,
            clear_distance: 200.0,

            knockback_power: 150.0,
            pain_loops: 2,

            start_line_margin: 24.0,
        }
    }
}

impl TeamPlayerConfig {
    /// Template for an outfield role. Non-outfield roles fall back to the
    /// midfielder template.
    pub fn template(&self, role: Role) -> RoleTemplate {
        match role {
            Role::Defender => self.defender,
            Role::Forward => self.forward,
            _ => self.midfielder,
        }
    }
}

fn validate_stamina_economy(cfg: &TeamPlayerConfig) -> Result<(), ValidationError> {
    // A sprint has to cost more than standing still gives back.
    if cfg.stamina_depletion_rate > cfg.stamina_regen_rate {
        Ok(())
    } else {
        Err(ValidationError::new("depletion_not_above_regen"))
    }
}
