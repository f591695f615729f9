//! Goalkeeper tuning

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct GoalieConfig {
    /// Clearing kick power (default: 300)
    #[validate(range(min = 0.0))]
    pub kick_power: f32,
    /// Tracking speed along the line (default: 50)
    #[validate(range(min = 0.0))]
    pub track_speed: f32,
    /// Speed when lured by a distractor or walking back (default: 100)
    #[validate(range(min = 0.0))]
    pub distracted_speed: f32,
    /// Distracted goalie stops this close to the distractor (default: 10)
    #[validate(range(min = 0.0))]
    pub distracted_stop_distance: f32,

    // === Line positioning ===
    /// Line sits this far in front of the net (default: 16)
    pub line_offset: f32,
    /// Tracked y stays this far inside the mouth (default: 16 / 8)
    pub mouth_top_inset: f32,
    pub mouth_bottom_inset: f32,
    /// Middle of the goalie sprite below its anchor (default: 10)
    pub middle_offset: f32,
    /// Ball within this y distance of the middle counts as lined up (default: 5)
    #[validate(range(min = 0.0))]
    pub lined_up_tolerance: f32,

    // === Slide ===
    /// default: 400
    #[validate(range(min = 1.0))]
    pub slide_duration_ms: f32,
    /// default: 300
    #[validate(range(min = 0.0))]
    pub slide_speed: f32,
    /// Velocity fraction lost per tick while sliding (default: 0.1)
    #[validate(range(min = 0.0, max = 1.0))]
    pub slide_friction: f32,
    /// Ball must be faster than this toward the goal (default: 100)
    #[validate(range(min = 0.0))]
    pub slide_trigger_speed: f32,
    /// Ball x distance window for sliding (default: 5..30)
    #[validate(range(min = 0.0))]
    pub slide_min_x_distance: f32,
    #[validate(range(min = 0.0))]
    pub slide_max_x_distance: f32,

    // === Clearing ===
    /// default: 30
    #[validate(range(min = 0.0))]
    pub clear_radius: f32,
    /// Ball slower than this on both axes can be cleared (default: 100)
    #[validate(range(min = 0.0))]
    pub clear_max_ball_speed: f32,

    // === Pain ===
    #[validate(range(min = 0.0))]
    pub knockback_power: f32,
    #[validate(range(min = 1))]
    pub pain_loops: u32,
}

impl Default for GoalieConfig {
    fn default() -> Self {
        Self {
            kick_power: 300.0,
            track_speed: 50.0,
            distracted_speed: 100.0,
            distracted_stop_distance: 10.0,

            line_offset: 16.0,
            mouth_top_inset: 16.0,
            mouth_bottom_inset: 8.0,
            middle_offset: 10.0,
            lined_up_tolerance: 5.0,

            slide_duration_ms: 400.0,
            slide_speed: 300.0,
            slide_friction: 0.1,
            slide_trigger_speed: 100.0,
            slide_min_x_distance: 5.0,
            slide_max_x_distance: 30.0,

            clear_radius: 30.0,
            clear_max_ball_speed: 100.0,

            knockback_power: 150.0,
            pain_loops: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slide_window() {
        let cfg = GoalieConfig::default();
        assert!(cfg.slide_min_x_distance < cfg.slide_max_x_distance);
        assert!(cfg.validate().is_ok());
    }
}
