//! Ball physics parameters

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct BallConfig {
    /// Velocity fraction lost per tick (default: 0.05)
    #[validate(range(min = 0.0, max = 1.0))]
    pub friction: f32,
    /// Per-axis speed clamp (default: 500)
    #[validate(range(min = 1.0))]
    pub max_speed: f32,
    /// Minimum time between two non-forced kicks, ms (default: 500)
    #[validate(range(min = 0.0))]
    pub kick_throttle_ms: f32,
    /// Collider radius (default: 8)
    #[validate(range(min = 1.0))]
    pub radius: f32,
    /// Restitution against walls and posts (default: 0.5)
    #[validate(range(min = 0.0, max = 1.0))]
    pub bounciness: f32,
    /// Vertical kick impulse scale faking perspective (default: 0.6)
    #[validate(range(min = 0.0, max = 1.0))]
    pub perspective_y_scale: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            friction: 0.05,
            max_speed: 500.0,
            kick_throttle_ms: 500.0,
            radius: 8.0,
            bounciness: 0.5,
            perspective_y_scale: 0.6,
        }
    }
}
