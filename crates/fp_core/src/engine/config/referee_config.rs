//! Referee and ice-cream truck tuning

use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct RefereeConfig {
    /// default: 125
    #[validate(range(min = 0.0))]
    pub move_speed: f32,
    /// Punch reaches the nearest agent within this distance (default: 24)
    #[validate(range(min = 0.0))]
    pub punch_radius: f32,
    /// Kick power on ball contact (default: 500)
    #[validate(range(min = 0.0))]
    pub kick_power: f32,

    // === Suspicion ===
    pub punch_suspicion: u32,
    pub kick_suspicion: u32,
    pub whistle_suspicion: u32,
    pub bribe_suspicion: u32,

    // === Verdict thresholds ===
    pub murmurs_threshold: u32,
    pub scandal_threshold: u32,
    pub banned_threshold: u32,
}

impl Default for RefereeConfig {
    fn default() -> Self {
        Self {
            move_speed: 125.0,
            punch_radius: 24.0,
            kick_power: 500.0,

            punch_suspicion: 10,
            kick_suspicion: 5,
            whistle_suspicion: 15,
            bribe_suspicion: 25,

            murmurs_threshold: 20,
            scandal_threshold: 50,
            banned_threshold: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct TruckConfig {
    /// Spawn the truck at match start
    pub enabled: bool,
    /// Truck pops up when the referee is this close (default: 50)
    #[validate(range(min = 0.0))]
    pub popup_radius: f32,
    /// Bribing works within this distance (default: 50)
    #[validate(range(min = 0.0))]
    pub bribe_radius: f32,
    /// How long the away goalie stays lured, ms (default: 20000)
    #[validate(range(min = 0.0))]
    pub distraction_ms: f32,
    /// Delay before ice cream is back in stock, ms (default: 20000)
    #[validate(range(min = 0.0))]
    pub restock_ms: f32,
}

impl Default for TruckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            popup_radius: 50.0,
            bribe_radius: 50.0,
            distraction_ms: 20_000.0,
            restock_ms: 20_000.0,
        }
    }
}
