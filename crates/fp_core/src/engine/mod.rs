//! Simulation engine
//!
//! Leaves first: geometry and timing, then the physical records (ball,
//! bodies, field), the agents that steer them, and finally the match
//! orchestrator that owns everything and drives one tick at a time.

pub mod animation;
pub mod autopilot;
pub mod ball;
pub mod behaviors;
pub mod body;
pub mod config;
pub mod direction_queue;
pub mod events;
pub mod field;
pub mod geometry;
pub mod icecream_truck;
pub mod input;
pub mod match_sim;
pub mod physics_constants;
pub mod scheduler;
pub mod snapshot;
pub mod steering;
pub mod timestep;
pub mod types;

pub use autopilot::RefereeAutopilot;
pub use config::EngineConfig;
pub use events::{MatchEvent, SoundCue};
pub use input::{Control, InputFrame, InputState, NoInput};
pub use match_sim::{Match, MatchPhase, TickReport, Verdict};
pub use snapshot::MatchSnapshot;
pub use types::{EntityId, PlayerId, Role, TeamSide};
