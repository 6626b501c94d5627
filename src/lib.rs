//! Hoopshot - a single-ball arcade basketball core built with Bevy
//!
//! The gameplay core (trajectory solver, input aggregation, ball controller,
//! scoring sensor, match clock) is plain Rust driven by `GameSession`. The
//! Bevy modules (`world`, `ui`, `session::systems`) only host it in a window.

// Core modules
pub mod config_watcher;
pub mod constants;
pub mod debug_logging;
pub mod error;
pub mod events;
pub mod helpers;
pub mod schedule;
pub mod simulation;
pub mod snapshot;
pub mod testing;
pub mod tuning;

// Game logic modules
pub mod ball;
pub mod input;
pub mod physics;
pub mod scoring;
pub mod session;
pub mod shooting;
pub mod ui;
pub mod world;

// Re-export commonly used types for convenience
pub use ball::{Ball, BallController, BallState, ControllerOutcome, ControllerPhase, ShotInfo};
pub use config_watcher::ConfigWatcher;
pub use constants::*;
pub use error::{ConfigError, PhysicsError, SetupError};
pub use events::{BusEvent, Cue, EventBus, GameEvent, serialize_event};
pub use helpers::*;
pub use input::{ChargeSource, Direction, InputAggregator, InputFrame, StickSource};
pub use physics::{BodyHandle, BodyTag, CollisionEvent, KinematicWorld, PhysicsWorld};
pub use scoring::{ClockPhase, ClockSignal, MatchClock, MatchState, ScoreEvent, ScoringSensor};
pub use session::{ActiveSession, GameSession, LatestSnapshot};
pub use shooting::{ShotCharge, ShotRequest};
pub use snapshot::GameSnapshot;
pub use tuning::GameplayTuning;
pub use ui::{BannerText, ChargeGaugeBackground, ChargeGaugeFill, ScoreClockText};
