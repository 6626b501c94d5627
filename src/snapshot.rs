//! Render snapshot - the read-only view handed to presentation each tick

use serde::Serialize;

use crate::events::Triple;

/// Everything presentation needs for one frame. Owns no decisions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    pub frame: u64,
    /// Seconds since session start
    pub time: f64,
    pub ball_position: Triple,
    pub ball_velocity: Triple,
    pub ball_spin: Triple,
    pub charging: bool,
    /// Charge level in [0, 100]
    pub power_percent: f32,
    pub shooting: bool,
    pub score: u32,
    pub shot_clock: f32,
    pub paused: bool,
    pub combo: u32,
    /// Celebration in progress
    pub goal_effect: bool,
    /// Shot clock violation in progress
    pub violation: bool,
}

impl GameSnapshot {
    /// Compact JSON for debug dumps
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Horizontal ball speed (court plane)
    pub fn ball_speed(&self) -> f32 {
        let (x, _, z) = self.ball_velocity;
        (x * x + z * z).sqrt()
    }
}
