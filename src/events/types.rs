//! Event type definitions

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::GameplayTuning;

/// Fire-and-forget presentation cue (audio/VFX hook)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Shoot,
    Goal,
    Buzzer,
    RimHit,
}

impl Cue {
    pub fn name(&self) -> &'static str {
        match self {
            Cue::Shoot => "shoot",
            Cue::Goal => "goal",
            Cue::Buzzer => "buzzer",
            Cue::RimHit => "rim-hit",
        }
    }
}

impl std::fmt::Display for Cue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Serializable triple for positions and velocities
pub type Triple = (f32, f32, f32);

pub fn triple(v: Vec3) -> Triple {
    (v.x, v.y, v.z)
}

/// Everything the session reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // === Session Events ===
    /// Session started (once per GameSession)
    SessionStart {
        session_id: String, // UUID v4
        timestamp: String,  // RFC 3339
    },
    /// Tuning snapshot (logged after session start and on hot reload)
    Config(Box<GameplayTuning>),

    // === Shooting Events ===
    ChargeStart,
    ShotRelease {
        origin: Triple,
        power: f32,
        flight_time: f32,
        velocity: Triple,
    },
    /// Released inside the dead zone; power in percent
    ShotCancelled { power: f32 },
    LockoutEnded,

    // === Scoring Events ===
    Goal { points: u32, score: u32, combo: u32 },
    /// Basket during an in-flight reset sequence
    GoalIgnored,
    RimHit { speed: f32 },

    // === Clock Events ===
    Violation,
    BallReset,
    ClockResumed { shot_clock: f32 },
}

impl GameEvent {
    /// Get the event type code for compact serialization
    pub fn type_code(&self) -> &'static str {
        match self {
            GameEvent::SessionStart { .. } => "SE",
            GameEvent::Config(_) => "CF",
            GameEvent::ChargeStart => "CS",
            GameEvent::ShotRelease { .. } => "SH",
            GameEvent::ShotCancelled { .. } => "SC",
            GameEvent::LockoutEnded => "LE",
            GameEvent::Goal { .. } => "G",
            GameEvent::GoalIgnored => "GI",
            GameEvent::RimHit { .. } => "RH",
            GameEvent::Violation => "V",
            GameEvent::BallReset => "BR",
            GameEvent::ClockResumed { .. } => "CR",
        }
    }

    /// Look up an event code (as used by scenario expectations)
    pub fn is_known_code(code: &str) -> bool {
        matches!(
            code,
            "SE" | "CF" | "CS" | "SH" | "SC" | "LE" | "G" | "GI" | "RH" | "V" | "BR" | "CR"
        )
    }

    /// Presentation cue raised by this event, if any
    pub fn cue(&self) -> Option<Cue> {
        match self {
            GameEvent::ShotRelease { .. } => Some(Cue::Shoot),
            GameEvent::Goal { .. } => Some(Cue::Goal),
            GameEvent::Violation => Some(Cue::Buzzer),
            GameEvent::RimHit { .. } => Some(Cue::RimHit),
            _ => None,
        }
    }
}
