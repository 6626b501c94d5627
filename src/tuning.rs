//! Global gameplay tuning settings
//!
//! Every numeric constant the core consumes is collected here so it can be
//! supplied at initialization (and hot-reloaded from JSON). Each component
//! receives only its own slice via `controller()`, `flight()`, `sensor()`
//! and `clock()`.

use bevy::log::{info, warn};
use bevy::math::Vec3;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::constants::*;
use crate::error::{ConfigError, SetupError};
use crate::helpers::vec3_from;

/// Serializable tuning values stored in config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayTuning {
    // Physics
    pub gravity: f32,
    pub ball_radius: f32,
    pub ball_mass: f32,
    pub ball_restitution: f32,
    pub ball_spawn: [f32; 3],
    pub hoop_target: [f32; 3],
    // Movement
    pub move_speed: f32,
    pub move_accel: f32,
    pub move_decel: f32,
    pub stick_deadzone: f32,
    // Shooting
    pub charge_rate: f32,
    pub min_shot_power: f32,
    pub shot_lockout: f32,
    pub backspin_rate: f32,
    pub flight_time_base: f32,
    pub flight_time_per_meter: f32,
    pub flight_time_power_scale: f32,
    pub flight_time_neutral_power: f32,
    pub flight_time_min: f32,
    pub flight_time_max: f32,
    // Scoring
    pub score_cooldown: f32,
    pub require_descending: bool,
    pub points_per_basket: u32,
    pub combo_window: f32,
    pub combo_threshold: u32,
    pub combo_multiplier: u32,
    pub rim_hit_min_speed: f32,
    // Shot clock
    pub shot_clock_max: f32,
    pub celebration_duration: f32,
    pub settle_delay: f32,
}

impl Default for GameplayTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            ball_radius: BALL_RADIUS,
            ball_mass: BALL_MASS,
            ball_restitution: BALL_RESTITUTION,
            ball_spawn: BALL_SPAWN.to_array(),
            hoop_target: HOOP_CENTER.to_array(),
            move_speed: MOVE_SPEED,
            move_accel: MOVE_ACCEL,
            move_decel: MOVE_DECEL,
            stick_deadzone: STICK_DEADZONE,
            charge_rate: CHARGE_RATE,
            min_shot_power: MIN_SHOT_POWER,
            shot_lockout: SHOT_LOCKOUT,
            backspin_rate: BACKSPIN_RATE,
            flight_time_base: FLIGHT_TIME_BASE,
            flight_time_per_meter: FLIGHT_TIME_PER_METER,
            flight_time_power_scale: FLIGHT_TIME_POWER_SCALE,
            flight_time_neutral_power: FLIGHT_TIME_NEUTRAL_POWER,
            flight_time_min: FLIGHT_TIME_MIN,
            flight_time_max: FLIGHT_TIME_MAX,
            score_cooldown: SCORE_COOLDOWN,
            require_descending: true,
            points_per_basket: POINTS_PER_BASKET,
            combo_window: COMBO_WINDOW,
            combo_threshold: COMBO_THRESHOLD,
            combo_multiplier: COMBO_MULTIPLIER,
            rim_hit_min_speed: RIM_HIT_MIN_SPEED,
            shot_clock_max: SHOT_CLOCK_MAX,
            celebration_duration: CELEBRATION_DURATION,
            settle_delay: SETTLE_DELAY,
        }
    }
}

/// Flight-time heuristic coefficients for the trajectory solver
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightTimeParams {
    pub base: f32,
    pub per_meter: f32,
    pub power_scale: f32,
    pub neutral_power: f32,
    pub min: f32,
    pub max: f32,
}

impl Default for FlightTimeParams {
    fn default() -> Self {
        GameplayTuning::default().flight()
    }
}

/// Values consumed by the player-ball controller
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerTuning {
    pub gravity: f32,
    pub move_speed: f32,
    pub move_accel: f32,
    pub move_decel: f32,
    pub charge_rate: f32,
    pub min_shot_power: f32,
    pub shot_lockout: f32,
    pub backspin_rate: f32,
    pub ball_spawn: Vec3,
    pub hoop_target: Vec3,
    pub flight: FlightTimeParams,
}

impl Default for ControllerTuning {
    fn default() -> Self {
        GameplayTuning::default().controller()
    }
}

/// Values consumed by the scoring sensor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorTuning {
    pub cooldown: f32,
    pub require_descending: bool,
}

impl Default for SensorTuning {
    fn default() -> Self {
        GameplayTuning::default().sensor()
    }
}

/// Values consumed by the match clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTuning {
    pub shot_clock_max: f32,
    pub points_per_basket: u32,
    pub combo_window: f32,
    pub combo_threshold: u32,
    pub combo_multiplier: u32,
    pub celebration_duration: f32,
    pub settle_delay: f32,
}

impl Default for ClockTuning {
    fn default() -> Self {
        GameplayTuning::default().clock()
    }
}

impl GameplayTuning {
    pub fn flight(&self) -> FlightTimeParams {
        FlightTimeParams {
            base: self.flight_time_base,
            per_meter: self.flight_time_per_meter,
            power_scale: self.flight_time_power_scale,
            neutral_power: self.flight_time_neutral_power,
            min: self.flight_time_min,
            max: self.flight_time_max,
        }
    }

    pub fn controller(&self) -> ControllerTuning {
        ControllerTuning {
            gravity: self.gravity,
            move_speed: self.move_speed,
            move_accel: self.move_accel,
            move_decel: self.move_decel,
            charge_rate: self.charge_rate,
            min_shot_power: self.min_shot_power,
            shot_lockout: self.shot_lockout,
            backspin_rate: self.backspin_rate,
            ball_spawn: vec3_from(self.ball_spawn),
            hoop_target: vec3_from(self.hoop_target),
            flight: self.flight(),
        }
    }

    pub fn sensor(&self) -> SensorTuning {
        SensorTuning {
            cooldown: self.score_cooldown,
            require_descending: self.require_descending,
        }
    }

    pub fn clock(&self) -> ClockTuning {
        ClockTuning {
            shot_clock_max: self.shot_clock_max,
            points_per_basket: self.points_per_basket,
            combo_window: self.combo_window,
            combo_threshold: self.combo_threshold,
            combo_multiplier: self.combo_multiplier,
            celebration_duration: self.celebration_duration,
            settle_delay: self.settle_delay,
        }
    }

    /// Reject values that would break a core invariant.
    pub fn validate(&self) -> Result<(), SetupError> {
        let finite = [
            self.gravity,
            self.ball_radius,
            self.ball_mass,
            self.move_speed,
            self.move_accel,
            self.move_decel,
            self.charge_rate,
            self.min_shot_power,
            self.shot_lockout,
            self.flight_time_min,
            self.flight_time_max,
            self.score_cooldown,
            self.shot_clock_max,
        ];
        if finite.iter().any(|v| !v.is_finite())
            || self
                .ball_spawn
                .iter()
                .chain(self.hoop_target.iter())
                .any(|v| !v.is_finite())
        {
            return Err(SetupError::InvalidTuning("non-finite value".into()));
        }
        if self.gravity <= 0.0 {
            return Err(SetupError::InvalidTuning(format!(
                "gravity must be positive (got {})",
                self.gravity
            )));
        }
        if self.ball_radius <= 0.0 || self.ball_mass <= 0.0 {
            return Err(SetupError::InvalidTuning(
                "ball radius and mass must be positive".into(),
            ));
        }
        if self.flight_time_min <= 0.0 || self.flight_time_min > self.flight_time_max {
            return Err(SetupError::InvalidTuning(format!(
                "flight time bounds must satisfy 0 < min <= max (got {}..{})",
                self.flight_time_min, self.flight_time_max
            )));
        }
        if !(0.0..100.0).contains(&self.min_shot_power) {
            return Err(SetupError::InvalidTuning(format!(
                "min_shot_power must be within [0, 100) (got {})",
                self.min_shot_power
            )));
        }
        if self.shot_clock_max <= 0.0 {
            return Err(SetupError::InvalidTuning(
                "shot_clock_max must be positive".into(),
            ));
        }
        if self.move_speed < 0.0 || self.move_accel <= 0.0 || self.move_decel <= 0.0 {
            return Err(SetupError::InvalidTuning(
                "movement speed must be non-negative and accel/decel positive".into(),
            ));
        }
        if self.score_cooldown < 0.0 || self.celebration_duration < 0.0 || self.settle_delay < 0.0
        {
            return Err(SetupError::InvalidTuning("delays must be non-negative".into()));
        }
        Ok(())
    }

    /// Load tuning from a JSON file. Missing fields take their defaults.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load tuning, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            info!("No {} found, using default tuning", path.display());
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(tuning) => match tuning.validate() {
                Ok(()) => {
                    info!("Loaded gameplay tuning from {}", path.display());
                    tuning
                }
                Err(e) => {
                    warn!("Rejected {}: {}, using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to load {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save tuning to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, json)?;
        info!("Saved gameplay tuning to {}", path.display());
        Ok(())
    }
}
