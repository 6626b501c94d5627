//! Tunable constants for hoopshot
//!
//! All gameplay values are defined here for easy tweaking. Units are meters,
//! seconds and kilograms. Most of these are the defaults for `GameplayTuning`.

use bevy::prelude::*;

// =============================================================================
// ARENA COLORS
// =============================================================================

pub const BACKGROUND_COLOR: Color = Color::srgb(0.07, 0.07, 0.08);
pub const COURT_COLOR: Color = Color::srgb(0.82, 0.71, 0.55); // Tan hardwood
pub const COURT_LINE_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);
pub const BACKBOARD_COLOR: Color = Color::srgb(0.95, 0.95, 0.95);
pub const RIM_COLOR: Color = Color::srgb(1.0, 0.55, 0.0);
pub const POLE_COLOR: Color = Color::srgb(0.2, 0.2, 0.2);
pub const BALL_COLOR: Color = Color::srgb(0.9, 0.32, 0.0);

// =============================================================================
// TEXT/UI COLORS
// =============================================================================

pub const TEXT_PRIMARY: Color = Color::srgb(0.95, 0.9, 0.8);
pub const TEXT_ACCENT: Color = Color::srgb(0.9, 0.75, 0.4);
pub const TEXT_ALERT: Color = Color::srgb(1.0, 0.3, 0.25);

// =============================================================================
// COURT GEOMETRY (FIBA-ish proportions)
// =============================================================================

pub const COURT_SIZE: Vec2 = Vec2::new(15.0, 28.0);
pub const HOOP_HEIGHT: f32 = 3.05;
pub const RIM_RADIUS: f32 = 0.225; // 45cm inner diameter
pub const RIM_TUBE_RADIUS: f32 = 0.02;
pub const RIM_SEGMENTS: usize = 16; // Tube spheres approximating the ring
pub const HOOP_CENTER: Vec3 = Vec3::new(0.0, HOOP_HEIGHT, -11.6);
pub const BACKBOARD_CENTER: Vec3 = Vec3::new(0.0, 3.5, -12.0);
pub const BACKBOARD_SIZE: Vec3 = Vec3::new(1.8, 1.05, 0.1);
pub const POLE_CENTER: Vec3 = Vec3::new(0.0, 1.75, -12.5);

/// Trigger volume sits just beneath the rim plane (top face 5cm below the ring)
pub const SCORE_TRIGGER_CENTER: Vec3 = Vec3::new(0.0, HOOP_HEIGHT - 0.15, -11.6);
pub const SCORE_TRIGGER_HALF_EXTENTS: Vec3 = Vec3::new(0.2, 0.1, 0.2);

// =============================================================================
// BALL PHYSICS
// =============================================================================

pub const GRAVITY: f32 = 9.8;
pub const BALL_RADIUS: f32 = 0.12; // Size 7 ball, 24cm diameter
pub const BALL_MASS: f32 = 0.6;
pub const BALL_RESTITUTION: f32 = 0.7;
pub const BALL_ROLL_FRICTION: f32 = 0.5; // Fraction of horizontal speed lost per second on the floor
pub const RIM_RESTITUTION: f32 = 0.8; // Scales the ball's restitution on rim contact
pub const BACKBOARD_RESTITUTION: f32 = 0.9;
pub const BALL_SPAWN: Vec3 = Vec3::new(0.0, 2.0, -5.0); // Near the free-throw line

pub const PHYSICS_SUBSTEP: f32 = 1.0 / 120.0;
pub const REST_SPEED: f32 = 0.05; // Vertical bounce speed below which the ball settles
pub const CONTACT_EVENT_MIN_SPEED: f32 = 0.3; // Softer contacts are not reported

// =============================================================================
// MOVEMENT
// =============================================================================

pub const MOVE_SPEED: f32 = 4.0; // Per-axis horizontal speed ceiling
pub const MOVE_ACCEL: f32 = 20.0; // Toward input (m/s²)
pub const MOVE_DECEL: f32 = 25.0; // Toward rest when input stops (m/s²)
pub const STICK_DEADZONE: f32 = 0.2;

// =============================================================================
// SHOOTING
// =============================================================================

pub const CHARGE_RATE: f32 = 60.0; // Power percent gained per second of charge
pub const MIN_SHOT_POWER: f32 = 10.0; // Dead zone: releases at or below this cancel
pub const SHOT_LOCKOUT: f32 = 3.0; // Seconds of lost control after a shot
pub const BACKSPIN_RATE: f32 = 5.0; // rad/s

// Flight time: t = base + per_meter·D + power_scale·(neutral_power − power)
pub const FLIGHT_TIME_BASE: f32 = 0.8;
pub const FLIGHT_TIME_PER_METER: f32 = 0.05;
pub const FLIGHT_TIME_POWER_SCALE: f32 = 0.5;
pub const FLIGHT_TIME_NEUTRAL_POWER: f32 = 0.8;
pub const FLIGHT_TIME_MIN: f32 = 0.5;
pub const FLIGHT_TIME_MAX: f32 = 2.0;

// =============================================================================
// SCORING
// =============================================================================

pub const SCORE_COOLDOWN: f32 = 2.0; // Debounce window between accepted baskets
pub const POINTS_PER_BASKET: u32 = 2;
pub const COMBO_WINDOW: f32 = 12.0; // Max seconds between makes to keep a streak
pub const COMBO_THRESHOLD: u32 = 3; // Streak length where the bonus kicks in
pub const COMBO_MULTIPLIER: u32 = 2;
pub const RIM_HIT_MIN_SPEED: f32 = 1.0;

// =============================================================================
// SHOT CLOCK
// =============================================================================

pub const SHOT_CLOCK_MAX: f32 = 24.0;
pub const CELEBRATION_DURATION: f32 = 1.5;
pub const SETTLE_DELAY: f32 = 0.5;

// =============================================================================
// CONFIG FILES
// =============================================================================

pub const GAMEPLAY_TUNING_FILE: &str = "config/gameplay_tuning.json";
pub const DEBUG_LOG_SETTINGS_FILE: &str = "config/debug_logging.json";
