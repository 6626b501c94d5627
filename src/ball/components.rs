//! Ball-related components and state snapshots

use bevy::prelude::*;

/// Marker for the rendered ball entity
#[derive(Component)]
pub struct Ball;

/// Controller-side view of the ball, refreshed every tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BallState {
    /// Read back from the physics world
    pub position: Vec3,
    pub velocity: Vec3,
    pub angular_velocity: Vec3,
    /// Ball in flight, player input locked out
    pub is_shooting: bool,
    /// Charge level in [0, 100]
    pub power_percent: f32,
    pub charging: bool,
}
