//! Physics world contract
//!
//! The game core never integrates gravity or resolves contacts itself. It
//! issues velocity/force commands, reads positions back once per tick and
//! drains collision events after each step. `KinematicWorld` is the small
//! backend the game binary, the simulator and the tests run against.

mod court;
mod kinematic;
#[cfg(test)]
pub(crate) mod recording;

pub use court::{CourtBodies, build_court, rim_segment_positions};
pub use kinematic::KinematicWorld;

use bevy::math::Vec3;

use crate::error::PhysicsError;

/// Opaque body identifier handed out by a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u32);

/// What a body is, as far as game logic cares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyTag {
    Ball,
    Rim,
    Backboard,
    Floor,
    ScoreTrigger,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    Sphere { radius: f32 },
    Cuboid { half_extents: Vec3 },
    /// Infinite horizontal plane at the body's height
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyKind {
    Dynamic { mass: f32 },
    Static,
    /// Overlap-only volume with no collision response
    Trigger,
}

/// Everything needed to create a body
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyDesc {
    pub shape: BodyShape,
    pub kind: BodyKind,
    pub tag: BodyTag,
    pub position: Vec3,
    pub restitution: f32,
}

impl BodyDesc {
    pub fn is_sensor(&self) -> bool {
        matches!(self.kind, BodyKind::Trigger)
    }
}

/// Collision notifications raised during a step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionEvent {
    /// A body is inside a trigger volume
    Overlap {
        trigger: BodyHandle,
        other: BodyHandle,
        other_tag: BodyTag,
        other_is_sensor: bool,
        other_velocity: Vec3,
    },
    /// A dynamic body struck a solid body
    Contact {
        body: BodyHandle,
        other: BodyHandle,
        other_tag: BodyTag,
        impact_speed: f32,
    },
}

/// Command/query surface of the physics backend
pub trait PhysicsWorld {
    fn create_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, PhysicsError>;

    /// Teleport a body (used for resets)
    fn set_position(&mut self, body: BodyHandle, position: Vec3);

    /// Override linear velocity (not additive)
    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3);

    fn set_angular_velocity(&mut self, body: BodyHandle, angular_velocity: Vec3);

    /// Accumulate a force for the next step
    fn apply_force(&mut self, body: BodyHandle, force: Vec3);

    fn position(&self, body: BodyHandle) -> Option<Vec3>;

    fn velocity(&self, body: BodyHandle) -> Option<Vec3>;

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3>;

    fn set_gravity(&mut self, gravity: Vec3);

    /// Advance the simulation by `dt` seconds
    fn step(&mut self, dt: f32);

    /// Take every collision event raised since the last drain
    fn drain_events(&mut self) -> Vec<CollisionEvent>;
}
