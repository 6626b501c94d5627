//! Test doubles for the physics contract

use std::collections::HashMap;

use bevy::math::Vec3;

use super::{BodyDesc, BodyHandle, CollisionEvent, PhysicsWorld};
use crate::error::PhysicsError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    SetPosition(BodyHandle, Vec3),
    SetVelocity(BodyHandle, Vec3),
    SetAngularVelocity(BodyHandle, Vec3),
    ApplyForce(BodyHandle, Vec3),
}

/// Records every command; never integrates anything
#[derive(Debug, Default)]
pub struct RecordingWorld {
    pub commands: Vec<Command>,
    pub queued_events: Vec<CollisionEvent>,
    pub steps: u32,
    positions: HashMap<BodyHandle, Vec3>,
    velocities: HashMap<BodyHandle, Vec3>,
    spins: HashMap<BodyHandle, Vec3>,
    next: u32,
}

impl RecordingWorld {
    /// Convenience: a world holding one body at `position`
    pub fn with_body(position: Vec3) -> (Self, BodyHandle) {
        let mut world = Self::default();
        let handle = BodyHandle(world.next);
        world.next += 1;
        world.positions.insert(handle, position);
        (world, handle)
    }

    pub fn velocity_commands(&self) -> Vec<Vec3> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::SetVelocity(_, v) => Some(*v),
                _ => None,
            })
            .collect()
    }

    pub fn position_commands(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::SetPosition(..)))
            .count()
    }
}

impl PhysicsWorld for RecordingWorld {
    fn create_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, PhysicsError> {
        let handle = BodyHandle(self.next);
        self.next += 1;
        self.positions.insert(handle, desc.position);
        Ok(handle)
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec3) {
        self.commands.push(Command::SetPosition(body, position));
        self.positions.insert(body, position);
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        self.commands.push(Command::SetVelocity(body, velocity));
        self.velocities.insert(body, velocity);
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, angular_velocity: Vec3) {
        self.commands
            .push(Command::SetAngularVelocity(body, angular_velocity));
        self.spins.insert(body, angular_velocity);
    }

    fn apply_force(&mut self, body: BodyHandle, force: Vec3) {
        self.commands.push(Command::ApplyForce(body, force));
    }

    fn position(&self, body: BodyHandle) -> Option<Vec3> {
        self.positions.get(&body).copied()
    }

    fn velocity(&self, body: BodyHandle) -> Option<Vec3> {
        Some(self.velocities.get(&body).copied().unwrap_or(Vec3::ZERO))
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        Some(self.spins.get(&body).copied().unwrap_or(Vec3::ZERO))
    }

    fn set_gravity(&mut self, _gravity: Vec3) {}

    fn step(&mut self, _dt: f32) {
        self.steps += 1;
    }

    fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.queued_events)
    }
}

/// A backend that refuses every body
#[derive(Debug, Default)]
pub struct FailingWorld;

impl PhysicsWorld for FailingWorld {
    fn create_body(&mut self, _desc: BodyDesc) -> Result<BodyHandle, PhysicsError> {
        Err(PhysicsError::Unavailable("no backend".into()))
    }

    fn set_position(&mut self, _body: BodyHandle, _position: Vec3) {}
    fn set_velocity(&mut self, _body: BodyHandle, _velocity: Vec3) {}
    fn set_angular_velocity(&mut self, _body: BodyHandle, _angular_velocity: Vec3) {}
    fn apply_force(&mut self, _body: BodyHandle, _force: Vec3) {}

    fn position(&self, _body: BodyHandle) -> Option<Vec3> {
        None
    }

    fn velocity(&self, _body: BodyHandle) -> Option<Vec3> {
        None
    }

    fn angular_velocity(&self, _body: BodyHandle) -> Option<Vec3> {
        None
    }

    fn set_gravity(&mut self, _gravity: Vec3) {}
    fn step(&mut self, _dt: f32) {}

    fn drain_events(&mut self) -> Vec<CollisionEvent> {
        Vec::new()
    }
}
