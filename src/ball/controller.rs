//! Player-ball controller
//!
//! Three phases:
//! - `Idle`: player drives the ball around the court
//! - `Charging`: still driving, shot power accumulating
//! - `Shooting`: ball in flight, movement ignored until the lockout ends
//!
//! A reset request (score or violation) wins over every phase. The
//! controller is the only writer of ball velocity; everything else reaches
//! the ball through `request_reset`.

use bevy::log::{debug, warn};
use bevy::math::{Vec2, Vec3};

use super::BallState;
use crate::helpers::{horizontal, move_toward, with_horizontal};
use crate::input::InputFrame;
use crate::physics::{BodyHandle, PhysicsWorld};
use crate::shooting::{ShotCharge, ShotRequest, backspin};
use crate::tuning::ControllerTuning;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerPhase {
    Idle,
    Charging,
    Shooting { remaining: f32 },
}

/// Launch parameters of a released shot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotInfo {
    pub origin: Vec3,
    pub target: Vec3,
    /// Charge fraction in [0, 1]
    pub power: f32,
    pub flight_time: f32,
    pub velocity: Vec3,
    pub spin: Vec3,
}

/// What happened during one controller update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerOutcome {
    Reset,
    ChargeStarted,
    Shot(ShotInfo),
    /// Released inside the dead zone (or lost the charge); power in percent
    Cancelled { power: f32 },
    LockoutEnded,
}

#[derive(Debug, Clone)]
pub struct BallController {
    ball: BodyHandle,
    phase: ControllerPhase,
    charge: ShotCharge,
    reset_pending: bool,
    last_shot: Option<ShotInfo>,
}

impl BallController {
    pub fn new(ball: BodyHandle) -> Self {
        Self {
            ball,
            phase: ControllerPhase::Idle,
            charge: ShotCharge::default(),
            reset_pending: false,
            last_shot: None,
        }
    }

    pub fn ball(&self) -> BodyHandle {
        self.ball
    }

    pub fn phase(&self) -> ControllerPhase {
        self.phase
    }

    pub fn is_shooting(&self) -> bool {
        matches!(self.phase, ControllerPhase::Shooting { .. })
    }

    pub fn is_charging(&self) -> bool {
        self.phase == ControllerPhase::Charging
    }

    pub fn power_percent(&self) -> f32 {
        self.charge.percent()
    }

    pub fn last_shot(&self) -> Option<&ShotInfo> {
        self.last_shot.as_ref()
    }

    /// Ask for a forced reset on the next update.
    /// Returns false if one was already pending (the request is absorbed).
    pub fn request_reset(&mut self) -> bool {
        if self.reset_pending {
            debug!("Reset already pending, ignoring duplicate request");
            return false;
        }
        self.reset_pending = true;
        true
    }

    pub fn reset_pending(&self) -> bool {
        self.reset_pending
    }

    /// Snapshot combining controller state with physics readback
    pub fn state<W: PhysicsWorld>(&self, world: &W) -> BallState {
        BallState {
            position: world.position(self.ball).unwrap_or_default(),
            velocity: world.velocity(self.ball).unwrap_or_default(),
            angular_velocity: world.angular_velocity(self.ball).unwrap_or_default(),
            is_shooting: self.is_shooting(),
            power_percent: self.charge.percent(),
            charging: self.is_charging(),
        }
    }

    /// Advance one tick. Commands go to `world`; nothing is stepped here.
    pub fn update<W: PhysicsWorld>(
        &mut self,
        input: &InputFrame,
        dt: f32,
        world: &mut W,
        tuning: &ControllerTuning,
    ) -> Vec<ControllerOutcome> {
        let mut outcomes = Vec::new();

        if self.reset_pending {
            self.apply_reset(world, tuning);
            outcomes.push(ControllerOutcome::Reset);
            return outcomes;
        }

        if let ControllerPhase::Shooting { remaining } = self.phase {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                debug!("Shot lockout ended");
                self.phase = ControllerPhase::Idle;
                outcomes.push(ControllerOutcome::LockoutEnded);
            } else {
                self.phase = ControllerPhase::Shooting { remaining };
            }
            // Input is ignored for the whole lockout tick
            return outcomes;
        }

        if self.phase == ControllerPhase::Idle && (input.pressed || input.charging) {
            debug!("Charge started");
            self.phase = ControllerPhase::Charging;
            outcomes.push(ControllerOutcome::ChargeStarted);
        }

        if self.phase == ControllerPhase::Charging {
            if input.released {
                outcomes.push(self.release(world, tuning));
            } else if input.charging {
                self.charge.accumulate(tuning.charge_rate, dt);
            } else {
                // Charge dropped without a release edge (input neutralized)
                outcomes.push(self.cancel());
            }
        }

        if !self.is_shooting() {
            self.drive(input.movement, dt, world, tuning);
        }

        outcomes
    }

    fn apply_reset<W: PhysicsWorld>(&mut self, world: &mut W, tuning: &ControllerTuning) {
        debug!(
            "Ball reset to ({:.2}, {:.2}, {:.2}) from {:?}",
            tuning.ball_spawn.x, tuning.ball_spawn.y, tuning.ball_spawn.z, self.phase
        );
        world.set_position(self.ball, tuning.ball_spawn);
        world.set_velocity(self.ball, Vec3::ZERO);
        world.set_angular_velocity(self.ball, Vec3::ZERO);
        self.charge.reset();
        self.phase = ControllerPhase::Idle;
        self.reset_pending = false;
    }

    fn cancel(&mut self) -> ControllerOutcome {
        let power = self.charge.percent();
        debug!("Shot cancelled at {:.0}% power", power);
        self.charge.reset();
        self.phase = ControllerPhase::Idle;
        ControllerOutcome::Cancelled { power }
    }

    fn release<W: PhysicsWorld>(
        &mut self,
        world: &mut W,
        tuning: &ControllerTuning,
    ) -> ControllerOutcome {
        if !self.charge.clears_dead_zone(tuning.min_shot_power) {
            return self.cancel();
        }
        let Some(origin) = world.position(self.ball) else {
            warn!("Ball body missing at release, shot dropped");
            return self.cancel();
        };

        let power = self.charge.fraction();
        let request = ShotRequest::new(
            origin,
            tuning.hoop_target,
            power,
            tuning.gravity,
            &tuning.flight,
        );
        let velocity = request.solve();
        let spin = backspin(velocity, tuning.backspin_rate);

        world.set_velocity(self.ball, velocity);
        world.set_angular_velocity(self.ball, spin);

        let shot = ShotInfo {
            origin,
            target: tuning.hoop_target,
            power,
            flight_time: request.flight_time,
            velocity,
            spin,
        };
        debug!(
            "Shot released: power {:.2}, t {:.2}s, v ({:.2}, {:.2}, {:.2})",
            power, request.flight_time, velocity.x, velocity.y, velocity.z
        );

        self.charge.reset();
        self.phase = ControllerPhase::Shooting {
            remaining: tuning.shot_lockout,
        };
        self.last_shot = Some(shot);
        ControllerOutcome::Shot(shot)
    }

    /// Capped velocity override on the court plane; vertical is left to gravity
    fn drive<W: PhysicsWorld>(
        &self,
        movement: Vec2,
        dt: f32,
        world: &mut W,
        tuning: &ControllerTuning,
    ) {
        let Some(velocity) = world.velocity(self.ball) else {
            return;
        };
        let current = horizontal(velocity);
        let target = movement * tuning.move_speed;
        let next = Vec2::new(
            axis_speed(current.x, target.x, dt, tuning),
            axis_speed(current.y, target.y, dt, tuning),
        );
        if next != current {
            world.set_velocity(self.ball, with_horizontal(velocity, next));
        }
    }
}

fn axis_speed(current: f32, target: f32, dt: f32, tuning: &ControllerTuning) -> f32 {
    // Accelerate toward input, brake when stopping or reversing
    let accelerating = target != 0.0
        && (target.signum() == current.signum() || current.abs() < 1.0)
        && target.abs() >= current.abs();
    let rate = if accelerating {
        tuning.move_accel
    } else {
        tuning.move_decel
    };
    move_toward(current, target, rate * dt)
}
