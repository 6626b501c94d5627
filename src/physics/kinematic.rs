//! Minimal physics backend
//!
//! Dynamic spheres fall under constant gravity and bounce off static
//! floors, cuboids and spheres. Trigger volumes report overlaps every
//! substep. Integration is exact for constant acceleration
//! (`p += v·h + ½·a·h²`), so a ball launched by the trajectory solver
//! follows the solved arc until it touches something.
//!
//! Not handled: dynamic-vs-dynamic contact, rotational dynamics (angular
//! velocity is stored for presentation only).

use bevy::log::warn;
use bevy::math::Vec3;

use super::{BodyDesc, BodyHandle, BodyKind, BodyShape, BodyTag, CollisionEvent, PhysicsWorld};
use crate::constants::*;
use crate::error::PhysicsError;

#[derive(Debug, Clone, Copy)]
struct Body {
    desc: BodyDesc,
    position: Vec3,
    velocity: Vec3,
    angular_velocity: Vec3,
    force: Vec3,
}

/// Contact normal (pointing out of the other body) and penetration depth
struct Penetration {
    normal: Vec3,
    depth: f32,
}

#[derive(Debug, Clone)]
pub struct KinematicWorld {
    gravity: Vec3,
    bodies: Vec<Body>,
    events: Vec<CollisionEvent>,
    substep: f32,
    roll_friction: f32,
}

impl Default for KinematicWorld {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, -GRAVITY, 0.0))
    }
}

impl KinematicWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            bodies: Vec::new(),
            events: Vec::new(),
            substep: PHYSICS_SUBSTEP,
            roll_friction: BALL_ROLL_FRICTION,
        }
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn tag(&self, body: BodyHandle) -> Option<BodyTag> {
        self.bodies.get(body.0 as usize).map(|b| b.desc.tag)
    }

    fn body_mut(&mut self, body: BodyHandle) -> Option<&mut Body> {
        let found = self.bodies.get_mut(body.0 as usize);
        if found.is_none() {
            warn!("Physics command for unknown body {:?}", body);
        }
        found
    }

    /// Vertical speeds below this settle to rest on the floor
    fn rest_speed(&self, h: f32) -> f32 {
        REST_SPEED.max(2.0 * self.gravity.length() * h)
    }

    fn substep_once(&mut self, h: f32) {
        for i in 0..self.bodies.len() {
            let BodyKind::Dynamic { mass } = self.bodies[i].desc.kind else {
                continue;
            };
            let BodyShape::Sphere { radius } = self.bodies[i].desc.shape else {
                continue;
            };

            {
                let gravity = self.gravity;
                let body = &mut self.bodies[i];
                let accel = gravity + body.force / mass;
                body.position += body.velocity * h + accel * (0.5 * h * h);
                body.velocity += accel * h;
            }

            for j in 0..self.bodies.len() {
                if i == j {
                    continue;
                }
                let other = self.bodies[j];
                let ball = self.bodies[i];
                let Some(pen) = sphere_penetration(ball.position, radius, &other) else {
                    continue;
                };

                match other.desc.kind {
                    BodyKind::Trigger => {
                        self.events.push(CollisionEvent::Overlap {
                            trigger: BodyHandle(j as u32),
                            other: BodyHandle(i as u32),
                            other_tag: ball.desc.tag,
                            other_is_sensor: ball.desc.is_sensor(),
                            other_velocity: ball.velocity,
                        });
                    }
                    BodyKind::Static => {
                        let rest_speed = self.rest_speed(h);
                        let roll_friction = self.roll_friction;
                        let body = &mut self.bodies[i];
                        body.position += pen.normal * pen.depth;

                        let vn = body.velocity.dot(pen.normal);
                        if vn < 0.0 {
                            let e = body.desc.restitution * other.desc.restitution;
                            body.velocity -= pen.normal * ((1.0 + e) * vn);
                            if other.desc.tag == BodyTag::Floor && body.velocity.y.abs() < rest_speed {
                                body.velocity.y = 0.0;
                            }
                            if -vn >= CONTACT_EVENT_MIN_SPEED {
                                self.events.push(CollisionEvent::Contact {
                                    body: BodyHandle(i as u32),
                                    other: BodyHandle(j as u32),
                                    other_tag: other.desc.tag,
                                    impact_speed: -vn,
                                });
                            }
                        }

                        if matches!(other.desc.shape, BodyShape::Floor) {
                            let keep = (1.0 - roll_friction * h).max(0.0);
                            body.velocity.x *= keep;
                            body.velocity.z *= keep;
                        }
                    }
                    BodyKind::Dynamic { .. } => {}
                }
            }
        }
    }
}

/// Penetration of a sphere into `other`, if any
fn sphere_penetration(center: Vec3, radius: f32, other: &Body) -> Option<Penetration> {
    match other.desc.shape {
        BodyShape::Floor => {
            let depth = radius - (center.y - other.position.y);
            (depth > 0.0).then_some(Penetration {
                normal: Vec3::Y,
                depth,
            })
        }
        BodyShape::Sphere { radius: other_radius } => {
            let diff = center - other.position;
            let dist = diff.length();
            let reach = radius + other_radius;
            if dist >= reach {
                return None;
            }
            let normal = if dist > 1e-6 { diff / dist } else { Vec3::Y };
            Some(Penetration {
                normal,
                depth: reach - dist,
            })
        }
        BodyShape::Cuboid { half_extents } => {
            let min = other.position - half_extents;
            let max = other.position + half_extents;
            let closest = center.clamp(min, max);
            let diff = center - closest;
            let dist = diff.length();
            if dist >= radius {
                return None;
            }
            if dist > 1e-6 {
                return Some(Penetration {
                    normal: diff / dist,
                    depth: radius - dist,
                });
            }

            // Center inside the box: push out along the shallowest axis
            let local = center - other.position;
            let overlap = half_extents - local.abs();
            let (axis, depth) = if overlap.x <= overlap.y && overlap.x <= overlap.z {
                (Vec3::X * local.x.signum(), overlap.x)
            } else if overlap.y <= overlap.z {
                (Vec3::Y * local.y.signum(), overlap.y)
            } else {
                (Vec3::Z * local.z.signum(), overlap.z)
            };
            Some(Penetration {
                normal: axis,
                depth: depth + radius,
            })
        }
    }
}

fn validate_desc(desc: &BodyDesc) -> Result<(), PhysicsError> {
    if !desc.position.is_finite() || !desc.restitution.is_finite() {
        return Err(PhysicsError::InvalidBody(format!(
            "{:?} has non-finite position or restitution",
            desc.tag
        )));
    }
    match desc.shape {
        BodyShape::Sphere { radius } if !(radius > 0.0 && radius.is_finite()) => {
            return Err(PhysicsError::InvalidBody(format!(
                "{:?} sphere radius must be positive",
                desc.tag
            )));
        }
        BodyShape::Cuboid { half_extents }
            if !(half_extents.min_element() > 0.0 && half_extents.is_finite()) =>
        {
            return Err(PhysicsError::InvalidBody(format!(
                "{:?} cuboid extents must be positive",
                desc.tag
            )));
        }
        _ => {}
    }
    match desc.kind {
        BodyKind::Dynamic { mass } => {
            if !(mass > 0.0 && mass.is_finite()) {
                return Err(PhysicsError::InvalidBody(format!(
                    "{:?} mass must be positive",
                    desc.tag
                )));
            }
            if !matches!(desc.shape, BodyShape::Sphere { .. }) {
                return Err(PhysicsError::InvalidBody(format!(
                    "{:?}: only spheres can be dynamic",
                    desc.tag
                )));
            }
        }
        BodyKind::Trigger if matches!(desc.shape, BodyShape::Floor) => {
            return Err(PhysicsError::InvalidBody(format!(
                "{:?}: trigger volumes must be bounded",
                desc.tag
            )));
        }
        _ => {}
    }
    Ok(())
}

impl PhysicsWorld for KinematicWorld {
    fn create_body(&mut self, desc: BodyDesc) -> Result<BodyHandle, PhysicsError> {
        validate_desc(&desc)?;
        let handle = BodyHandle(self.bodies.len() as u32);
        self.bodies.push(Body {
            desc: BodyDesc {
                restitution: desc.restitution.clamp(0.0, 1.0),
                ..desc
            },
            position: desc.position,
            velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            force: Vec3::ZERO,
        });
        Ok(handle)
    }

    fn set_position(&mut self, body: BodyHandle, position: Vec3) {
        if let Some(b) = self.body_mut(body) {
            b.position = position;
        }
    }

    fn set_velocity(&mut self, body: BodyHandle, velocity: Vec3) {
        if let Some(b) = self.body_mut(body) {
            b.velocity = velocity;
        }
    }

    fn set_angular_velocity(&mut self, body: BodyHandle, angular_velocity: Vec3) {
        if let Some(b) = self.body_mut(body) {
            b.angular_velocity = angular_velocity;
        }
    }

    fn apply_force(&mut self, body: BodyHandle, force: Vec3) {
        if let Some(b) = self.body_mut(body) {
            b.force += force;
        }
    }

    fn position(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(body.0 as usize).map(|b| b.position)
    }

    fn velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(body.0 as usize).map(|b| b.velocity)
    }

    fn angular_velocity(&self, body: BodyHandle) -> Option<Vec3> {
        self.bodies.get(body.0 as usize).map(|b| b.angular_velocity)
    }

    fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    fn step(&mut self, dt: f32) {
        if !(dt > 0.0 && dt.is_finite()) {
            return;
        }
        let substeps = (dt / self.substep).ceil().max(1.0) as usize;
        let h = dt / substeps as f32;
        for _ in 0..substeps {
            self.substep_once(h);
        }
        for body in &mut self.bodies {
            body.force = Vec3::ZERO;
        }
    }

    fn drain_events(&mut self) -> Vec<CollisionEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shooting::position_at;

    fn ball_desc(position: Vec3) -> BodyDesc {
        BodyDesc {
            shape: BodyShape::Sphere {
                radius: BALL_RADIUS,
            },
            kind: BodyKind::Dynamic { mass: BALL_MASS },
            tag: BodyTag::Ball,
            position,
            restitution: BALL_RESTITUTION,
        }
    }

    fn floor_desc() -> BodyDesc {
        BodyDesc {
            shape: BodyShape::Floor,
            kind: BodyKind::Static,
            tag: BodyTag::Floor,
            position: Vec3::ZERO,
            restitution: 1.0,
        }
    }

    #[test]
    fn test_free_flight_matches_closed_form() {
        let mut world = KinematicWorld::default();
        let origin = Vec3::new(0.0, 1.0, 0.0);
        let ball = world.create_body(ball_desc(origin)).unwrap();
        let launch = Vec3::new(1.5, 7.0, -4.0);
        world.set_velocity(ball, launch);

        for _ in 0..60 {
            world.step(1.0 / 60.0);
        }

        let expected = position_at(origin, launch, GRAVITY, 1.0);
        let actual = world.position(ball).unwrap();
        assert!(actual.distance(expected) < 1e-3, "{:?} vs {:?}", actual, expected);
    }

    #[test]
    fn test_dropped_ball_comes_to_rest() {
        let mut world = KinematicWorld::default();
        world.create_body(floor_desc()).unwrap();
        let ball = world.create_body(ball_desc(Vec3::new(0.0, 2.0, 0.0))).unwrap();

        for _ in 0..600 {
            world.step(1.0 / 60.0);
        }

        let pos = world.position(ball).unwrap();
        let vel = world.velocity(ball).unwrap();
        assert!((pos.y - BALL_RADIUS).abs() < 0.01, "rest height {}", pos.y);
        assert!(vel.length() < 0.01, "rest velocity {:?}", vel);
    }

    #[test]
    fn test_floor_bounce_reports_contact() {
        let mut world = KinematicWorld::default();
        let floor = world.create_body(floor_desc()).unwrap();
        world.create_body(ball_desc(Vec3::new(0.0, 1.0, 0.0))).unwrap();

        let mut contacts = Vec::new();
        for _ in 0..60 {
            world.step(1.0 / 60.0);
            contacts.extend(world.drain_events());
        }

        assert!(contacts.iter().any(|e| matches!(
            e,
            CollisionEvent::Contact { other, other_tag: BodyTag::Floor, impact_speed, .. }
                if *other == floor && *impact_speed > 3.0
        )));
    }

    #[test]
    fn test_trigger_reports_overlap_every_substep() {
        let mut world = KinematicWorld::default();
        let trigger = world
            .create_body(BodyDesc {
                shape: BodyShape::Cuboid {
                    half_extents: Vec3::splat(0.2),
                },
                kind: BodyKind::Trigger,
                tag: BodyTag::ScoreTrigger,
                position: Vec3::new(0.0, 1.0, 0.0),
                restitution: 0.0,
            })
            .unwrap();
        let ball = world.create_body(ball_desc(Vec3::new(0.0, 1.6, 0.0))).unwrap();
        world.set_velocity(ball, Vec3::new(0.0, -3.0, 0.0));

        let mut overlaps = 0;
        for _ in 0..30 {
            world.step(1.0 / 60.0);
            for event in world.drain_events() {
                if let CollisionEvent::Overlap {
                    trigger: t,
                    other,
                    other_tag,
                    other_is_sensor,
                    other_velocity,
                } = event
                {
                    assert_eq!(t, trigger);
                    assert_eq!(other, ball);
                    assert_eq!(other_tag, BodyTag::Ball);
                    assert!(!other_is_sensor);
                    assert!(other_velocity.y < 0.0);
                    overlaps += 1;
                }
            }
        }

        // One pass through the volume spans several substeps
        assert!(overlaps > 1, "overlaps: {}", overlaps);
        // Triggers never push the ball around
        assert!(world.velocity(ball).unwrap().x.abs() < 1e-6);
    }

    #[test]
    fn test_force_is_cleared_after_step() {
        let mut world = KinematicWorld::new(Vec3::ZERO);
        let ball = world.create_body(ball_desc(Vec3::ZERO)).unwrap();

        world.apply_force(ball, Vec3::new(BALL_MASS, 0.0, 0.0));
        world.step(1.0);
        let after_push = world.velocity(ball).unwrap();
        assert!((after_push.x - 1.0).abs() < 1e-4);

        world.step(1.0);
        assert!((world.velocity(ball).unwrap().x - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_invalid_bodies_are_rejected() {
        let mut world = KinematicWorld::default();
        let bad_radius = BodyDesc {
            shape: BodyShape::Sphere { radius: 0.0 },
            ..ball_desc(Vec3::ZERO)
        };
        assert!(matches!(
            world.create_body(bad_radius),
            Err(PhysicsError::InvalidBody(_))
        ));

        let dynamic_box = BodyDesc {
            shape: BodyShape::Cuboid {
                half_extents: Vec3::ONE,
            },
            ..ball_desc(Vec3::ZERO)
        };
        assert!(world.create_body(dynamic_box).is_err());
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn test_unknown_handle_is_ignored() {
        let mut world = KinematicWorld::default();
        world.set_velocity(BodyHandle(42), Vec3::ONE);
        assert_eq!(world.position(BodyHandle(42)), None);
    }
}
