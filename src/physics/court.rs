//! Court body construction

use bevy::log::info;
use bevy::math::Vec3;

use super::{BodyDesc, BodyHandle, BodyKind, BodyShape, BodyTag, PhysicsWorld};
use crate::constants::*;
use crate::error::SetupError;
use crate::helpers::vec3_from;
use crate::tuning::GameplayTuning;

/// Handles to every body the game core talks to
#[derive(Debug, Clone, PartialEq)]
pub struct CourtBodies {
    pub ball: BodyHandle,
    pub trigger: BodyHandle,
    pub backboard: BodyHandle,
    pub floor: BodyHandle,
    pub rim: Vec<BodyHandle>,
}

/// Positions of the tube spheres approximating the rim ring
pub fn rim_segment_positions(center: Vec3) -> impl Iterator<Item = Vec3> {
    (0..RIM_SEGMENTS).map(move |i| {
        let angle = i as f32 / RIM_SEGMENTS as f32 * std::f32::consts::TAU;
        center + Vec3::new(angle.cos() * RIM_RADIUS, 0.0, angle.sin() * RIM_RADIUS)
    })
}

/// Create floor, backboard, rim, score trigger and ball.
///
/// The rim and trigger follow the tuned hoop target; the ball starts at
/// the tuned spawn point. Any body the world refuses is fatal.
pub fn build_court<W: PhysicsWorld>(
    world: &mut W,
    tuning: &GameplayTuning,
) -> Result<CourtBodies, SetupError> {
    let hoop = vec3_from(tuning.hoop_target);
    world.set_gravity(Vec3::new(0.0, -tuning.gravity, 0.0));

    let floor = world
        .create_body(BodyDesc {
            shape: BodyShape::Floor,
            kind: BodyKind::Static,
            tag: BodyTag::Floor,
            position: Vec3::ZERO,
            restitution: 1.0,
        })
        .map_err(SetupError::physics("floor"))?;

    let backboard = world
        .create_body(BodyDesc {
            shape: BodyShape::Cuboid {
                half_extents: BACKBOARD_SIZE * 0.5,
            },
            kind: BodyKind::Static,
            tag: BodyTag::Backboard,
            position: BACKBOARD_CENTER,
            restitution: BACKBOARD_RESTITUTION,
        })
        .map_err(SetupError::physics("backboard"))?;

    let rim = rim_segment_positions(hoop)
        .map(|position| {
            world
                .create_body(BodyDesc {
                    shape: BodyShape::Sphere {
                        radius: RIM_TUBE_RADIUS,
                    },
                    kind: BodyKind::Static,
                    tag: BodyTag::Rim,
                    position,
                    restitution: RIM_RESTITUTION,
                })
                .map_err(SetupError::physics("rim segment"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let trigger = world
        .create_body(BodyDesc {
            shape: BodyShape::Cuboid {
                half_extents: SCORE_TRIGGER_HALF_EXTENTS,
            },
            kind: BodyKind::Trigger,
            tag: BodyTag::ScoreTrigger,
            position: hoop + (SCORE_TRIGGER_CENTER - HOOP_CENTER),
            restitution: 0.0,
        })
        .map_err(SetupError::physics("score trigger"))?;

    let ball = world
        .create_body(BodyDesc {
            shape: BodyShape::Sphere {
                radius: tuning.ball_radius,
            },
            kind: BodyKind::Dynamic {
                mass: tuning.ball_mass,
            },
            tag: BodyTag::Ball,
            position: vec3_from(tuning.ball_spawn),
            restitution: tuning.ball_restitution,
        })
        .map_err(SetupError::physics("ball"))?;

    info!(
        "Court built: {} rim segments, hoop at ({:.2}, {:.2}, {:.2})",
        rim.len(),
        hoop.x,
        hoop.y,
        hoop.z
    );

    Ok(CourtBodies {
        ball,
        trigger,
        backboard,
        floor,
        rim,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::KinematicWorld;
    use crate::physics::recording::FailingWorld;

    #[test]
    fn test_court_has_expected_bodies() {
        let mut world = KinematicWorld::default();
        let court = build_court(&mut world, &GameplayTuning::default()).unwrap();

        assert_eq!(court.rim.len(), RIM_SEGMENTS);
        assert_eq!(world.body_count(), RIM_SEGMENTS + 4);
        assert_eq!(world.tag(court.ball), Some(BodyTag::Ball));
        assert_eq!(world.tag(court.trigger), Some(BodyTag::ScoreTrigger));
        assert_eq!(world.position(court.ball), Some(BALL_SPAWN));
    }

    #[test]
    fn test_rim_ring_is_centered_on_hoop() {
        for p in rim_segment_positions(HOOP_CENTER) {
            assert!((p.y - HOOP_HEIGHT).abs() < 1e-6);
            let r = Vec3::new(p.x - HOOP_CENTER.x, 0.0, p.z - HOOP_CENTER.z).length();
            assert!((r - RIM_RADIUS).abs() < 1e-5);
        }
    }

    #[test]
    fn test_rejected_body_is_fatal() {
        let mut world = FailingWorld::default();
        let err = build_court(&mut world, &GameplayTuning::default()).unwrap_err();
        assert!(matches!(err, SetupError::Physics { what: "floor", .. }));
    }
}
