//! Court scene: meshes, camera and lights
//!
//! Purely presentational. Collision bodies live in the physics world; these
//! entities only mirror them.

use bevy::prelude::*;

use crate::ball::Ball;
use crate::constants::*;
use crate::physics::rim_segment_positions;
use crate::session::ActiveSession;

/// Spawn the court, hoop, ball mesh, camera and lights
pub fn spawn_court(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    session: Res<ActiveSession>,
) {
    let tuning = session.0.tuning();
    let hoop = Vec3::from_array(tuning.hoop_target);
    let spawn = Vec3::from_array(tuning.ball_spawn);

    // Floor
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(COURT_SIZE.x, COURT_SIZE.y))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: COURT_COLOR,
            perceptual_roughness: 0.8,
            ..default()
        })),
        Transform::from_xyz(0.0, 0.0, -COURT_SIZE.y * 0.25),
    ));

    // Free-throw line
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(3.6, 0.01, 0.05))),
        MeshMaterial3d(materials.add(COURT_LINE_COLOR)),
        Transform::from_xyz(hoop.x, 0.005, hoop.z + 5.8),
    ));

    // Backboard and pole
    commands.spawn((
        Mesh3d(meshes.add(Cuboid::from_size(BACKBOARD_SIZE))),
        MeshMaterial3d(materials.add(BACKBOARD_COLOR)),
        Transform::from_translation(BACKBOARD_CENTER),
    ));
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(0.08, POLE_CENTER.y * 2.0))),
        MeshMaterial3d(materials.add(POLE_COLOR)),
        Transform::from_translation(POLE_CENTER),
    ));

    // Rim: torus for looks, plus the segment spheres the ball actually hits
    let rim_material = materials.add(StandardMaterial {
        base_color: RIM_COLOR,
        metallic: 0.6,
        ..default()
    });
    commands.spawn((
        Mesh3d(meshes.add(Torus {
            minor_radius: RIM_TUBE_RADIUS,
            major_radius: RIM_RADIUS,
        })),
        MeshMaterial3d(rim_material.clone()),
        Transform::from_translation(hoop),
    ));
    let knot = meshes.add(Sphere::new(RIM_TUBE_RADIUS));
    for position in rim_segment_positions(hoop) {
        commands.spawn((
            Mesh3d(knot.clone()),
            MeshMaterial3d(rim_material.clone()),
            Transform::from_translation(position),
        ));
    }

    // Ball
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(tuning.ball_radius))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: BALL_COLOR,
            perceptual_roughness: 0.6,
            ..default()
        })),
        Transform::from_translation(spawn),
        Ball,
    ));

    // Camera behind the spawn point, looking at the hoop
    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(spawn.x, 3.5, spawn.z + 7.0).looking_at(hoop - Vec3::Y, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        PointLight {
            intensity: 400_000.0,
            range: 30.0,
            ..default()
        },
        Transform::from_xyz(0.0, 8.0, hoop.z + 3.0),
    ));
}
