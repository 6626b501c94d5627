//! Bevy systems hosting the session in the frame loop

use bevy::prelude::*;

use super::GameSession;
use crate::ball::Ball;
use crate::events::serialize_event;
use crate::physics::KinematicWorld;
use crate::snapshot::GameSnapshot;

/// The running session, owned by the app
#[derive(Resource)]
pub struct ActiveSession(pub GameSession<KinematicWorld>);

/// Snapshot produced by the most recent fixed tick
#[derive(Resource, Default)]
pub struct LatestSnapshot(pub Option<GameSnapshot>);

/// Runs in FixedUpdate: one session tick per fixed step
pub fn tick_session(
    time: Res<Time>,
    mut session: ResMut<ActiveSession>,
    mut latest: ResMut<LatestSnapshot>,
) {
    latest.0 = Some(session.0.tick(time.delta_secs()));
}

/// Log drained events and dispatch their cues (fire-and-forget)
pub fn dispatch_events(mut session: ResMut<ActiveSession>) {
    for bus_event in session.0.drain_events() {
        debug!("{}", serialize_event(bus_event.time_ms, &bus_event.event));
        if let Some(cue) = bus_event.event.cue() {
            info!("cue: {}", cue);
        }
    }
}

/// Move the rendered ball to the simulated position and spin it
pub fn sync_ball_visual(
    time: Res<Time>,
    latest: Res<LatestSnapshot>,
    mut balls: Query<&mut Transform, With<Ball>>,
) {
    let Some(snapshot) = latest.0.as_ref() else {
        return;
    };
    let Ok(mut transform) = balls.single_mut() else {
        return;
    };

    let (x, y, z) = snapshot.ball_position;
    transform.translation = Vec3::new(x, y, z);

    let (sx, sy, sz) = snapshot.ball_spin;
    let spin = Vec3::new(sx, sy, sz);
    let rate = spin.length();
    if rate > f32::EPSILON {
        let turn = Quat::from_axis_angle(spin / rate, rate * time.delta_secs());
        transform.rotation = (turn * transform.rotation).normalize();
    }
}

/// R restarts the match
pub fn restart_match(keyboard: Res<ButtonInput<KeyCode>>, mut session: ResMut<ActiveSession>) {
    if keyboard.just_pressed(KeyCode::KeyR) {
        session.0.restart();
    }
}
