//! End-to-end flows through the public session API

use hoopshot::events::{GameEvent, serialize_event};
use hoopshot::input::ChargeSource;
use hoopshot::physics::KinematicWorld;
use hoopshot::session::GameSession;
use hoopshot::tuning::GameplayTuning;

const DT: f32 = 1.0 / 60.0;

fn free_throw_session() -> GameSession<KinematicWorld> {
    let tuning = GameplayTuning {
        ball_spawn: [0.0, 0.12, -5.0],
        ..Default::default()
    };
    let mut session = GameSession::new(tuning, KinematicWorld::default()).unwrap();
    session.drain_events();
    session
}

/// Charge for `frames` ticks, release, and collect events until the clock
/// resumes (or `limit` frames pass)
fn shoot(session: &mut GameSession<KinematicWorld>, frames: u32, limit: u32) -> Vec<GameEvent> {
    let mut events = Vec::new();
    for _ in 0..frames {
        session.aggregator_mut().set_charge(ChargeSource::Keyboard, true);
        session.tick(DT);
    }
    session.aggregator_mut().set_charge(ChargeSource::Keyboard, false);
    for _ in 0..limit {
        session.tick(DT);
        let drained: Vec<_> = session.drain_events().into_iter().map(|e| e.event).collect();
        let resumed = drained
            .iter()
            .any(|e| matches!(e, GameEvent::ClockResumed { .. }));
        events.extend(drained);
        if resumed {
            break;
        }
    }
    events
}

fn goals(events: &[GameEvent]) -> Vec<(u32, u32, u32)> {
    events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Goal { points, score, combo } => Some((*points, *score, *combo)),
            _ => None,
        })
        .collect()
}

#[test]
fn free_throw_scores_and_resets() {
    let mut session = free_throw_session();
    let events = shoot(&mut session, 20, 400);

    assert_eq!(goals(&events), vec![(2, 2, 1)]);
    assert!(events.iter().any(|e| matches!(e, GameEvent::BallReset)));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::GoalIgnored)));

    let snapshot = session.snapshot();
    assert_eq!(snapshot.score, 2);
    assert!(!snapshot.paused);
    assert!(!snapshot.shooting);
    assert!((snapshot.ball_position.2 - -5.0).abs() < 0.05);
}

#[test]
fn three_quick_makes_earn_the_combo_bonus() {
    let mut session = free_throw_session();
    let mut all = Vec::new();
    for _ in 0..3 {
        all.extend(shoot(&mut session, 20, 400));
    }

    assert_eq!(goals(&all), vec![(2, 2, 1), (2, 4, 2), (4, 8, 3)]);
    assert_eq!(session.snapshot().combo, 3);
}

#[test]
fn focus_loss_mid_charge_cancels_instead_of_shooting() {
    let mut session = free_throw_session();
    for _ in 0..40 {
        session.aggregator_mut().set_charge(ChargeSource::Keyboard, true);
        session.tick(DT);
    }
    session.aggregator_mut().release_all();
    for _ in 0..30 {
        session.tick(DT);
    }

    let events: Vec<GameEvent> = session.drain_events().into_iter().map(|e| e.event).collect();
    assert!(events.iter().any(|e| matches!(e, GameEvent::ChargeStart)));
    assert!(events.iter().any(|e| matches!(e, GameEvent::ShotCancelled { .. })));
    assert!(!events.iter().any(|e| matches!(e, GameEvent::ShotRelease { .. })));

    let snapshot = session.snapshot();
    assert!(!snapshot.shooting);
    assert!(!snapshot.charging);
    assert_eq!(snapshot.power_percent, 0.0);
}

#[test]
fn history_serializes_to_compact_lines() {
    let mut session = free_throw_session();
    shoot(&mut session, 20, 400);

    let lines: Vec<String> = session
        .event_history()
        .map(|e| serialize_event(e.time_ms, &e.event))
        .collect();
    assert!(lines.iter().any(|l| l.contains("|SH|")));
    assert!(lines.iter().any(|l| l.contains("|G|")));
    assert!(lines.iter().all(|l| l.starts_with("T:")));
}

#[test]
fn snapshot_json_carries_match_state() {
    let mut session = free_throw_session();
    let snapshot = session.tick(DT);
    let json = snapshot.to_json();
    assert!(json.contains("\"score\":0"));
    assert!(json.contains("\"shot_clock\""));
}
