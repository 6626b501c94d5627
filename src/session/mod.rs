//! Game session - the single owner of every core component
//!
//! One `tick` runs the whole frame in a fixed order:
//! 1. advance session time
//! 2. sample input
//! 3. controller update (neutral input while the clock is paused)
//! 4. physics step
//! 5. collision events: rim contacts become cues, overlaps go to the sensor
//! 6. accepted baskets go to the clock
//! 7. clock tick (countdown, violation, due steps)
//! 8. reset signals go to the controller, applied next tick
//!
//! Nothing else mutates the ball; the clock reaches it only through the
//! controller's reset request.

mod systems;

pub use systems::*;

use bevy::log::{debug, info, warn};
use chrono::Utc;
use uuid::Uuid;

use crate::ball::{BallController, BallState, ControllerOutcome};
use crate::error::SetupError;
use crate::events::{BusEvent, EventBus, GameEvent, triple};
use crate::input::{InputAggregator, InputFrame};
use crate::physics::{BodyTag, CollisionEvent, CourtBodies, PhysicsWorld, build_court};
use crate::scoring::{ClockPhase, ClockSignal, MatchClock, ScoringSensor};
use crate::snapshot::GameSnapshot;
use crate::tuning::GameplayTuning;

pub struct GameSession<W: PhysicsWorld> {
    tuning: GameplayTuning,
    world: W,
    court: CourtBodies,
    aggregator: InputAggregator,
    controller: BallController,
    sensor: ScoringSensor,
    clock: MatchClock,
    bus: EventBus,
    now: f64,
    frame: u64,
    session_id: String,
}

impl<W: PhysicsWorld> GameSession<W> {
    /// Validate tuning and build the court. Fails if the world refuses a body.
    pub fn new(tuning: GameplayTuning, mut world: W) -> Result<Self, SetupError> {
        tuning.validate()?;
        let court = build_court(&mut world, &tuning)?;

        let session_id = Uuid::new_v4().to_string();
        let mut bus = EventBus::new();
        bus.emit(GameEvent::SessionStart {
            session_id: session_id.clone(),
            timestamp: Utc::now().to_rfc3339(),
        });
        bus.emit(GameEvent::Config(Box::new(tuning.clone())));
        info!("Session {} started", session_id);

        Ok(Self {
            aggregator: InputAggregator::new(tuning.stick_deadzone),
            controller: BallController::new(court.ball),
            sensor: ScoringSensor::new(court.trigger, tuning.sensor()),
            clock: MatchClock::new(tuning.clock()),
            tuning,
            world,
            court,
            bus,
            now: 0.0,
            frame: 0,
            session_id,
        })
    }

    /// Run one frame of `dt` seconds
    pub fn tick(&mut self, dt: f32) -> GameSnapshot {
        if !(dt > 0.0 && dt.is_finite()) {
            return self.snapshot();
        }

        self.now += dt as f64;
        self.frame += 1;
        self.bus.update_time(self.now);

        // Edges are consumed even while paused so they can't fire late
        let sampled = self.aggregator.sample();
        let input = if self.clock.is_running() {
            sampled
        } else {
            InputFrame::neutral()
        };

        let controller_tuning = self.tuning.controller();
        let outcomes =
            self.controller
                .update(&input, dt, &mut self.world, &controller_tuning);
        for outcome in outcomes {
            self.bus.emit(match outcome {
                ControllerOutcome::Reset => GameEvent::BallReset,
                ControllerOutcome::ChargeStarted => GameEvent::ChargeStart,
                ControllerOutcome::Shot(shot) => GameEvent::ShotRelease {
                    origin: triple(shot.origin),
                    power: shot.power,
                    flight_time: shot.flight_time,
                    velocity: triple(shot.velocity),
                },
                ControllerOutcome::Cancelled { power } => GameEvent::ShotCancelled { power },
                ControllerOutcome::LockoutEnded => GameEvent::LockoutEnded,
            });
        }

        self.world.step(dt);

        let mut scores = Vec::new();
        let mut rim_hit: Option<f32> = None;
        for event in self.world.drain_events() {
            match event {
                CollisionEvent::Contact {
                    other_tag: BodyTag::Rim,
                    impact_speed,
                    ..
                } if impact_speed >= self.tuning.rim_hit_min_speed => {
                    // Several ring segments can report the same bounce
                    rim_hit = Some(rim_hit.map_or(impact_speed, |s: f32| s.max(impact_speed)));
                }
                CollisionEvent::Overlap { .. } => {
                    if let Some(score) = self.sensor.observe(&event, self.now) {
                        scores.push(score);
                    }
                }
                CollisionEvent::Contact { .. } => {}
            }
        }
        if let Some(speed) = rim_hit {
            debug!("Rim hit at {:.2} m/s", speed);
            self.bus.emit(GameEvent::RimHit { speed });
        }

        for score in &scores {
            match self.clock.on_score(score, self.now) {
                ClockSignal::Scored {
                    points,
                    total,
                    combo,
                } => self.bus.emit(GameEvent::Goal {
                    points,
                    score: total,
                    combo,
                }),
                ClockSignal::ScoreIgnored => self.bus.emit(GameEvent::GoalIgnored),
                other => warn!("Unexpected clock signal on score: {:?}", other),
            }
        }

        for signal in self.clock.tick(dt, self.now) {
            match signal {
                ClockSignal::Violation => self.bus.emit(GameEvent::Violation),
                ClockSignal::ResetBall => {
                    self.controller.request_reset();
                }
                ClockSignal::Resumed => self.bus.emit(GameEvent::ClockResumed {
                    shot_clock: self.clock.state().shot_clock,
                }),
                ClockSignal::Scored { .. } | ClockSignal::ScoreIgnored => {}
            }
        }

        self.snapshot()
    }

    /// Read-only view for presentation
    pub fn snapshot(&self) -> GameSnapshot {
        let ball = self.ball_state();
        let state = self.clock.state();
        GameSnapshot {
            frame: self.frame,
            time: self.now,
            ball_position: triple(ball.position),
            ball_velocity: triple(ball.velocity),
            ball_spin: triple(ball.angular_velocity),
            charging: ball.charging,
            power_percent: ball.power_percent,
            shooting: ball.is_shooting,
            score: state.score,
            shot_clock: state.shot_clock,
            paused: state.paused,
            combo: state.combo,
            goal_effect: self.clock.phase() == ClockPhase::PausedScoring,
            violation: self.clock.phase() == ClockPhase::PausedViolation,
        }
    }

    pub fn ball_state(&self) -> BallState {
        self.controller.state(&self.world)
    }

    /// Take every event emitted since the last drain
    pub fn drain_events(&mut self) -> Vec<BusEvent> {
        self.bus.drain()
    }

    /// Recently drained events, oldest first
    pub fn event_history(&self) -> impl Iterator<Item = &BusEvent> + '_ {
        self.bus.history()
    }

    pub fn aggregator_mut(&mut self) -> &mut InputAggregator {
        &mut self.aggregator
    }

    /// Hot-swap tuning. Court geometry is fixed at construction.
    pub fn apply_tuning(&mut self, tuning: GameplayTuning) -> Result<(), SetupError> {
        tuning.validate()?;
        if tuning.hoop_target != self.tuning.hoop_target
            || tuning.ball_radius != self.tuning.ball_radius
            || tuning.ball_mass != self.tuning.ball_mass
            || tuning.ball_restitution != self.tuning.ball_restitution
        {
            warn!("Court geometry changes apply to new sessions only");
        }

        self.world
            .set_gravity(bevy::math::Vec3::new(0.0, -tuning.gravity, 0.0));
        self.aggregator.set_deadzone(tuning.stick_deadzone);
        self.sensor.set_tuning(tuning.sensor());
        self.clock.set_tuning(tuning.clock());
        self.bus.emit(GameEvent::Config(Box::new(tuning.clone())));
        self.tuning = tuning;
        info!("Applied new gameplay tuning");
        Ok(())
    }

    /// New match: score and clock reset, ball back to spawn next tick
    pub fn restart(&mut self) {
        self.clock.restart();
        self.sensor.clear();
        self.aggregator.release_all();
        self.controller.request_reset();
    }

    /// Force the shot clock (scripted setups)
    pub fn set_shot_clock(&mut self, seconds: f32) {
        self.clock.set_shot_clock(seconds);
    }

    pub fn tuning(&self) -> &GameplayTuning {
        &self.tuning
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn court(&self) -> &CourtBodies {
        &self.court
    }

    pub fn controller(&self) -> &BallController {
        &self.controller
    }

    pub fn clock(&self) -> &MatchClock {
        &self.clock
    }

    pub fn world(&self) -> &W {
        &self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ChargeSource;
    use crate::physics::recording::{FailingWorld, RecordingWorld};
    use bevy::math::Vec3;

    const DT: f32 = 1.0 / 60.0;

    fn overlap(trigger: crate::physics::BodyHandle) -> CollisionEvent {
        CollisionEvent::Overlap {
            trigger,
            other: crate::physics::BodyHandle(999),
            other_tag: BodyTag::Ball,
            other_is_sensor: false,
            other_velocity: Vec3::new(0.0, -4.0, -1.0),
        }
    }

    fn codes(events: &[BusEvent]) -> Vec<&'static str> {
        events.iter().map(|e| e.event.type_code()).collect()
    }

    #[test]
    fn test_missing_backend_is_fatal() {
        let result = GameSession::new(GameplayTuning::default(), FailingWorld);
        assert!(matches!(result, Err(SetupError::Physics { .. })));
    }

    #[test]
    fn test_invalid_tuning_is_fatal() {
        let tuning = GameplayTuning {
            shot_clock_max: 0.0,
            ..Default::default()
        };
        let result = GameSession::new(tuning, RecordingWorld::default());
        assert!(matches!(result, Err(SetupError::InvalidTuning(_))));
    }

    #[test]
    fn test_session_starts_with_start_events() {
        let mut session = GameSession::new(GameplayTuning::default(), RecordingWorld::default()).unwrap();
        assert_eq!(codes(&session.drain_events()), vec!["SE", "CF"]);
    }

    #[test]
    fn test_overlap_burst_scores_once_and_resets_ball() {
        let mut session = GameSession::new(GameplayTuning::default(), RecordingWorld::default()).unwrap();
        session.drain_events();
        let trigger = session.court().trigger;

        // Five overlaps across consecutive frames
        for _ in 0..5 {
            session.world.queued_events.push(overlap(trigger));
            session.tick(DT);
        }
        let snap = session.snapshot();
        assert_eq!(snap.score, 2);
        assert!(snap.paused && snap.goal_effect);

        for _ in 0..150 {
            session.tick(DT);
        }
        let events = session.drain_events();
        let codes = codes(&events);
        assert_eq!(codes.iter().filter(|c| **c == "G").count(), 1);
        assert_eq!(codes.iter().filter(|c| **c == "BR").count(), 1);
        assert_eq!(codes.iter().filter(|c| **c == "CR").count(), 1);
        assert!(session.clock().is_running());
        assert_eq!(
            session.world().position(session.court().ball),
            Some(Vec3::from_array(GameplayTuning::default().ball_spawn))
        );
    }

    #[test]
    fn test_input_is_neutral_while_paused() {
        let mut session = GameSession::new(GameplayTuning::default(), RecordingWorld::default()).unwrap();
        let trigger = session.court().trigger;
        session.world.queued_events.push(overlap(trigger));
        session.tick(DT);
        assert!(session.snapshot().paused);

        session.aggregator_mut().set_charge(ChargeSource::Keyboard, true);
        for _ in 0..30 {
            session.tick(DT);
        }
        assert!(!session.snapshot().charging);
        assert_eq!(session.snapshot().power_percent, 0.0);
    }

    #[test]
    fn test_rim_contacts_collapse_to_one_cue_per_frame() {
        let mut session = GameSession::new(GameplayTuning::default(), RecordingWorld::default()).unwrap();
        session.drain_events();
        let rim = session.court().rim.clone();
        for (i, segment) in rim.iter().take(3).enumerate() {
            session.world.queued_events.push(CollisionEvent::Contact {
                body: session.court().ball,
                other: *segment,
                other_tag: BodyTag::Rim,
                impact_speed: 2.0 + i as f32,
            });
        }
        session.world.queued_events.push(CollisionEvent::Contact {
            body: session.court().ball,
            other: rim[0],
            other_tag: BodyTag::Rim,
            impact_speed: 0.2,
        });
        session.tick(DT);

        let events = session.drain_events();
        let hits: Vec<_> = events
            .iter()
            .filter_map(|e| match e.event {
                GameEvent::RimHit { speed } => Some(speed),
                _ => None,
            })
            .collect();
        assert_eq!(hits, vec![4.0]);
    }

    #[test]
    fn test_bad_dt_is_ignored() {
        let mut session = GameSession::new(GameplayTuning::default(), RecordingWorld::default()).unwrap();
        session.tick(f32::NAN);
        session.tick(-1.0);
        session.tick(0.0);
        assert_eq!(session.frame(), 0);
        assert_eq!(session.world().steps, 0);
    }

    #[test]
    fn test_apply_tuning_updates_clock_cap() {
        let mut session = GameSession::new(GameplayTuning::default(), RecordingWorld::default()).unwrap();
        let tuning = GameplayTuning {
            shot_clock_max: 14.0,
            ..Default::default()
        };
        session.apply_tuning(tuning).unwrap();
        assert_eq!(session.snapshot().shot_clock, 14.0);

        let bad = GameplayTuning {
            gravity: -1.0,
            ..Default::default()
        };
        assert!(session.apply_tuning(bad).is_err());
        assert_eq!(session.tuning().shot_clock_max, 14.0);
    }
}
