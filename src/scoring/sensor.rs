//! Scoring sensor
//!
//! A ball passing through the trigger volume overlaps it for several
//! consecutive substeps. The sensor turns that stream into at most one
//! `ScoreEvent` per cooldown window.

use bevy::log::debug;

use crate::physics::{BodyHandle, BodyTag, CollisionEvent};
use crate::tuning::SensorTuning;

/// An accepted basket at session time `time` (seconds)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreEvent {
    pub time: f64,
}

#[derive(Debug, Clone)]
pub struct ScoringSensor {
    trigger: BodyHandle,
    last_accepted: Option<f64>,
    tuning: SensorTuning,
}

impl ScoringSensor {
    pub fn new(trigger: BodyHandle, tuning: SensorTuning) -> Self {
        Self {
            trigger,
            last_accepted: None,
            tuning,
        }
    }

    pub fn set_tuning(&mut self, tuning: SensorTuning) {
        self.tuning = tuning;
    }

    pub fn last_accepted(&self) -> Option<f64> {
        self.last_accepted
    }

    /// Forget the debounce history (match restart)
    pub fn clear(&mut self) {
        self.last_accepted = None;
    }

    /// Feed one collision event; returns a score if it qualifies
    pub fn observe(&mut self, event: &CollisionEvent, now: f64) -> Option<ScoreEvent> {
        let CollisionEvent::Overlap {
            trigger,
            other_tag,
            other_is_sensor,
            other_velocity,
            ..
        } = *event
        else {
            return None;
        };

        if trigger != self.trigger || other_is_sensor || other_tag != BodyTag::Ball {
            return None;
        }

        // Rising through the net from below is not a basket
        if self.tuning.require_descending && other_velocity.y >= 0.0 {
            return None;
        }

        if let Some(last) = self.last_accepted {
            if now - last < self.tuning.cooldown as f64 {
                debug!("Overlap at {:.3}s inside debounce window", now);
                return None;
            }
        }

        self.last_accepted = Some(now);
        debug!("Score accepted at {:.3}s", now);
        Some(ScoreEvent { time: now })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    const TRIGGER: BodyHandle = BodyHandle(7);
    const BALL: BodyHandle = BodyHandle(1);

    fn overlap(tag: BodyTag, vy: f32) -> CollisionEvent {
        CollisionEvent::Overlap {
            trigger: TRIGGER,
            other: BALL,
            other_tag: tag,
            other_is_sensor: false,
            other_velocity: Vec3::new(0.0, vy, -1.0),
        }
    }

    fn sensor() -> ScoringSensor {
        ScoringSensor::new(TRIGGER, SensorTuning::default())
    }

    #[test]
    fn test_burst_within_window_scores_once() {
        let mut sensor = sensor();
        let accepted = (0..5)
            .filter_map(|i| sensor.observe(&overlap(BodyTag::Ball, -3.0), 10.0 + i as f64 * 0.3))
            .count();
        assert_eq!(accepted, 1);
        assert_eq!(sensor.last_accepted(), Some(10.0));
    }

    #[test]
    fn test_accepts_again_after_cooldown() {
        let mut sensor = sensor();
        assert!(sensor.observe(&overlap(BodyTag::Ball, -3.0), 1.0).is_some());
        assert!(sensor.observe(&overlap(BodyTag::Ball, -3.0), 2.99).is_none());
        assert!(sensor.observe(&overlap(BodyTag::Ball, -3.0), 3.0).is_some());
    }

    #[test]
    fn test_only_the_ball_counts() {
        let mut sensor = sensor();
        assert!(sensor.observe(&overlap(BodyTag::Rim, -3.0), 1.0).is_none());
        assert!(sensor.observe(&overlap(BodyTag::Backboard, -3.0), 1.0).is_none());

        let sensor_body = CollisionEvent::Overlap {
            trigger: TRIGGER,
            other: BodyHandle(3),
            other_tag: BodyTag::Ball,
            other_is_sensor: true,
            other_velocity: Vec3::NEG_Y,
        };
        assert!(sensor.observe(&sensor_body, 1.0).is_none());

        let other_trigger = CollisionEvent::Overlap {
            trigger: BodyHandle(99),
            other: BALL,
            other_tag: BodyTag::Ball,
            other_is_sensor: false,
            other_velocity: Vec3::NEG_Y,
        };
        assert!(sensor.observe(&other_trigger, 1.0).is_none());

        let contact = CollisionEvent::Contact {
            body: BALL,
            other: TRIGGER,
            other_tag: BodyTag::ScoreTrigger,
            impact_speed: 4.0,
        };
        assert!(sensor.observe(&contact, 1.0).is_none());
        // Rejected events never start the debounce window
        assert_eq!(sensor.last_accepted(), None);
    }

    #[test]
    fn test_upward_pass_ignored_when_descending_required() {
        let mut sensor = sensor();
        assert!(sensor.observe(&overlap(BodyTag::Ball, 2.0), 1.0).is_none());

        sensor.set_tuning(SensorTuning {
            require_descending: false,
            ..SensorTuning::default()
        });
        assert!(sensor.observe(&overlap(BodyTag::Ball, 2.0), 1.0).is_some());
    }
}
