//! Input aggregation
//!
//! Several devices can steer and charge at once. The aggregator merges
//! them into one `InputFrame` per simulation tick: a movement vector with
//! magnitude at most 1, a level-triggered `charging` flag, and one-shot
//! `pressed`/`released` edges that fire once per press cycle no matter how
//! many sources took part.

use std::collections::HashSet;

use bevy::math::Vec2;

use crate::helpers::sanitize_axis;

/// Anything that can hold the charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChargeSource {
    Keyboard,
    Gamepad,
    Mouse,
    ScreenButton,
}

/// Digital movement keys. Forward points at the hoop (-Z).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Forward,
    Back,
}

impl Direction {
    fn vector(self) -> Vec2 {
        match self {
            Direction::Left => Vec2::new(-1.0, 0.0),
            Direction::Right => Vec2::new(1.0, 0.0),
            Direction::Forward => Vec2::new(0.0, -1.0),
            Direction::Back => Vec2::new(0.0, 1.0),
        }
    }
}

/// Analog sticks (physical or on-screen)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StickSource {
    Gamepad,
    Touch,
}

/// Normalized input for one tick. `movement` is on the court plane (x, z).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputFrame {
    pub movement: Vec2,
    pub charging: bool,
    /// No source held the charge at the previous sample and one does now
    pub pressed: bool,
    /// Every source let go since the previous sample
    pub released: bool,
}

impl InputFrame {
    /// No movement, no charge, no edges
    pub fn neutral() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    directions: HashSet<Direction>,
    gamepad_stick: Vec2,
    touch_stick: Vec2,
    charge_sources: HashSet<ChargeSource>,
    pressed_edge: bool,
    released_edge: bool,
    deadzone: f32,
}

impl InputAggregator {
    pub fn new(deadzone: f32) -> Self {
        Self {
            deadzone: deadzone.clamp(0.0, 1.0),
            ..Default::default()
        }
    }

    pub fn set_deadzone(&mut self, deadzone: f32) {
        self.deadzone = if deadzone.is_finite() {
            deadzone.clamp(0.0, 1.0)
        } else {
            0.0
        };
    }

    pub fn set_direction(&mut self, direction: Direction, held: bool) {
        if held {
            self.directions.insert(direction);
        } else {
            self.directions.remove(&direction);
        }
    }

    /// Latest stick deflection; axes are clamped to [-1, 1], NaN reads as 0
    pub fn set_stick(&mut self, source: StickSource, value: Vec2) {
        let value = Vec2::new(sanitize_axis(value.x), sanitize_axis(value.y));
        match source {
            StickSource::Gamepad => self.gamepad_stick = value,
            StickSource::Touch => self.touch_stick = value,
        }
    }

    pub fn set_charge(&mut self, source: ChargeSource, held: bool) {
        let was_charging = self.is_charging();
        if held {
            self.charge_sources.insert(source);
        } else {
            self.charge_sources.remove(&source);
        }
        let charging = self.is_charging();

        if !was_charging && charging {
            self.pressed_edge = true;
        }
        if was_charging && !charging {
            self.released_edge = true;
        }
    }

    pub fn is_charging(&self) -> bool {
        !self.charge_sources.is_empty()
    }

    /// Drop every held input (focus loss, session restart).
    /// A charge in progress is abandoned without a release edge, so the
    /// controller cancels it instead of shooting.
    pub fn release_all(&mut self) {
        self.directions.clear();
        self.gamepad_stick = Vec2::ZERO;
        self.touch_stick = Vec2::ZERO;
        self.charge_sources.clear();
        self.pressed_edge = false;
        self.released_edge = false;
    }

    fn stick(&self, value: Vec2) -> Vec2 {
        if value.length() <= self.deadzone {
            Vec2::ZERO
        } else {
            value
        }
    }

    /// Current movement vector without consuming edges
    pub fn movement(&self) -> Vec2 {
        let keys: Vec2 = self.directions.iter().map(|d| d.vector()).sum();
        let total = keys + self.stick(self.gamepad_stick) + self.stick(self.touch_stick);
        total.clamp_length_max(1.0)
    }

    /// Produce this tick's frame and consume the edges
    pub fn sample(&mut self) -> InputFrame {
        let frame = InputFrame {
            movement: self.movement(),
            charging: self.is_charging(),
            pressed: self.pressed_edge,
            released: self.released_edge,
        };
        self.pressed_edge = false;
        self.released_edge = false;
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlapping_sources_release_once() {
        let mut input = InputAggregator::new(0.2);
        input.set_charge(ChargeSource::Keyboard, true);
        input.set_charge(ChargeSource::ScreenButton, true);

        let first = input.sample();
        assert!(first.charging && first.pressed && !first.released);

        input.set_charge(ChargeSource::Keyboard, false);
        let still_held = input.sample();
        assert!(still_held.charging);
        assert!(!still_held.released, "one source still holds the charge");

        input.set_charge(ChargeSource::ScreenButton, false);
        let released = input.sample();
        assert!(!released.charging && released.released);

        // The edge is consumed by the sample that reported it
        assert!(!input.sample().released);
    }

    #[test]
    fn test_repeated_release_reports_are_harmless() {
        let mut input = InputAggregator::new(0.2);
        input.set_charge(ChargeSource::Mouse, true);
        input.set_charge(ChargeSource::Mouse, false);
        input.set_charge(ChargeSource::Mouse, false);
        input.set_charge(ChargeSource::Gamepad, false);

        let frame = input.sample();
        assert!(frame.pressed && frame.released);
        assert!(!input.sample().released);
    }

    #[test]
    fn test_movement_is_capped_to_unit_length() {
        let mut input = InputAggregator::new(0.2);
        input.set_direction(Direction::Right, true);
        input.set_direction(Direction::Forward, true);
        input.set_stick(StickSource::Gamepad, Vec2::new(1.0, -1.0));

        let m = input.sample().movement;
        assert!(m.length() <= 1.0 + 1e-5);
        assert!(m.x > 0.0 && m.y < 0.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut input = InputAggregator::new(0.2);
        input.set_direction(Direction::Left, true);
        input.set_direction(Direction::Right, true);
        assert_eq!(input.sample().movement, Vec2::ZERO);
    }

    #[test]
    fn test_stick_deadzone_and_garbage() {
        let mut input = InputAggregator::new(0.2);
        input.set_stick(StickSource::Gamepad, Vec2::new(0.1, 0.1));
        assert_eq!(input.movement(), Vec2::ZERO);

        input.set_stick(StickSource::Touch, Vec2::new(f32::NAN, 5.0));
        assert_eq!(input.movement(), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_release_all_abandons_charge_without_release() {
        let mut input = InputAggregator::new(0.2);
        input.set_direction(Direction::Back, true);
        input.set_charge(ChargeSource::Keyboard, true);
        input.sample();

        input.release_all();
        let frame = input.sample();
        assert!(!frame.released);
        assert!(!frame.pressed);
        assert!(!frame.charging);
        assert_eq!(frame.movement, Vec2::ZERO);
    }

    #[test]
    fn test_release_all_swallows_unsampled_press() {
        let mut input = InputAggregator::new(0.2);
        input.set_charge(ChargeSource::Mouse, true);
        input.release_all();

        let frame = input.sample();
        assert!(!frame.pressed);
        assert!(!frame.charging);
    }
}
