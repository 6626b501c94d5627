//! Match clock / game state machine
//!
//! Running → PausedScoring on an accepted basket, Running → PausedViolation
//! when the shot clock hits zero. Both pauses run the same sequence through
//! the deferred queue: ball reset, settle, clock reload, resume. Only one
//! sequence can be in flight; `resetting` guards the overlap.

use bevy::log::{debug, info};

use super::ScoreEvent;
use crate::schedule::DeferredQueue;
use crate::tuning::ClockTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockPhase {
    Running,
    PausedScoring,
    PausedViolation,
}

/// Score, clock and reset bookkeeping for the single match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchState {
    pub score: u32,
    /// Seconds left, within [0, shot_clock_max]
    pub shot_clock: f32,
    pub paused: bool,
    /// A reset sequence is in flight
    pub resetting: bool,
    /// Consecutive makes inside the combo window
    pub combo: u32,
}

/// Transitions reported to the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClockSignal {
    Scored { points: u32, total: u32, combo: u32 },
    /// Basket arrived while a reset sequence was already running
    ScoreIgnored,
    Violation,
    /// The controller should snap the ball back to its start
    ResetBall,
    Resumed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    ResetBall,
    Resume,
}

#[derive(Debug, Clone)]
pub struct MatchClock {
    state: MatchState,
    phase: ClockPhase,
    steps: DeferredQueue<Step>,
    last_make: Option<f64>,
    tuning: ClockTuning,
}

impl MatchClock {
    pub fn new(tuning: ClockTuning) -> Self {
        Self {
            state: MatchState {
                score: 0,
                shot_clock: tuning.shot_clock_max,
                paused: false,
                resetting: false,
                combo: 0,
            },
            phase: ClockPhase::Running,
            steps: DeferredQueue::new(),
            last_make: None,
            tuning,
        }
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == ClockPhase::Running
    }

    /// Swap tuning; a lower clock max also caps the current clock
    pub fn set_tuning(&mut self, tuning: ClockTuning) {
        self.tuning = tuning;
        self.state.shot_clock = self.state.shot_clock.min(tuning.shot_clock_max);
    }

    /// Force the clock value (scripted setups); clamped into range
    pub fn set_shot_clock(&mut self, seconds: f32) {
        self.state.shot_clock = if seconds.is_finite() {
            seconds.clamp(0.0, self.tuning.shot_clock_max)
        } else {
            self.tuning.shot_clock_max
        };
    }

    /// Start a fresh match
    pub fn restart(&mut self) {
        *self = Self::new(self.tuning);
        info!("Match restarted");
    }

    /// Apply an accepted basket at session time `now`
    pub fn on_score(&mut self, event: &ScoreEvent, now: f64) -> ClockSignal {
        if self.state.resetting {
            debug!("Basket at {:.2}s ignored: reset already in flight", event.time);
            return ClockSignal::ScoreIgnored;
        }

        let streak_alive = self
            .last_make
            .is_some_and(|last| now - last <= self.tuning.combo_window as f64);
        self.state.combo = if streak_alive { self.state.combo + 1 } else { 1 };
        self.last_make = Some(now);

        let points = if self.state.combo >= self.tuning.combo_threshold {
            self.tuning.points_per_basket * self.tuning.combo_multiplier
        } else {
            self.tuning.points_per_basket
        };
        self.state.score += points;

        self.enter_pause(ClockPhase::PausedScoring);
        let reset_at = now + self.tuning.celebration_duration as f64;
        self.steps.schedule(reset_at, Step::ResetBall);
        self.steps
            .schedule(reset_at + self.tuning.settle_delay as f64, Step::Resume);

        info!(
            "Basket! +{} (score {}, combo {})",
            points, self.state.score, self.state.combo
        );
        ClockSignal::Scored {
            points,
            total: self.state.score,
            combo: self.state.combo,
        }
    }

    /// Advance by `dt` seconds ending at session time `now`
    pub fn tick(&mut self, dt: f32, now: f64) -> Vec<ClockSignal> {
        let mut signals = Vec::new();

        if self.phase == ClockPhase::Running && dt > 0.0 && dt.is_finite() {
            self.state.shot_clock = (self.state.shot_clock - dt).max(0.0);
        }

        if self.phase == ClockPhase::Running
            && self.state.shot_clock <= 0.0
            && !self.state.resetting
        {
            info!("Shot clock violation");
            self.state.combo = 0;
            self.last_make = None;
            self.enter_pause(ClockPhase::PausedViolation);
            self.steps.schedule(now, Step::ResetBall);
            self.steps
                .schedule(now + self.tuning.settle_delay as f64, Step::Resume);
            signals.push(ClockSignal::Violation);
        }

        for step in self.steps.drain_due(now) {
            match step {
                Step::ResetBall => signals.push(ClockSignal::ResetBall),
                Step::Resume => {
                    self.state.shot_clock = self.tuning.shot_clock_max;
                    self.state.paused = false;
                    self.state.resetting = false;
                    self.phase = ClockPhase::Running;
                    debug!("Clock resumed at {:.1}s", self.state.shot_clock);
                    signals.push(ClockSignal::Resumed);
                }
            }
        }

        signals
    }

    fn enter_pause(&mut self, phase: ClockPhase) {
        self.phase = phase;
        self.state.paused = true;
        self.state.resetting = true;
    }
}
