//! Shot power accumulation

/// Power accumulator, percent in [0, 100].
///
/// Power only grows while charging and only drops on `reset` (release or
/// forced reset); idle time never drains it.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShotCharge {
    percent: f32,
}

impl ShotCharge {
    /// Add `rate * dt` percent, clamped to 100
    pub fn accumulate(&mut self, rate: f32, dt: f32) {
        let gained = rate * dt;
        if !gained.is_finite() || gained <= 0.0 {
            return;
        }
        self.percent = (self.percent + gained).clamp(0.0, 100.0);
    }

    pub fn percent(&self) -> f32 {
        self.percent
    }

    /// Power as a fraction in [0, 1] for the trajectory solver
    pub fn fraction(&self) -> f32 {
        self.percent / 100.0
    }

    /// True when a release at this power should produce a shot
    pub fn clears_dead_zone(&self, min_percent: f32) -> bool {
        self.percent > min_percent
    }

    pub fn reset(&mut self) {
        self.percent = 0.0;
    }
}
