//! Ballistic trajectory solver
//!
//! Converts a charge level and the launch/target geometry into the initial
//! velocity that lands the ball on the target under constant gravity.
//! Flight time is picked first (bounded, strictly positive); for a fixed
//! time the solution is closed-form and exact on every axis:
//!
//! ```text
//! vx = dx / t
//! vz = dz / t
//! vy = (dy + ½·g·t²) / t
//! ```

use bevy::math::Vec3;

use crate::tuning::FlightTimeParams;

/// Below this horizontal distance the shot is a straight vertical lob
pub const HORIZONTAL_EPSILON: f32 = 1e-4;

/// Inputs to one trajectory solve. Built at release, consumed immediately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub origin: Vec3,
    pub target: Vec3,
    /// Seconds from release to reaching `target`
    pub flight_time: f32,
    /// Gravity magnitude (m/s², positive)
    pub gravity: f32,
}

impl ShotRequest {
    /// Build a request, deriving flight time from distance and power
    pub fn new(origin: Vec3, target: Vec3, power: f32, gravity: f32, params: &FlightTimeParams) -> Self {
        Self {
            origin,
            target,
            flight_time: flight_time(origin.distance(target), power, params),
            gravity,
        }
    }

    /// Initial velocity for this request
    pub fn solve(&self) -> Vec3 {
        solve_with_time(self.origin, self.target, self.flight_time, self.gravity)
    }
}

/// Flight time as an affine function of distance and power, clamped to
/// `[params.min, params.max]`.
///
/// More charge than `neutral_power` shortens the flight (flatter arc),
/// less charge lengthens it (taller arc).
pub fn flight_time(distance: f32, power: f32, params: &FlightTimeParams) -> f32 {
    let power = if power.is_finite() {
        power.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let distance = if distance.is_finite() {
        distance.max(0.0)
    } else {
        0.0
    };

    let t = params.base
        + params.per_meter * distance
        + params.power_scale * (params.neutral_power - power);

    if t.is_finite() {
        t.clamp(params.min, params.max)
    } else {
        params.max
    }
}

/// Solve with the default flight-time coefficients.
///
/// `power` is the charge fraction in [0, 1]. Callers enforce the power
/// dead-zone before calling.
pub fn solve(origin: Vec3, target: Vec3, power: f32, gravity: f32) -> Vec3 {
    ShotRequest::new(origin, target, power, gravity, &FlightTimeParams::default()).solve()
}

/// Exact launch velocity reaching `target` after `t` seconds.
///
/// `t` must be strictly positive; the flight-time clamp guarantees it for
/// every caller inside the crate.
pub fn solve_with_time(origin: Vec3, target: Vec3, t: f32, gravity: f32) -> Vec3 {
    debug_assert!(t > 0.0, "flight time must be positive");

    let dx = target.x - origin.x;
    let dy = target.y - origin.y;
    let dz = target.z - origin.z;

    let (vx, vz) = if (dx * dx + dz * dz).sqrt() < HORIZONTAL_EPSILON {
        (0.0, 0.0)
    } else {
        (dx / t, dz / t)
    };
    let vy = (dy + 0.5 * gravity * t * t) / t;

    Vec3::new(vx, vy, vz)
}

/// Position after `time` seconds of free flight under constant gravity
pub fn position_at(origin: Vec3, velocity: Vec3, gravity: f32, time: f32) -> Vec3 {
    origin + velocity * time - Vec3::Y * (0.5 * gravity * time * time)
}

/// Backspin angular velocity for a shot travelling along `velocity`.
///
/// Spin axis is horizontal and perpendicular to the shot so the top of the
/// ball turns back toward the shooter. Vertical lobs spin about +X.
pub fn backspin(velocity: Vec3, rate: f32) -> Vec3 {
    let heading = Vec3::new(velocity.x, 0.0, velocity.z).normalize_or_zero();
    let axis = heading.cross(Vec3::Y);
    if axis.length_squared() < f32::EPSILON {
        Vec3::X * rate
    } else {
        axis.normalize() * rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::GRAVITY;
    use proptest::prelude::*;

    #[test]
    fn test_free_throw_example() {
        // Origin (0,2,6) to (0,3.05,-12) at 80% charge: t = 0.8 + 0.05·18.03
        let origin = Vec3::new(0.0, 2.0, 6.0);
        let target = Vec3::new(0.0, 3.05, -12.0);
        let request = ShotRequest::new(origin, target, 0.8, GRAVITY, &FlightTimeParams::default());

        assert!((request.flight_time - 1.70).abs() < 0.01, "t = {}", request.flight_time);

        let v = request.solve();
        assert_eq!(v.x, 0.0);
        assert!((v.z - -10.59).abs() < 0.02, "vz = {}", v.z);
        assert!((v.y - 8.95).abs() < 0.02, "vy = {}", v.y);

        let landed = position_at(origin, v, GRAVITY, request.flight_time);
        assert!(landed.distance(target) < 1e-3, "landed at {:?}", landed);
    }

    #[test]
    fn test_more_power_flattens_the_arc() {
        let params = FlightTimeParams::default();
        let soft = flight_time(7.0, 0.2, &params);
        let hard = flight_time(7.0, 1.0, &params);
        assert!(hard < soft);

        let origin = Vec3::new(0.0, 0.12, -5.0);
        let target = Vec3::new(0.0, 3.05, -11.6);
        let soft_v = solve(origin, target, 0.2, GRAVITY);
        let hard_v = solve(origin, target, 1.0, GRAVITY);
        assert!(soft_v.y > hard_v.y, "lower charge should loft higher");
    }

    #[test]
    fn test_flight_time_bounds() {
        let params = FlightTimeParams::default();
        assert!((flight_time(0.0, 1.0, &params) - 0.7).abs() < 1e-5);
        assert_eq!(flight_time(500.0, 0.0, &params), params.max);
        // Non-finite inputs fall back to zero distance and zero power
        assert!((flight_time(f32::NAN, f32::NAN, &params) - 1.2).abs() < 1e-5);
    }

    #[test]
    fn test_vertical_lob_has_no_horizontal_speed() {
        let origin = Vec3::new(1.0, 1.0, 1.0);
        let target = Vec3::new(1.0, 3.0, 1.0);
        let v = solve(origin, target, 0.5, GRAVITY);
        assert_eq!(v.x, 0.0);
        assert_eq!(v.z, 0.0);
        assert!(v.y > 0.0);
        assert!(v.is_finite());
    }

    #[test]
    fn test_backspin_opposes_travel() {
        let spin = backspin(Vec3::new(0.0, 8.0, -6.0), 5.0);
        assert!((spin - Vec3::new(5.0, 0.0, 0.0)).length() < 1e-5);

        let lob = backspin(Vec3::new(0.0, 8.0, 0.0), 5.0);
        assert_eq!(lob, Vec3::X * 5.0);
    }

    proptest! {
        #[test]
        fn prop_solution_lands_on_target(
            ox in -15.0f32..15.0, oy in 0.0f32..4.0, oz in -15.0f32..15.0,
            tx in -15.0f32..15.0, ty in 0.0f32..5.0, tz in -15.0f32..15.0,
            t in 0.2f32..3.0,
            g in 1.0f32..25.0,
        ) {
            let origin = Vec3::new(ox, oy, oz);
            let target = Vec3::new(tx, ty, tz);
            let v = solve_with_time(origin, target, t, g);
            prop_assert!(v.is_finite());

            let landed = position_at(origin, v, g, t);
            prop_assert!((landed.x - target.x).abs() < 1e-3);
            prop_assert!((landed.y - target.y).abs() < 1e-3);
            prop_assert!((landed.z - target.z).abs() < 1e-3);
        }

        #[test]
        fn prop_flight_time_stays_in_bounds(distance in -10.0f32..200.0, power in -1.0f32..2.0) {
            let params = FlightTimeParams::default();
            let t = flight_time(distance, power, &params);
            prop_assert!(t >= params.min && t <= params.max);
        }
    }
}
