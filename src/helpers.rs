//! Utility functions for hoopshot

use bevy::math::{Vec2, Vec3};

/// Move a value toward a target by a maximum delta
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Court-plane (x, z) part of a 3D vector
pub fn horizontal(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Replace the court-plane part of `v`, keeping its vertical component
pub fn with_horizontal(v: Vec3, h: Vec2) -> Vec3 {
    Vec3::new(h.x, v.y, h.y)
}

/// Clamp an input axis to [-1, 1]; NaN/Inf collapse to 0
pub fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Convert a config triple into a vector
pub fn vec3_from(values: [f32; 3]) -> Vec3 {
    Vec3::from_array(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_toward_snaps_to_target() {
        assert_eq!(move_toward(3.9, 4.0, 0.5), 4.0);
        assert_eq!(move_toward(0.0, 4.0, 0.5), 0.5);
        assert_eq!(move_toward(0.0, -4.0, 0.5), -0.5);
    }

    #[test]
    fn test_sanitize_axis() {
        assert_eq!(sanitize_axis(f32::NAN), 0.0);
        assert_eq!(sanitize_axis(f32::INFINITY), 0.0);
        assert_eq!(sanitize_axis(3.0), 1.0);
        assert_eq!(sanitize_axis(-0.25), -0.25);
    }

    #[test]
    fn test_with_horizontal_keeps_vertical() {
        let v = with_horizontal(Vec3::new(1.0, -2.0, 3.0), Vec2::new(5.0, 6.0));
        assert_eq!(v, Vec3::new(5.0, -2.0, 6.0));
    }
}
