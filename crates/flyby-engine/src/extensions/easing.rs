// extensions/easing.rs
//
// Pure easing and interpolation helpers for camera motion.
// Plain math, no engine state.

use std::f32::consts::PI;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Easing curve applied to a normalized progress value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    /// Constant velocity.
    Linear,
    /// Slow start and end.
    QuadInOut,
    /// Stronger slow start and end. Used for camera transitions.
    #[default]
    CubicInOut,
    /// Sine-shaped slow start and end.
    SineInOut,
}

impl Easing {
    /// Apply the easing function to `t`, clamped to [0, 1].
    #[inline]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
        }
    }
}

// ── Interpolation helpers ────────────────────────────────────────────────

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
pub fn lerp_vec3(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a + (b - a) * t
}

/// Hermite smoothstep of `x` between `edge0` and `edge1`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cubic_in_out_fixed_points() {
        assert_eq!(Easing::CubicInOut.apply(0.0), 0.0);
        assert_eq!(Easing::CubicInOut.apply(1.0), 1.0);
        assert!((Easing::CubicInOut.apply(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn cubic_in_out_is_monotonic() {
        let mut prev = 0.0;
        for i in 0..=1000 {
            let v = Easing::CubicInOut.apply(i as f32 / 1000.0);
            assert!(v >= prev, "decreased at step {i}: {v} < {prev}");
            prev = v;
        }
    }

    #[test]
    fn apply_clamps_out_of_range_input() {
        assert_eq!(Easing::SineInOut.apply(-3.0), 0.0);
        assert_eq!(Easing::QuadInOut.apply(7.0), 1.0);
    }

    #[test]
    fn smoothstep_edges() {
        assert_eq!(smoothstep(0.7, 1.0, 0.2), 0.0);
        assert_eq!(smoothstep(0.7, 1.0, 1.0), 1.0);
        assert!((smoothstep(0.0, 1.0, 0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn lerp_vec3_midpoint() {
        let mid = lerp_vec3(Vec3::ZERO, Vec3::new(2.0, 4.0, -6.0), 0.5);
        assert_eq!(mid, Vec3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn easing_names_round_trip_through_json() {
        let e: Easing = serde_json::from_str(r#""SineInOut""#).unwrap();
        assert_eq!(e, Easing::SineInOut);
        assert_eq!(Easing::default(), Easing::CubicInOut);
        assert_eq!(Easing::Linear.apply(0.25), 0.25);
    }
}
