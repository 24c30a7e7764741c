/// Cubic Bézier evaluation for camera paths.

use glam::Vec3;

/// Parameter step used to estimate the direction of travel.
pub const DIRECTION_EPSILON: f32 = 0.02;

/// Below this length a finite-difference heading is considered degenerate.
pub const MIN_HEADING_LEN: f32 = 0.001;

/// Four control points of one cubic segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathData {
    pub p0: Vec3,
    pub p1: Vec3,
    pub p2: Vec3,
    pub p3: Vec3,
}

impl PathData {
    pub fn new(p0: Vec3, p1: Vec3, p2: Vec3, p3: Vec3) -> Self {
        Self { p0, p1, p2, p3 }
    }

    /// Bernstein blend at `t` (clamped to [0, 1]). Exact at both ends.
    pub fn point(&self, t: f32) -> Vec3 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 {
            return self.p0;
        }
        if t == 1.0 {
            return self.p3;
        }
        let u = 1.0 - t;
        let b0 = u * u * u;
        let b1 = 3.0 * u * u * t;
        let b2 = 3.0 * u * t * t;
        let b3 = t * t * t;
        self.p0 * b0 + self.p1 * b1 + self.p2 * b2 + self.p3 * b3
    }

    /// Unit vector from the point at `t_prev` to the point at `t`.
    /// Falls back to `fallback` (normalized, else +Z) when the two points
    /// nearly coincide.
    pub fn heading(&self, t: f32, t_prev: f32, fallback: Vec3) -> Vec3 {
        let delta = self.point(t) - self.point(t_prev);
        if delta.length() > MIN_HEADING_LEN {
            delta.normalize()
        } else {
            log::debug!("degenerate path heading at t={t}, using fallback");
            fallback.try_normalize().unwrap_or(Vec3::Z)
        }
    }

    /// Finite-difference direction at `t`, looking back `DIRECTION_EPSILON`.
    pub fn direction(&self, t: f32, fallback: Vec3) -> Vec3 {
        self.heading(t, (t - DIRECTION_EPSILON).max(0.0), fallback)
    }
}
