/// Transition path builder: synthesizes the interior control points of
/// the camera path from the current anchor to a destination body.

use glam::{Vec2, Vec3};

use crate::bezier::PathData;
use crate::bodies::TransitionStage;

// ── First hop (overview → first body) ────────────────────────────────

const FIRST_HOP_HEIGHT: f32 = 35.0;
const FIRST_HOP_SIDE_OUT: f32 = 15.0;
const FIRST_HOP_FORWARD: f32 = 8.0;
const FIRST_HOP_SIDE_IN: f32 = 8.0;
const FIRST_HOP_BACK: f32 = 10.0;

// ── Later hops ───────────────────────────────────────────────────────

const SUN_THRESHOLD_MIN: f32 = 40.0;
const HEIGHT_BOOST_BASE: f32 = 2.0;
const HEIGHT_BOOST_RANGE: f32 = 2.5;
const SUN_AVOID_STRENGTH: f32 = 8.0;
const SUN_AVOID_MIN_DIST: f32 = 0.1;

/// `p0` closer than this to the departed body triggers the side arc.
pub const PROXIMITY_RADIUS: f32 = 15.0;
const ARC_CLEARANCE: f32 = 8.0;
const ARC_LIFT: f32 = 0.15;

/// Inputs for one transition path.
#[derive(Debug, Clone, Copy)]
pub struct PathRequest<'a> {
    /// Committed camera anchor the path starts from.
    pub start: Vec3,
    /// Destination body position at this tick's global time.
    pub body_pos: Vec3,
    pub tuning: &'a TransitionStage,
    /// The very first hop away from the overview.
    pub first_hop: bool,
    /// Position of the body being left, when there is one.
    pub departed: Option<Vec3>,
}

/// Resting point beside a body: offset on every axis, half as much upward.
pub fn end_anchor(body_pos: Vec3, tuning: &TransitionStage) -> Vec3 {
    let e = tuning.end_offset;
    body_pos + Vec3::new(e, e * 0.5, e)
}

pub fn build(req: &PathRequest) -> PathData {
    let end = end_anchor(req.body_pos, req.tuning);
    if req.first_hop {
        first_hop(req.start, end)
    } else {
        let mut path = later_hop(req.start, end, req.tuning);
        if let Some(departed) = req.departed {
            apply_proximity_arc(&mut path, departed, req.body_pos);
        }
        path
    }
}

#[inline]
fn xz(v: Vec3) -> Vec2 {
    Vec2::new(v.x, v.z)
}

/// Sweeping departure: out to one side and up, then in from the other.
fn first_hop(start: Vec3, end: Vec3) -> PathData {
    let dir = xz(end - start).normalize_or_zero();
    let perp = Vec2::new(-dir.y, dir.x);

    let out = perp * FIRST_HOP_SIDE_OUT + dir * FIRST_HOP_FORWARD;
    let p1 = Vec3::new(
        start.x + out.x,
        start.y + FIRST_HOP_HEIGHT * 0.9,
        start.z + out.y,
    );
    let back = perp * FIRST_HOP_SIDE_IN - dir * FIRST_HOP_BACK;
    let p2 = Vec3::new(end.x + back.x, FIRST_HOP_HEIGHT * 0.7, end.z + back.y);

    PathData::new(start, p1, p2, end)
}

/// Interplanetary hop: control points at 20% / 70% of the way, raised, and
/// pushed outward from the sun. Paths whose midpoint passes near the sun
/// climb higher.
fn later_hop(start: Vec3, end: Vec3, tuning: &TransitionStage) -> PathData {
    let mid = (xz(start) + xz(end)) * 0.5;
    let dist_to_sun = mid.length();
    let path_dist = xz(end - start).length();

    let threshold = SUN_THRESHOLD_MIN.max(path_dist * 0.5);
    let height_mul = if dist_to_sun < threshold {
        HEIGHT_BOOST_BASE + (1.0 - dist_to_sun / threshold) * HEIGHT_BOOST_RANGE
    } else {
        1.0
    };
    let height = tuning.cp1.max(path_dist * 0.25) * height_mul;

    let avoid = mid * (SUN_AVOID_STRENGTH / dist_to_sun.max(SUN_AVOID_MIN_DIST));
    let span = xz(end - start);

    let a = xz(start) + span * 0.2 + avoid;
    let b = xz(start) + span * 0.7 + avoid * 0.5;
    PathData::new(
        start,
        Vec3::new(a.x, start.y + height * 0.85, a.y),
        Vec3::new(b.x, start.y + height * 0.75, b.y),
        end,
    )
}

/// Swing wide of a body the camera is still hugging.
fn apply_proximity_arc(path: &mut PathData, departed: Vec3, target: Vec3) {
    let to_departed = departed - path.p0;
    let dist = to_departed.length();
    if dist >= PROXIMITY_RADIUS {
        return;
    }
    let Some(side) = to_departed.cross(Vec3::Y).try_normalize() else {
        log::debug!("departed body straight above or below anchor, skipping arc");
        return;
    };
    let total = (target - path.p0).length();
    let offset = side * (dist + ARC_CLEARANCE) + Vec3::Y * (total * ARC_LIFT);
    path.p1 += offset;
    path.p2 += offset * 0.5;
}

#[cfg(test)]
mod tests {
    use super::*;

    const TUNING: TransitionStage = TransitionStage { end_offset: 4.0, cp1: 20.0, cp2: 0.7, cam_dist: 4.0 };

    fn request(start: Vec3, body_pos: Vec3, first_hop: bool) -> PathRequest<'static> {
        PathRequest { start, body_pos, tuning: &TUNING, first_hop, departed: None }
    }

    #[test]
    fn second_tuning_scalar_does_not_shape_paths() {
        let other = TransitionStage { cp2: 42.0, ..TUNING };
        let start = Vec3::new(60.0, 3.0, -20.0);
        let body = Vec3::new(-90.0, 0.0, 140.0);
        for first_hop in [true, false] {
            let a = build(&request(start, body, first_hop));
            let b = build(&PathRequest { tuning: &other, ..request(start, body, first_hop) });
            assert_eq!(a, b);
        }
    }

    #[test]
    fn end_anchor_is_offset_on_each_axis() {
        assert_eq!(end_anchor(Vec3::new(10.0, 0.0, -5.0), &TUNING), Vec3::new(14.0, 2.0, -1.0));
    }

    #[test]
    fn path_runs_from_anchor_to_end() {
        let start = Vec3::new(0.0, 0.0, 8.0);
        let body = Vec3::new(0.0, 0.0, 40.0);
        for first in [true, false] {
            let path = build(&request(start, body, first));
            assert_eq!(path.p0, start);
            assert_eq!(path.p3, end_anchor(body, &TUNING));
        }
    }

    #[test]
    fn first_hop_rises_to_fixed_height() {
        let start = Vec3::new(0.0, 0.0, 8.0);
        let path = build(&request(start, Vec3::new(0.0, 0.0, 40.0), true));
        assert!((path.p1.y - 31.5).abs() < 1e-4);
        assert!((path.p2.y - 24.5).abs() < 1e-4);
        // Lateral swing: p1 leaves the straight XZ line.
        let dir = xz(path.p3 - path.p0).normalize();
        let off = xz(path.p1 - path.p0);
        assert!((off.perp_dot(dir)).abs() > 10.0);
    }

    #[test]
    fn paths_near_the_sun_climb_higher() {
        let tuning = TransitionStage { end_offset: 0.0, ..TUNING };
        let across = PathRequest {
            start: Vec3::new(-60.0, 0.0, 0.0),
            body_pos: Vec3::new(60.0, 0.0, 1.0),
            tuning: &tuning,
            first_hop: false,
            departed: None,
        };
        let far = PathRequest {
            start: Vec3::new(1000.0, 0.0, 0.0),
            body_pos: Vec3::new(1000.0, 0.0, 120.0),
            ..across
        };
        // Both hops span ~120 units; only one passes the sun.
        let h_across = build(&across).p1.y;
        let h_far = build(&far).p1.y;
        assert!(h_across > h_far * 2.0, "{h_across} vs {h_far}");
        assert!((h_far - 30.0 * 0.85).abs() < 1e-3);
    }

    #[test]
    fn control_points_are_pushed_away_from_the_sun() {
        let start = Vec3::new(100.0, 0.0, 0.0);
        let body = Vec3::new(0.0, 0.0, 100.0);
        let path = build(&request(start, body, false));
        let end = end_anchor(body, &TUNING);
        let outward = ((xz(start) + xz(end)) * 0.5).normalize();
        let unshifted_p1 = xz(start) + xz(end - start) * 0.2;
        let unshifted_p2 = xz(start) + xz(end - start) * 0.7;
        assert!(((xz(path.p1) - unshifted_p1) - outward * 8.0).length() < 1e-3);
        assert!(((xz(path.p2) - unshifted_p2) - outward * 4.0).length() < 1e-3);
        assert!(xz(path.p1).dot(outward) > unshifted_p1.dot(outward));
    }

    #[test]
    fn arc_swings_wide_of_a_close_departed_body() {
        let start = Vec3::new(110.0, 2.0, 0.0);
        let departed = Vec3::new(107.0, 0.0, 0.0);
        let body = Vec3::new(0.0, 0.0, 150.0);
        let plain = build(&request(start, body, false));
        let arced = build(&PathRequest { departed: Some(departed), ..request(start, body, false) });

        let shift = arced.p1 - plain.p1;
        let dist = (departed - start).length();
        let total = (body - start).length();
        assert!((shift.y - total * 0.15).abs() < 1e-3);
        assert!((Vec2::new(shift.x, shift.z).length() - (dist + 8.0)).abs() < 1e-3);
        assert!(((arced.p2 - plain.p2) - shift * 0.5).length() < 1e-3);
        assert_eq!(arced.p0, plain.p0);
        assert_eq!(arced.p3, plain.p3);
    }

    #[test]
    fn distant_departed_body_leaves_path_alone() {
        let start = Vec3::new(110.0, 2.0, 0.0);
        let body = Vec3::new(0.0, 0.0, 150.0);
        let plain = build(&request(start, body, false));
        let req = PathRequest { departed: Some(Vec3::new(40.0, 0.0, 0.0)), ..request(start, body, false) };
        assert_eq!(build(&req), plain);
    }

    #[test]
    fn first_hop_ignores_departed_body() {
        let start = Vec3::new(0.0, 0.0, 8.0);
        let body = Vec3::new(0.0, 0.0, 40.0);
        let req = PathRequest { departed: Some(Vec3::new(0.0, 0.0, 9.0)), ..request(start, body, true) };
        assert_eq!(build(&req), build(&request(start, body, true)));
    }
}
