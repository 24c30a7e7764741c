/// Circular orbital model: pure functions of body and global time.
///
/// Angles are formed in f64 and wrapped before narrowing to f32, so
/// positions stay precise however large the global clock grows.

use std::f64::consts::TAU;
use glam::Vec3;

use crate::bodies::{CelestialBody, Moon};

/// `time · speed`, wrapped to one turn.
#[inline]
pub fn angle(global_time: f64, speed: f32) -> f32 {
    (global_time * speed as f64).rem_euclid(TAU) as f32
}

/// Point on a circle of `radius` in the XZ plane: `(r·sin θ, 0, r·cos θ)`.
#[inline]
pub fn circle_point(radius: f32, theta: f32) -> Vec3 {
    Vec3::new(theta.sin() * radius, 0.0, theta.cos() * radius)
}

/// Heliocentric position of a body.
pub fn body_position(body: &CelestialBody, global_time: f64) -> Vec3 {
    circle_point(body.orbit_radius, angle(global_time, body.orbit_speed))
}

/// Position of a body on an orbit of a different (display) radius,
/// keeping its true orbital phase.
pub fn body_position_at_radius(body: &CelestialBody, radius: f32, global_time: f64) -> Vec3 {
    circle_point(radius, angle(global_time, body.orbit_speed))
}

/// Moon position around its parent. `orbit_scale` stretches the moon's
/// orbit for display; navigation uses 1.0.
pub fn moon_position(parent: Vec3, moon: &Moon, orbit_scale: f32, global_time: f64) -> Vec3 {
    parent + circle_point(moon.orbit_radius * orbit_scale, angle(global_time, moon.orbit_speed))
}

/// Spin angle for a sphere rotating at `speed`.
#[inline]
pub fn spin(global_time: f64, speed: f32) -> f32 {
    angle(global_time, speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Catalog;

    #[test]
    fn starts_on_the_positive_z_axis() {
        let catalog = Catalog::solar_system();
        let earth = catalog.body(2).unwrap();
        let p = body_position(earth, 0.0);
        assert!((p - Vec3::new(0.0, 0.0, 107.0)).length() < 1e-4);
    }

    #[test]
    fn stays_on_its_circle() {
        let catalog = Catalog::solar_system();
        for body in catalog.bodies() {
            for t in [0.0, 1.5, 250.0, 1.0e7] {
                let p = body_position(body, t);
                assert_eq!(p.y, 0.0);
                assert!((p.length() - body.orbit_radius).abs() < body.orbit_radius * 1e-5);
            }
        }
    }

    #[test]
    fn motion_is_continuous() {
        let catalog = Catalog::solar_system();
        let dt = 0.01;
        for body in catalog.bodies() {
            // Max displacement over dt is the arc length r·ω·dt.
            let bound = body.orbit_radius * body.orbit_speed * dt as f32 * 1.01 + 1e-3;
            let mut t = 0.0;
            while t < 100.0 {
                let step = (body_position(body, t + dt) - body_position(body, t)).length();
                assert!(step <= bound, "{} jumped {step} at t={t}", body.name);
                t += 3.7;
            }
        }
    }

    #[test]
    fn deterministic_for_identical_inputs() {
        let catalog = Catalog::solar_system();
        let jupiter = catalog.body(4).unwrap();
        assert_eq!(body_position(jupiter, 812.25), body_position(jupiter, 812.25));
    }

    #[test]
    fn moons_ride_with_their_parent() {
        let catalog = Catalog::solar_system();
        let jupiter = catalog.body(4).unwrap();
        let t = 42.0;
        let parent = body_position(jupiter, t);
        for moon in &jupiter.moons {
            let m = moon_position(parent, moon, 1.0, t);
            assert!(((m - parent).length() - moon.orbit_radius).abs() < 1e-3);
            let wide = moon_position(parent, moon, 15.0, t);
            assert!(((wide - parent).length() - moon.orbit_radius * 15.0).abs() < 1e-2);
        }
    }

    #[test]
    fn display_radius_keeps_phase() {
        let catalog = Catalog::solar_system();
        let mars = catalog.body(3).unwrap();
        let t = 77.0;
        let true_dir = body_position(mars, t).normalize();
        let shown = body_position_at_radius(mars, 20.0, t);
        assert!((shown.length() - 20.0).abs() < 1e-4);
        assert!(shown.normalize().dot(true_dir) > 0.9999);
    }

    #[test]
    fn large_times_stay_precise() {
        // An epoch-millisecond clock divided by 100 lands around 1.7e10.
        let catalog = Catalog::solar_system();
        let mercury = catalog.body(0).unwrap();
        let t = 1.7e10;
        let a = body_position(mercury, t);
        let b = body_position(mercury, t + 0.01);
        let step = (b - a).length();
        let expected = mercury.orbit_radius * mercury.orbit_speed * 0.01;
        assert!((step - expected).abs() < expected * 0.05, "step {step}, expected {expected}");
    }
}
