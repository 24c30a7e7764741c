//! Static geometry generators. Everything here runs once at startup.

use std::f32::consts::{PI, TAU};
use glam::Vec3;
use super::traits::GeometryData;

/// Default sphere tessellation (rings and segments).
pub const SPHERE_PRECISION: u32 = 48;

/// Default orbit-ring segment count.
pub const ORBIT_SEGMENTS: u32 = 100;

/// Unit UV sphere as a flat triangle list (indices already expanded).
/// `u` wraps around the equator, `v` runs from the south pole to the north.
pub fn sphere(precision: u32) -> GeometryData {
    let prec = precision.max(3);
    let ring = prec + 1;

    let mut verts = Vec::with_capacity((ring * ring) as usize);
    let mut uvs = Vec::with_capacity((ring * ring) as usize);
    for i in 0..=prec {
        let v = i as f32 / prec as f32;
        let polar = PI * (1.0 - v);
        let y = polar.cos();
        let r = polar.sin();
        for j in 0..=prec {
            let u = j as f32 / prec as f32;
            let az = TAU * u;
            verts.push(Vec3::new(-az.cos() * r, y, az.sin() * r));
            uvs.push([u, v]);
        }
    }

    let mut geo = GeometryData {
        positions: Vec::with_capacity((prec * prec * 6) as usize),
        tex_coords: Vec::with_capacity((prec * prec * 6) as usize),
    };
    for i in 0..prec {
        for j in 0..prec {
            let a = (i * ring + j) as usize;
            let b = (i * ring + j + 1) as usize;
            let c = ((i + 1) * ring + j) as usize;
            let d = ((i + 1) * ring + j + 1) as usize;
            for idx in [a, b, d, a, d, c] {
                geo.positions.push(verts[idx]);
                geo.tex_coords.push(uvs[idx]);
            }
        }
    }
    geo
}

/// Unit quad centred on the origin in the XY plane, facing +Z.
pub fn unit_quad() -> GeometryData {
    let corners = [
        (Vec3::new(-0.5, -0.5, 0.0), [0.0, 0.0]),
        (Vec3::new(0.5, -0.5, 0.0), [1.0, 0.0]),
        (Vec3::new(0.5, 0.5, 0.0), [1.0, 1.0]),
        (Vec3::new(-0.5, 0.5, 0.0), [0.0, 1.0]),
    ];
    let mut geo = GeometryData::default();
    for idx in [0usize, 1, 2, 0, 2, 3] {
        geo.positions.push(corners[idx].0);
        geo.tex_coords.push(corners[idx].1);
    }
    geo
}

/// Unit circle in the XZ plane for line-loop drawing.
pub fn circle(segments: u32) -> GeometryData {
    let segments = segments.max(3);
    let positions = (0..segments)
        .map(|j| {
            let angle = TAU * j as f32 / segments as f32;
            Vec3::new(angle.cos(), 0.0, angle.sin())
        })
        .collect();
    GeometryData {
        positions,
        tex_coords: Vec::new(),
    }
}
