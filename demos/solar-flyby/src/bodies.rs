/// Body catalog: the sun's nine orbiting bodies, their moons, per-body
/// transition tuning, and the top-down display tables.
///
/// Orbit radii and speeds are artistic, not physical: every orbit is a
/// circle in the XZ plane swept at a constant angular speed.

use crate::error::NavigationError;

pub const BODY_COUNT: usize = 9;

// ── Textures ─────────────────────────────────────────────────────────

pub const SUN_TEXTURE: &str = "sun";
pub const STAR_TEXTURE: &str = "star";
pub const SKYDOME_TEXTURE: &str = "skydome";

// ── Records ──────────────────────────────────────────────────────────

/// A moon on a circular orbit around its parent body.
#[derive(Debug, Clone, PartialEq)]
pub struct Moon {
    pub name: &'static str,
    pub texture: &'static str,
    pub orbit_radius: f32,
    pub size: f32,
    /// Radians per global-time unit.
    pub orbit_speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: &'static str,
    pub texture: &'static str,
    pub orbit_radius: f32,
    /// Sphere radius in navigation mode.
    pub size: f32,
    /// Spin, radians per global-time unit.
    pub rotation_speed: f32,
    /// Orbital angular speed, radians per global-time unit.
    pub orbit_speed: f32,
    pub moons: Vec<Moon>,
}

impl CelestialBody {
    fn new(name: &'static str, texture: &'static str, orbit_radius: f32, size: f32, rotation_speed: f32, orbit_speed: f32) -> Self {
        Self {
            name,
            texture,
            orbit_radius,
            size,
            rotation_speed,
            orbit_speed,
            moons: Vec::new(),
        }
    }

    fn with_moon(mut self, name: &'static str, orbit_radius: f32, size: f32, orbit_speed: f32) -> Self {
        self.moons.push(Moon {
            name,
            texture: name,
            orbit_radius,
            size,
            orbit_speed,
        });
        self
    }
}

/// Per-body shaping of the camera path that arrives at that body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionStage {
    /// Resting offset from the body on each axis (half of it vertically).
    pub end_offset: f32,
    /// Minimum path height for long hops.
    pub cp1: f32,
    /// Tuning-table column the path builder does not read.
    pub cp2: f32,
    /// Viewing distance near this body.
    pub cam_dist: f32,
}

impl TransitionStage {
    const fn new(end_offset: f32, cp1: f32, cp2: f32, cam_dist: f32) -> Self {
        Self { end_offset, cp1, cp2, cam_dist }
    }
}

// ── Catalog ──────────────────────────────────────────────────────────

/// Immutable body list with one tuning entry per body, in body order.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    bodies: Vec<CelestialBody>,
    stages: Vec<TransitionStage>,
}

impl Catalog {
    pub fn new(bodies: Vec<CelestialBody>, stages: Vec<TransitionStage>) -> Self {
        Self { bodies, stages }
    }

    /// Mercury through Pluto, with Earth's moon and Jupiter's Galilean moons.
    pub fn solar_system() -> Self {
        let bodies = vec![
            CelestialBody::new("Mercury", "mercury", 40.0, 0.6, 1.0, 0.4),
            CelestialBody::new("Venus", "venus", 80.0, 0.95, 0.8, 0.3),
            CelestialBody::new("Earth", "earth", 107.0, 1.5, 0.6, 0.2)
                .with_moon("moon", 1.0, 0.5, 0.3),
            CelestialBody::new("Mars", "mars", 150.0, 0.85, 0.7, 0.1),
            CelestialBody::new("Jupiter", "jupiter", 520.0, 4.0, 0.4, 0.05)
                .with_moon("io", 2.0, 0.29, 0.8)
                .with_moon("europa", 3.0, 0.24, 0.5)
                .with_moon("ganymede", 4.0, 0.41, 0.35)
                .with_moon("callisto", 5.5, 0.38, 0.2),
            CelestialBody::new("Saturn", "saturn", 950.0, 3.0, 0.3, 0.03),
            CelestialBody::new("Uranus", "uranus", 1920.0, 2.4, 0.25, 0.02),
            CelestialBody::new("Neptune", "neptune", 3000.0, 2.0, 0.2, 0.01),
            CelestialBody::new("Pluto", "pluto", 3950.0, 0.4, 0.15, 0.008),
        ];
        let stages = vec![
            TransitionStage::new(2.0, 15.0, 0.7, 3.0),
            TransitionStage::new(3.0, 15.0, 0.7, 3.5),
            TransitionStage::new(4.0, 20.0, 0.7, 4.0),
            TransitionStage::new(5.0, 25.0, 0.7, 5.0),
            TransitionStage::new(20.0, 100.0, 0.5, 8.0),
            TransitionStage::new(25.0, 150.0, 0.5, 10.0),
            TransitionStage::new(8.0, 300.0, 0.5, 6.0),
            TransitionStage::new(8.0, 400.0, 0.5, 6.0),
            TransitionStage::new(2.5, 500.0, 0.5, 3.5),
        ];
        Self::new(bodies, stages)
    }

    /// Every body must have a tuning entry.
    pub fn validate(&self) -> Result<(), NavigationError> {
        if self.bodies.is_empty() {
            return Err(NavigationError::InvalidBodyIndex { index: 0, count: 0 });
        }
        if self.stages.len() < self.bodies.len() {
            return Err(NavigationError::MissingTuning(self.stages.len()));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Result<&CelestialBody, NavigationError> {
        self.bodies.get(index).ok_or(NavigationError::InvalidBodyIndex {
            index,
            count: self.bodies.len(),
        })
    }

    pub fn tuning(&self, index: usize) -> Result<&TransitionStage, NavigationError> {
        if index >= self.bodies.len() {
            return Err(NavigationError::InvalidBodyIndex {
                index,
                count: self.bodies.len(),
            });
        }
        self.stages.get(index).ok_or(NavigationError::MissingTuning(index))
    }

    /// Every texture name the catalog refers to, sun and star first.
    pub fn texture_names(&self, skydome: bool) -> Vec<&'static str> {
        let mut names = vec![SUN_TEXTURE, STAR_TEXTURE];
        if skydome {
            names.push(SKYDOME_TEXTURE);
        }
        for body in &self.bodies {
            names.push(body.texture);
            names.extend(body.moons.iter().map(|m| m.texture));
        }
        names
    }
}

// ── Top-down display tables ──────────────────────────────────────────

/// How body orbits are laid out in the top-down view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OrbitLayout {
    /// True orbit radii multiplied by a factor.
    Proportional(f32),
    /// One hand-picked radius per body.
    Fixed(&'static [f32]),
}

/// Display-only size and spacing parameters for the top-down view.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayScale {
    pub sun_size: f32,
    pub body_sizes: &'static [f32],
    pub orbits: OrbitLayout,
    pub moon_orbit_scale: f32,
    pub moon_size: f32,
}

/// Relative sizes at true spacing; the inner planets are specks.
pub const REALISTIC: DisplayScale = DisplayScale {
    sun_size: 5.0,
    body_sizes: &[0.2, 0.48, 0.5, 0.27, 5.5, 4.6, 2.0, 1.95, 0.1],
    orbits: OrbitLayout::Proportional(0.1),
    moon_orbit_scale: 15.0,
    moon_size: 0.27,
};

/// Evenly spaced orbits with enlarged bodies so everything stays visible.
pub const SCALED: DisplayScale = DisplayScale {
    sun_size: 4.0,
    body_sizes: &[1.5, 2.0, 2.2, 1.8, 5.0, 4.5, 3.5, 3.5, 1.2],
    orbits: OrbitLayout::Fixed(&[8.0, 12.0, 16.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0]),
    moon_orbit_scale: 1.5,
    moon_size: 0.5,
};

impl DisplayScale {
    pub fn for_mode(scaled: bool) -> Self {
        if scaled { SCALED } else { REALISTIC }
    }

    /// Falls back to the navigation size for bodies past the table.
    pub fn body_size(&self, index: usize, body: &CelestialBody) -> f32 {
        self.body_sizes.get(index).copied().unwrap_or(body.size)
    }

    pub fn orbit_radius(&self, index: usize, body: &CelestialBody) -> f32 {
        match self.orbits {
            OrbitLayout::Proportional(k) => body.orbit_radius * k,
            OrbitLayout::Fixed(radii) => radii.get(index).copied().unwrap_or(body.orbit_radius),
        }
    }
}
