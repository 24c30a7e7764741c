use glam::{Mat4, Vec3};

/// Drawing-surface size in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Width over height; 1.0 for an empty or collapsed surface.
    pub fn aspect(&self) -> f32 {
        if self.width > 0.0 && self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1000.0, 1000.0)
    }
}

/// Which projection to build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectionKind {
    /// Symmetric orthographic box; the horizontal extent follows the aspect.
    Orthographic { half_height: f32 },
    /// Perspective with vertical field of view in radians.
    Perspective { fov_y: f32 },
}

/// Cached projection matrix with an explicit invalidation signal.
///
/// The matrix is rebuilt only after `invalidate()` (mode change, resize);
/// steady-state frames reuse the cached value.
#[derive(Debug, Clone)]
pub struct ProjectionState {
    matrix: Mat4,
    near: f32,
    far: f32,
    dirty: bool,
}

impl ProjectionState {
    pub fn new(near: f32, far: f32) -> Self {
        Self {
            matrix: Mat4::IDENTITY,
            near,
            far,
            dirty: true,
        }
    }

    pub fn invalidate(&mut self) {
        self.dirty = true;
    }

    /// Rebuild the matrix if invalidated. Returns true when a rebuild happened.
    pub fn refresh(&mut self, kind: ProjectionKind, viewport: Viewport) -> bool {
        if !self.dirty {
            return false;
        }
        let aspect = viewport.aspect();
        self.matrix = match kind {
            ProjectionKind::Orthographic { half_height } => Mat4::orthographic_rh_gl(
                -half_height * aspect,
                half_height * aspect,
                -half_height,
                half_height,
                self.near,
                self.far,
            ),
            ProjectionKind::Perspective { fov_y } => {
                Mat4::perspective_rh_gl(fov_y, aspect, self.near, self.far)
            }
        };
        self.dirty = false;
        true
    }

    pub fn matrix(&self) -> Mat4 {
        self.matrix
    }
}

/// View matrix looking from `eye` toward `target`.
///
/// When eye and target coincide, or the view direction is parallel to `up`,
/// the result would be NaN; a small nudge along +Z is applied instead.
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    let forward = target - eye;
    let target = if forward.length_squared() < 1e-12 || forward.cross(up).length_squared() < 1e-12 {
        eye + forward + Vec3::Z * 1e-3
    } else {
        target
    };
    Mat4::look_at_rh(eye, target, up)
}

/// Fixed overhead pose: camera above the origin looking straight down,
/// with -Z pointing to the top of the screen.
pub fn overhead_view() -> Mat4 {
    Mat4::look_at_rh(Vec3::new(0.0, 500.0, 0.0), Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0))
}
