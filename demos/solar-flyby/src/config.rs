use serde::{Deserialize, Serialize};
use flyby_engine::{Easing, EngineError, EngineResult};

use crate::navigation::TransitionPolicy;

/// Game configuration. Every field has a default, so a partial JSON
/// document is enough to override one setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlybyConfig {
    pub policy: TransitionPolicy,
    /// Wall-clock milliseconds per global-time unit.
    pub ms_per_time_unit: f64,
    /// Half-height of the top-down orthographic view.
    pub overview_view_size: f32,
    /// Half-height of the top-down view with scaled display sizes.
    pub scaled_view_size: f32,
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub skydome: bool,
    /// Progress curve of camera transitions.
    pub easing: Easing,
    pub sphere_precision: u32,
}

impl Default for FlybyConfig {
    fn default() -> Self {
        Self {
            policy: TransitionPolicy::default(),
            ms_per_time_unit: 100.0,
            overview_view_size: 450.0,
            scaled_view_size: 100.0,
            fov_y_degrees: 60.0,
            near: 0.1,
            far: 5000.0,
            skydome: true,
            easing: Easing::CubicInOut,
            sphere_precision: flyby_engine::mesh::SPHERE_PRECISION,
        }
    }
}

impl FlybyConfig {
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> EngineResult<()> {
        let invalid = |msg: &str| Err(EngineError::InvalidConfig(msg.to_string()));
        if !(self.ms_per_time_unit > 0.0) {
            return invalid("ms_per_time_unit must be positive");
        }
        if !(self.near > 0.0 && self.far > self.near) {
            return invalid("clip planes must satisfy 0 < near < far");
        }
        if !(self.fov_y_degrees > 0.0 && self.fov_y_degrees < 180.0) {
            return invalid("fov_y_degrees must be in (0, 180)");
        }
        if !(self.overview_view_size > 0.0 && self.scaled_view_size > 0.0) {
            return invalid("view sizes must be positive");
        }
        if self.policy.approach_secs() <= 0.0 || self.policy.orbit_secs().is_some_and(|s| s <= 0.0) {
            return invalid("transition durations must be positive");
        }
        Ok(())
    }

    pub fn fov_y(&self) -> f32 {
        self.fov_y_degrees.to_radians()
    }

    pub fn view_size(&self, scaled: bool) -> f32 {
        if scaled { self.scaled_view_size } else { self.overview_view_size }
    }
}
