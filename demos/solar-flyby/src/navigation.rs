/// Navigation state machine.
///
/// The stage counter is the master state: `0` is the solar overview,
/// `2k+1` the transition toward body `k`, `2k+2` resting at body `k`.
/// Every frame the machine turns (stage, elapsed time, global time) into
/// a camera eye, a look-at target and the shooting-star marker.
///
/// Time is always injected: `now_ms` for stage timers, `global_time` for
/// orbital positions. Both come from one clock read per tick.

use std::f32::consts::PI;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use flyby_engine::{lerp, lerp_vec3, smoothstep, Easing};

use crate::bezier::PathData;
use crate::bodies::Catalog;
use crate::error::NavigationError;
use crate::orbit;
use crate::path::{self, PathRequest};

/// Overview camera position at stage 0.
pub const OVERVIEW_EYE: Vec3 = Vec3::new(0.0, 0.0, 8.0);

// ── Transition camera ────────────────────────────────────────────────

/// Raw-progress lag used to sample the star's previous position.
const TRAIL_LAG: f32 = 0.02;
const FIRST_START_DIST: f32 = 12.0;
const START_DIST_SCALE: f32 = 1.5;
const END_DIST_SCALE: f32 = 1.8;
const CAMERA_LIFT: f32 = 0.4;
/// Raw progress over which the eye eases from the anchor onto the chase offset.
const DEPART_BLEND: f32 = 0.1;
const LOOK_AHEAD_START: f32 = 5.0;
const LOOK_AHEAD_END: f32 = 2.0;
/// Raw progress after which the gaze settles onto the destination.
const GAZE_SETTLE_FROM: f32 = 0.7;

// ── Orbit sub-phase ──────────────────────────────────────────────────

const ORBIT_RADIUS: f32 = 1.2;
/// Two full turns.
const ORBIT_SWEEP: f32 = 4.0 * PI;
const ORBIT_BOB: f32 = 0.2;
const ORBIT_TRAIL_LAG: f32 = 0.15;
const CHASE_BASE: f32 = 3.0;
const CHASE_SIZE_SCALE: f32 = 3.0;
const CHASE_LAG: f32 = 0.2 * PI;
const CHASE_LIFT: f32 = 0.35;
const CHASE_BLEND_SECS: f32 = 0.8;

// ── Policy ───────────────────────────────────────────────────────────

/// How a transition ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum TransitionPolicy {
    /// Fly straight to the resting anchor.
    DirectApproach { approach_secs: f32 },
    /// Fly in, let the star circle the body twice, then rest.
    ApproachThenOrbit { approach_secs: f32, orbit_secs: f32 },
}

impl Default for TransitionPolicy {
    fn default() -> Self {
        Self::direct()
    }
}

impl TransitionPolicy {
    pub fn direct() -> Self {
        Self::DirectApproach { approach_secs: 6.5 }
    }

    pub fn approach_then_orbit() -> Self {
        Self::ApproachThenOrbit { approach_secs: 6.0, orbit_secs: 4.0 }
    }

    pub fn approach_secs(&self) -> f32 {
        match *self {
            Self::DirectApproach { approach_secs } => approach_secs,
            Self::ApproachThenOrbit { approach_secs, .. } => approach_secs,
        }
    }

    pub fn orbit_secs(&self) -> Option<f32> {
        match *self {
            Self::DirectApproach { .. } => None,
            Self::ApproachThenOrbit { orbit_secs, .. } => Some(orbit_secs),
        }
    }

    /// Wire code for the host UI.
    pub fn code(&self) -> f32 {
        match self {
            Self::DirectApproach { .. } => 0.0,
            Self::ApproachThenOrbit { .. } => 1.0,
        }
    }
}

// ── Stage ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Stage(u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagePhase {
    Idle,
    /// Flying toward body `k`.
    Transitioning(usize),
    /// At body `k`.
    Resting(usize),
}

impl Stage {
    pub const IDLE: Stage = Stage(0);

    pub fn transitioning(body: usize) -> Self {
        Stage(2 * body as u32 + 1)
    }

    pub fn resting(body: usize) -> Self {
        Stage(2 * body as u32 + 2)
    }

    pub fn value(self) -> u32 {
        self.0
    }

    pub fn phase(self) -> StagePhase {
        match self.0 {
            0 => StagePhase::Idle,
            s if s % 2 == 1 => StagePhase::Transitioning(((s - 1) / 2) as usize),
            s => StagePhase::Resting(((s - 2) / 2) as usize),
        }
    }

    /// Index of the body this stage is about, if any.
    pub fn body(self) -> Option<usize> {
        match self.phase() {
            StagePhase::Idle => None,
            StagePhase::Transitioning(k) | StagePhase::Resting(k) => Some(k),
        }
    }

    fn next(self) -> Self {
        Stage(self.0 + 1)
    }
}

/// Sub-phase of a resting stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestPhase {
    /// Star still circling the body; advancing is not yet allowed.
    Orbiting,
    Settled,
}

// ── Frame output ─────────────────────────────────────────────────────

/// Per-frame navigation record, consumed by the renderer and dropped.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NavigationState {
    pub look_at: Vec3,
    pub star: Vec3,
    pub prev_star: Vec3,
    pub draw_star: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameOutput {
    pub eye: Vec3,
    pub nav: NavigationState,
}

impl FrameOutput {
    fn overview() -> Self {
        Self {
            eye: OVERVIEW_EYE,
            nav: NavigationState {
                look_at: Vec3::ZERO,
                star: Vec3::ZERO,
                prev_star: Vec3::ZERO,
                draw_star: false,
            },
        }
    }

    fn holding(eye: Vec3, body_pos: Vec3) -> Self {
        Self {
            eye,
            nav: NavigationState {
                look_at: body_pos,
                star: body_pos,
                prev_star: body_pos,
                draw_star: false,
            },
        }
    }

    /// Star heading, from its previous sample to its current one.
    pub fn star_heading(&self) -> Option<Vec3> {
        (self.nav.star - self.nav.prev_star).try_normalize()
    }
}

// ── Machine ──────────────────────────────────────────────────────────

pub struct NavigationMachine {
    catalog: Catalog,
    policy: TransitionPolicy,
    easing: Easing,
    stage: Stage,
    stage_start_ms: f64,
    /// Where the camera rests, and where the next path starts.
    anchor: Vec3,
    transition_complete: bool,
    rest: RestPhase,
}

impl NavigationMachine {
    /// Fails if any body lacks transition tuning.
    pub fn new(catalog: Catalog, policy: TransitionPolicy) -> Result<Self, NavigationError> {
        catalog.validate()?;
        Ok(Self {
            catalog,
            policy,
            easing: Easing::default(),
            stage: Stage::IDLE,
            stage_start_ms: 0.0,
            anchor: OVERVIEW_EYE,
            transition_complete: true,
            rest: RestPhase::Settled,
        })
    }

    /// Use `easing` as the transition progress curve.
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn rest_phase(&self) -> RestPhase {
        self.rest
    }

    pub fn anchor(&self) -> Vec3 {
        self.anchor
    }

    pub fn transition_complete(&self) -> bool {
        self.transition_complete
    }

    /// Last reachable stage: resting at the final body.
    pub fn final_stage(&self) -> Stage {
        Stage::resting(self.catalog.len() - 1)
    }

    /// Start the next transition. Only allowed at rest, once the previous
    /// transition has finished, and while a further body remains.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        let at_rest = self.stage.value() % 2 == 0;
        if !(at_rest && self.transition_complete && self.stage < self.final_stage()) {
            return false;
        }
        self.stage = self.stage.next();
        self.stage_start_ms = now_ms;
        self.transition_complete = false;
        self.rest = RestPhase::Settled;
        if let Some(body) = self.stage.body().and_then(|k| self.catalog.body(k).ok()) {
            log::info!("stage {}: departing for {}", self.stage.value(), body.name);
        }
        true
    }

    /// Jump straight to resting at body `n - 1`; `n == 0` returns to the
    /// overview. Any in-flight transition is discarded.
    pub fn jump_to_body(&mut self, n: usize, now_ms: f64, global_time: f64) -> Result<(), NavigationError> {
        if n == 0 {
            self.reset();
            self.stage_start_ms = now_ms;
            log::info!("jump to overview");
            return Ok(());
        }
        let k = n - 1;
        let body = self.catalog.body(k)?;
        let tuning = self.catalog.tuning(k)?;

        // Place the camera as a finished transition would have left it:
        // behind the end anchor, looking outward from the sun.
        let end = path::end_anchor(orbit::body_position(body, global_time), tuning);
        let heading = Vec3::new(end.x, 0.0, end.z).try_normalize().unwrap_or(Vec3::Z);
        let dist = tuning.cam_dist * END_DIST_SCALE;
        self.anchor = end - heading * dist + Vec3::Y * (dist * CAMERA_LIFT);

        log::info!("jump to {} (stage {})", body.name, Stage::resting(k).value());
        self.stage = Stage::resting(k);
        self.stage_start_ms = now_ms;
        self.transition_complete = true;
        self.rest = RestPhase::Settled;
        Ok(())
    }

    /// Back to the overview.
    pub fn reset(&mut self) {
        self.stage = Stage::IDLE;
        self.anchor = OVERVIEW_EYE;
        self.transition_complete = true;
        self.rest = RestPhase::Settled;
    }

    /// Compute this frame's camera and marker, completing the current
    /// transition or orbit when its time is up.
    pub fn update(&mut self, now_ms: f64, global_time: f64) -> Result<FrameOutput, NavigationError> {
        let elapsed = ((now_ms - self.stage_start_ms) / 1000.0).max(0.0) as f32;
        match self.stage.phase() {
            StagePhase::Idle => {
                self.transition_complete = true;
                Ok(FrameOutput::overview())
            }
            StagePhase::Transitioning(k) => self.transition_frame(k, elapsed, now_ms, global_time),
            StagePhase::Resting(k) => self.rest_frame(k, elapsed, global_time),
        }
    }

    /// The path for the transition toward body `k` at `global_time`.
    pub fn transition_path(&self, k: usize, global_time: f64) -> Result<PathData, NavigationError> {
        let body_pos = orbit::body_position(self.catalog.body(k)?, global_time);
        let departed = match k {
            0 => None,
            _ => Some(orbit::body_position(self.catalog.body(k - 1)?, global_time)),
        };
        Ok(path::build(&PathRequest {
            start: self.anchor,
            body_pos,
            tuning: self.catalog.tuning(k)?,
            first_hop: k == 0,
            departed,
        }))
    }

    fn transition_frame(&mut self, k: usize, elapsed: f32, now_ms: f64, global_time: f64) -> Result<FrameOutput, NavigationError> {
        let tuning = *self.catalog.tuning(k)?;
        let body = self.catalog.body(k)?;
        let (name, body_pos) = (body.name, orbit::body_position(body, global_time));
        let path = self.transition_path(k, global_time)?;

        let duration = self.policy.approach_secs();
        let raw = if duration > 0.0 { (elapsed / duration).min(1.0) } else { 1.0 };
        let t = self.easing.apply(raw);
        let t_prev = self.easing.apply((raw - TRAIL_LAG).max(0.0));

        let star = path.point(t);
        let prev_star = path.point(t_prev);
        let heading = path.direction(t, body_pos - star);

        let start_dist = match k {
            0 => FIRST_START_DIST,
            _ => self.catalog.tuning(k - 1)?.cam_dist * START_DIST_SCALE,
        };
        let cam_dist = lerp(start_dist, tuning.cam_dist * END_DIST_SCALE, t);
        let chase = star - heading * cam_dist + Vec3::Y * (cam_dist * CAMERA_LIFT);
        let eye = lerp_vec3(self.anchor, chase, smoothstep(0.0, DEPART_BLEND, raw));

        let look_ahead = lerp(LOOK_AHEAD_START, LOOK_AHEAD_END, t);
        let settle = smoothstep(GAZE_SETTLE_FROM, 1.0, raw);
        let look_at = lerp_vec3(star + heading * look_ahead, body_pos, settle);

        if elapsed >= duration {
            self.arrive(k, name, eye, now_ms);
        }

        Ok(FrameOutput {
            eye,
            nav: NavigationState {
                look_at,
                star,
                prev_star,
                draw_star: true,
            },
        })
    }

    /// Commit the final camera as the resting anchor and move to rest.
    fn arrive(&mut self, k: usize, name: &str, eye: Vec3, now_ms: f64) {
        self.anchor = eye;
        self.stage = Stage::resting(k);
        self.stage_start_ms = now_ms;
        self.rest = match self.policy.orbit_secs() {
            Some(_) => RestPhase::Orbiting,
            None => RestPhase::Settled,
        };
        self.transition_complete = self.rest == RestPhase::Settled;
        log::info!("stage {}: arrived at {}", self.stage.value(), name);
    }

    fn rest_frame(&mut self, k: usize, elapsed: f32, global_time: f64) -> Result<FrameOutput, NavigationError> {
        let body = self.catalog.body(k)?;
        let body_pos = orbit::body_position(body, global_time);

        if self.rest == RestPhase::Orbiting {
            match self.policy.orbit_secs() {
                Some(orbit_secs) if elapsed < orbit_secs => {
                    return Ok(self.orbit_frame(body.size, body_pos, elapsed, orbit_secs));
                }
                _ => {
                    self.rest = RestPhase::Settled;
                    self.transition_complete = true;
                    log::info!("stage {}: settled at {}", self.stage.value(), body.name);
                }
            }
        }

        self.transition_complete = true;
        Ok(FrameOutput::holding(self.anchor, body_pos))
    }

    /// Star circles the body; the camera eases out to a chase position
    /// and back to the anchor before the orbit ends.
    fn orbit_frame(&self, size: f32, body_pos: Vec3, elapsed: f32, orbit_secs: f32) -> FrameOutput {
        let radius = ORBIT_RADIUS + size;
        let angle = elapsed / orbit_secs * ORBIT_SWEEP;
        let ring = |a: f32| Vec3::new(a.sin() * radius, (2.0 * a).sin() * radius * ORBIT_BOB, a.cos() * radius);

        let star = body_pos + ring(angle);
        let prev_star = body_pos + ring(angle - ORBIT_TRAIL_LAG);

        let chase_dist = radius + CHASE_BASE + size * CHASE_SIZE_SCALE;
        let chase_angle = angle - CHASE_LAG;
        let chase = body_pos
            + Vec3::new(chase_angle.sin() * chase_dist, chase_dist * CHASE_LIFT, chase_angle.cos() * chase_dist);

        let blend_in = smoothstep(0.0, 1.0, elapsed / CHASE_BLEND_SECS);
        let blend_out = smoothstep(0.0, 1.0, (orbit_secs - elapsed) / CHASE_BLEND_SECS);
        let eye = lerp_vec3(self.anchor, chase, blend_in.min(blend_out));

        FrameOutput {
            eye,
            nav: NavigationState {
                look_at: body_pos,
                star,
                prev_star,
                draw_star: true,
            },
        }
    }
}
