/// Solar Flyby: top-down orrery plus a cinematic planet-to-planet fly-by.
///
/// `update` samples the clock once, applies input, steps the navigation
/// machine and caches the frame; `render` only replays that cache.

use glam::Vec3;
use flyby_engine::*;

use crate::bodies::{Catalog, DisplayScale};
use crate::config::FlybyConfig;
use crate::input::{self, Command};
use crate::navigation::{FrameOutput, NavigationMachine, OVERVIEW_EYE};
use crate::render::{self, FrameView, Scene, SceneMeshes, SceneTextures};

// ── Assets ───────────────────────────────────────────────────────────

pub const VERTEX_SHADER: &str = "vertShader.glsl";
pub const FRAGMENT_SHADER: &str = "fragShader.glsl";

// ── Game event kinds to the page UI ──────────────────────────────────

const EVENT_STAGE_INFO: f32 = 1.0;
const EVENT_VIEW_INFO: f32 = 2.0;

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}

struct Resources {
    meshes: SceneMeshes,
    textures: SceneTextures,
    program: ProgramHandle,
}

pub struct SolarFlyby {
    config: FlybyConfig,
    nav: Option<NavigationMachine>,
    resources: Option<Resources>,
    top_down: bool,
    scaled: bool,
    projection: ProjectionState,
    /// Camera and clock sample of the latest update.
    frame: Option<FrameView>,
    /// Navigation output of the latest update (navigation mode only).
    output: Option<FrameOutput>,
}

impl SolarFlyby {
    pub fn new() -> Self {
        Self::with_config(FlybyConfig::default())
    }

    pub fn with_config(config: FlybyConfig) -> Self {
        let projection = ProjectionState::new(config.near, config.far);
        Self {
            config,
            nav: None,
            resources: None,
            top_down: true,
            scaled: false,
            projection,
            frame: None,
            output: None,
        }
    }

    pub fn top_down(&self) -> bool {
        self.top_down
    }

    pub fn scaled(&self) -> bool {
        self.scaled
    }

    pub fn navigation(&self) -> Option<&NavigationMachine> {
        self.nav.as_ref()
    }

    fn projection_kind(&self) -> ProjectionKind {
        if self.top_down {
            ProjectionKind::Orthographic { half_height: self.config.view_size(self.scaled) }
        } else {
            ProjectionKind::Perspective { fov_y: self.config.fov_y() }
        }
    }

    fn apply(&mut self, command: Command, ctx: &mut EngineContext, now_ms: f64, global_time: f64) {
        if !command.allowed(self.top_down) {
            log::debug!("{command:?} ignored in {} mode", if self.top_down { "top-down" } else { "navigation" });
            return;
        }
        match command {
            Command::ToggleViewMode => {
                self.top_down = !self.top_down;
                self.projection.invalidate();
                log::info!("view mode: {}", if self.top_down { "top-down" } else { "navigation" });
            }
            Command::ToggleScaledView => {
                self.scaled = !self.scaled;
                self.projection.invalidate();
                log::info!("scaled view: {}", self.scaled);
            }
            Command::AdvanceStage => {
                if let Some(nav) = self.nav.as_mut() {
                    nav.advance(now_ms);
                }
            }
            Command::JumpToBody(n) => {
                if let Some(nav) = self.nav.as_mut() {
                    if let Err(e) = nav.jump_to_body(n, now_ms, global_time) {
                        log::warn!("jump ignored: {e}");
                    }
                }
            }
            Command::Resize { width, height } => {
                ctx.viewport = Viewport::new(width, height);
                self.projection.invalidate();
            }
        }
    }

    fn step_navigation(&mut self, now_ms: f64, global_time: f64) -> Option<FrameOutput> {
        let nav = self.nav.as_mut()?;
        match nav.update(now_ms, global_time) {
            Ok(out) => Some(out),
            Err(e) => {
                log::error!("navigation failed at stage {}: {e}; resetting", nav.stage().value());
                nav.reset();
                None
            }
        }
    }

    fn emit_status(&self, ctx: &mut EngineContext) {
        let Some(nav) = self.nav.as_ref() else {
            return;
        };
        let stage = nav.stage();
        ctx.emit_event(GameEvent {
            kind: EVENT_STAGE_INFO,
            a: stage.value() as f32,
            b: stage.body().map_or(-1.0, |k| k as f32),
            c: flag(self.output.is_some_and(|o| o.nav.draw_star)),
        });
        ctx.emit_event(GameEvent {
            kind: EVENT_VIEW_INFO,
            a: flag(self.top_down),
            b: flag(self.scaled),
            c: nav.policy().code(),
        });
    }
}

impl Default for SolarFlyby {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for SolarFlyby {
    /// Replace the settings with a `FlybyConfig` document.
    fn configure(&mut self, settings_json: &str) -> EngineResult<()> {
        let config = FlybyConfig::from_json(settings_json)?;
        log::info!("settings: policy {:?}, skydome {}", config.policy, config.skydome);
        *self = Self::with_config(config);
        Ok(())
    }

    fn init(&mut self, ctx: &mut SetupContext) -> EngineResult<()> {
        self.config.validate()?;
        let nav = NavigationMachine::new(Catalog::solar_system(), self.config.policy)
            .map_err(|e| EngineError::InvalidConfig(e.to_string()))?
            .with_easing(self.config.easing);

        let names = nav.catalog().texture_names(self.config.skydome);
        let set = TextureSet::load(ctx.assets, &names)?;
        let textures = SceneTextures::resolve(nav.catalog(), &set, self.config.skydome)?;
        let program = ctx.assets.load_shader_program(VERTEX_SHADER, FRAGMENT_SHADER)?;
        let meshes = SceneMeshes::upload(&mut *ctx.renderer, self.config.sphere_precision);

        log::info!(
            "solar flyby ready: {} bodies, {} textures, policy {:?}",
            nav.catalog().len(),
            set.len(),
            self.config.policy
        );
        self.nav = Some(nav);
        self.resources = Some(Resources { meshes, textures, program });
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        let now_ms = ctx.clock.now_ms();
        let global_time = ctx.clock.global_time(self.config.ms_per_time_unit);

        for event in input.iter() {
            if let Some(command) = input::map_event(event) {
                self.apply(command, ctx, now_ms, global_time);
            }
        }

        self.output = if self.top_down { None } else { self.step_navigation(now_ms, global_time) };

        let kind = self.projection_kind();
        self.projection.refresh(kind, ctx.viewport);

        let view = if self.top_down {
            overhead_view()
        } else {
            match &self.output {
                Some(out) => look_at(out.eye, out.nav.look_at, Vec3::Y),
                None => look_at(OVERVIEW_EYE, Vec3::ZERO, Vec3::Y),
            }
        };
        self.frame = Some(FrameView {
            view: Transform::from(view),
            projection: self.projection.matrix(),
            global_time,
            viewport: (ctx.viewport.width as u32, ctx.viewport.height as u32),
        });

        self.emit_status(ctx);
    }

    fn render(&self, ctx: &mut RenderContext) {
        let (Some(nav), Some(res), Some(frame)) = (&self.nav, &self.resources, &self.frame) else {
            return;
        };
        let scene = Scene {
            catalog: nav.catalog(),
            meshes: &res.meshes,
            textures: &res.textures,
            program: res.program,
        };
        if self.top_down {
            render::draw_overview(&mut *ctx.renderer, &scene, frame, &DisplayScale::for_mode(self.scaled));
        } else if let Some(out) = &self.output {
            render::draw_navigation(&mut *ctx.renderer, &scene, frame, out, nav.stage());
        }
    }
}
