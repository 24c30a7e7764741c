use crate::api::types::GameEvent;
use crate::assets::registry::AssetLoader;
use crate::core::time::FrameClock;
use crate::error::EngineResult;
use crate::input::queue::InputQueue;
use crate::renderer::camera::Viewport;
use crate::renderer::traits::Renderer;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Initial canvas width in pixels.
    pub viewport_width: f32,
    /// Initial canvas height in pixels.
    pub viewport_height: f32,
    /// Maximum draw commands recorded per frame (default: 1024).
    pub max_commands: usize,
    /// Maximum game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            viewport_width: 1000.0,
            viewport_height: 1000.0,
            max_commands: 1024,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Apply host-supplied settings (JSON). Called before init; games
    /// without settings keep the default, which ignores the input.
    fn configure(&mut self, _settings_json: &str) -> EngineResult<()> {
        Ok(())
    }

    /// Upload static geometry and resolve assets. Failure aborts startup.
    fn init(&mut self, ctx: &mut SetupContext) -> EngineResult<()>;

    /// Per-frame tick: consume input, advance state.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);

    /// Issue this frame's draw-calls.
    fn render(&self, ctx: &mut RenderContext);
}

/// Mutable engine state passed to `Game::update`.
pub struct EngineContext {
    pub clock: FrameClock,
    pub viewport: Viewport,
    pub events: Vec<GameEvent>,
    max_events: usize,
}

impl EngineContext {
    pub fn new(config: &GameConfig, start_ms: f64) -> Self {
        Self {
            clock: FrameClock::new(start_ms),
            viewport: Viewport::new(config.viewport_width, config.viewport_height),
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
        }
    }

    /// Emit a game event to be forwarded to the page UI.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() < self.max_events {
            self.events.push(event);
        } else {
            log::warn!("event queue full, dropping kind {}", event.kind);
        }
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&GameConfig::default(), 0.0)
    }
}

/// Passed to `Game::init`.
pub struct SetupContext<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub assets: &'a dyn AssetLoader,
}

/// Passed to `Game::render`.
pub struct RenderContext<'a> {
    pub renderer: &'a mut dyn Renderer,
    pub viewport: Viewport,
    pub now_ms: f64,
}
