use flyby_engine::{
    AssetManifest, CommandBuffer, EngineContext, EngineResult, FrameClock, Game, GameConfig,
    InputEvent, InputQueue, ManifestLoader, ProtocolLayout, RenderContext, SetupContext, Viewport,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]`, because wasm-bindgen cannot export
/// generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    commands: CommandBuffer,
    assets: ManifestLoader,
    config: GameConfig,
    layout: ProtocolLayout,
    initialized: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        Self {
            game,
            ctx: EngineContext::new(&config, 0.0),
            input: InputQueue::new(),
            commands: CommandBuffer::with_capacity(config.max_commands),
            assets: ManifestLoader::default(),
            layout,
            config,
            initialized: false,
        }
    }

    /// Parse the asset manifest the page loaded. Call before `init`.
    pub fn load_manifest(&mut self, json: &str) -> EngineResult<()> {
        let manifest = AssetManifest::from_json(json)?;
        log::info!(
            "manifest: {} textures, {} programs",
            manifest.textures.len(),
            manifest.programs.len()
        );
        self.assets = ManifestLoader::new(manifest);
        Ok(())
    }

    /// Hand game settings to the game. Blank input keeps its defaults.
    pub fn configure(&mut self, settings_json: &str) -> EngineResult<()> {
        if settings_json.trim().is_empty() {
            return Ok(());
        }
        self.game.configure(settings_json)?;
        log::info!("game settings applied");
        Ok(())
    }

    /// Initialize the game. Call once after construction; failure is fatal.
    pub fn init(&mut self, now_ms: f64) -> EngineResult<()> {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.ctx.clock = FrameClock::new(now_ms);
        {
            let mut setup = SetupContext {
                renderer: &mut self.commands,
                assets: &self.assets,
            };
            self.game.init(&mut setup)?;
        }
        log::debug!("uploaded {} geometries", self.commands.uploads().len());
        self.initialized = true;
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: update the game, then record and encode its draw-calls.
    pub fn tick(&mut self, now_ms: f64) {
        if !self.initialized {
            return;
        }

        // Clear per-frame transient data
        self.ctx.clear_frame_data();
        self.ctx.clock.advance_to(now_ms);

        for event in self.input.iter() {
            if let InputEvent::Resize { width, height } = *event {
                self.ctx.viewport = Viewport::new(width, height);
            }
        }

        self.game.update(&mut self.ctx, &self.input);

        // Drain input after update
        self.input.drain();

        self.commands.clear();
        {
            let mut render_ctx = RenderContext {
                renderer: &mut self.commands,
                viewport: self.ctx.viewport,
                now_ms: self.ctx.clock.now_ms(),
            };
            self.game.render(&mut render_ctx);
        }

        let stream = self.commands.encode();
        self.layout.stamp(stream);
    }

    // ---- Pointer accessors for the page-side player ----

    pub fn commands_ptr(&self) -> *const f32 {
        self.commands.encoded_ptr()
    }

    pub fn commands_len(&self) -> u32 {
        self.commands.encoded_len() as u32
    }

    pub fn geometry_count(&self) -> u32 {
        self.commands.uploads().len() as u32
    }

    /// Interleaved `x, y, z, u, v` vertices of an uploaded geometry.
    pub fn geometry_vertices(&self, index: u32) -> Vec<f32> {
        self.commands
            .uploads()
            .get(index as usize)
            .map(|g| g.interleaved())
            .unwrap_or_default()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    pub fn frame(&self) -> u64 {
        self.ctx.clock.frame()
    }

    // ---- Capacity accessors ----

    pub fn max_commands(&self) -> u32 {
        self.layout.max_commands as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }
}
