use stencil_engine::{
    EngineConfig, FixedTimestep, InputEvent, InputQueue, RenderModel, Result, StencilEngine,
    StencilEvent,
};

/// Wires the engine to the browser frame loop.
///
/// The bridge keeps one `StencilRunner` in a `thread_local!` and exports
/// free functions via `#[wasm_bindgen]`, because wasm-bindgen cannot
/// export the engine's state directly.
pub struct StencilRunner {
    engine: StencilEngine,
    input: InputQueue,
    timestep: FixedTimestep,
    /// Events drained during the last tick.
    events: Vec<StencilEvent>,
}

impl StencilRunner {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let fixed_dt = if config.fixed_dt > 0.0 { config.fixed_dt } else { 1.0 / 60.0 };
        Ok(Self {
            engine: StencilEngine::new(config)?,
            input: InputQueue::new(),
            timestep: FixedTimestep::new(fixed_dt),
            events: Vec::new(),
        })
    }

    /// Pick the first word. Call once after construction.
    pub fn init(&mut self) -> Result<()> {
        self.engine.request_new_word()
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one frame: apply queued input in order, then advance fixed steps.
    pub fn tick(&mut self, dt: f32) {
        for event in self.input.drain() {
            self.engine.apply_input(event);
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            self.engine.tick(self.timestep.dt());
        }

        self.events = self.engine.drain_events();
    }

    pub fn render_model(&self) -> RenderModel {
        self.engine.render_model()
    }

    pub fn events(&self) -> &[StencilEvent] {
        &self.events
    }

    pub fn engine(&self) -> &StencilEngine {
        &self.engine
    }
}
