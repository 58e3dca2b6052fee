//! Sample runner and render loop.
//!
//! A "flow" is one sample's GPU resources plus its per-frame hooks. [`run`]
//! owns everything else: logging, the winit event loop, context bootstrap,
//! the poll-render-present cycle and teardown.
//!
//! # Lifecycle
//!
//! 1. the window and context are created from the [`ContextConfig`]
//! 2. the constructor builds the flow (shaders, buffers, textures)
//! 3. every frame: `on_update` with the elapsed time, `on_render`, swap
//! 4. `on_resize` after the surface and viewport follow the window, skipped
//!    while it is minimized
//! 5. `on_teardown` once the window is closed, while the context is still current
//!
//! Any error before the first frame ends the run; [`exit_code`] turns it
//! into the process status.

use std::process::ExitCode;

use anyhow::Context as _;
use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::WindowId,
};

use crate::context::{Context, ContextConfig};

/// Exit status for a failed setup: `-1` truncated to eight bits.
pub const FAILURE_EXIT_CODE: u8 = 255;

/// Per-sample hooks driven by [`run`].
pub trait GraphicsFlow {
    /// Called after the surface and viewport have been resized.
    fn on_resize(&mut self, _ctx: &Context, _width: u32, _height: u32) {}

    /// Called every frame before rendering with the time since the loop started.
    fn on_update(&mut self, _ctx: &Context, _elapsed: Duration) {}

    /// Clears and draws one frame. Presenting is left to the runner.
    fn on_render(&self, ctx: &Context);

    /// Releases GPU objects. The context is still current.
    fn on_teardown(&mut self, ctx: &Context);
}

struct AppState<F> {
    // flow first: its GL objects go before the context does
    flow: F,
    ctx: Context,
}

struct App<F, C> {
    config: ContextConfig,
    constructor: Option<C>,
    state: Option<AppState<F>>,
    start_time: Instant,
    error: Option<anyhow::Error>,
}

impl<F, C> App<F, C>
where
    F: GraphicsFlow,
    C: FnOnce(&mut Context) -> anyhow::Result<F>,
{
    fn new(config: ContextConfig, constructor: C) -> Self {
        Self {
            config,
            constructor: Some(constructor),
            state: None,
            start_time: Instant::now(),
            error: None,
        }
    }

    fn init(&self, event_loop: &ActiveEventLoop, constructor: C) -> anyhow::Result<AppState<F>> {
        let mut ctx = Context::new(event_loop, &self.config)
            .with_context(|| format!("cannot open \"{}\"", self.config.title))?;
        let flow = constructor(&mut ctx).context("sample setup failed")?;
        Ok(AppState { flow, ctx })
    }
}

impl<F, C> ApplicationHandler for App<F, C>
where
    F: GraphicsFlow,
    C: FnOnce(&mut Context) -> anyhow::Result<F>,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        // Only the first resume creates anything.
        let Some(constructor) = self.constructor.take() else {
            return;
        };
        match self.init(event_loop, constructor) {
            Ok(state) => {
                log::info!("{} ready on {}", self.config.title, state.ctx.api);
                state.ctx.request_redraw();
                self.state = Some(state);
                self.start_time = Instant::now();
            }
            Err(e) => {
                self.error = Some(e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if state.ctx.resize(size.width, size.height) {
                    state.flow.on_resize(&state.ctx, size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                state.flow.on_update(&state.ctx, self.start_time.elapsed());
                state.flow.on_render(&state.ctx);
                if let Err(e) = state.ctx.swap_buffers() {
                    log::error!("Unable to present frame: {}", e);
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(state) = &self.state {
            state.ctx.request_redraw();
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(mut state) = self.state.take() {
            state.flow.on_teardown(&state.ctx);
            log::debug!("{} torn down", self.config.title);
        }
    }
}

/// Opens the window described by `config`, builds the flow with
/// `constructor` and renders until the window is closed.
///
/// Returns the first window, context or setup error.
pub fn run<F, C>(config: ContextConfig, constructor: C) -> anyhow::Result<()>
where
    F: GraphicsFlow,
    C: FnOnce(&mut Context) -> anyhow::Result<F>,
{
    let env = env_logger::Env::default().default_filter_or("info");
    if let Err(e) = env_logger::Builder::from_env(env).try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    }

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);
    let mut app = App::new(config, constructor);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// `0` for a clean run, [`FAILURE_EXIT_CODE`] after logging the error chain
/// otherwise.
pub fn exit_code(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::from(FAILURE_EXIT_CODE)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_code_is_minus_one_as_byte() {
        assert_eq!(FAILURE_EXIT_CODE, -1i8 as u8);
    }
}
