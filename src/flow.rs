//! Flow control and application event loop.
//!
//! A "flow" is one demo program: it builds its GPU resources once, reacts to
//! window resizes and key presses, and draws itself every frame.
//!
//! # User-facing types
//!
//! - [`GraphicsFlow`] is the trait every demo implements
//! - [`FrameLoop`] drives a flow against any [`GraphicsContext`]
//! - [`run`] opens a window and hands a flow to the winit event loop
//!
//! # Lifecycle Flow
//!
//! 1. `on_init` once the graphics context exists (load shaders, upload buffers)
//! 2. `on_resize` whenever the drawable area changes, starting with its initial size
//! 3. `on_key` for every key press; `Escape` never reaches the flow
//! 4. Each redraw: clear, `on_render`, swap buffers, request the next redraw
//!
//! Everything happens on the event loop thread, one callback at a time. An
//! exit request takes effect once the current callback has returned.

use std::sync::Arc;

use instant::{Duration, Instant};

use winit::{
    application::ApplicationHandler,
    dpi::{LogicalPosition, LogicalSize, PhysicalPosition},
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    window::{Window, WindowId},
};

use crate::{
    config::DemoConfig,
    context::{GraphicsContext, WgpuContext},
    input::Key,
};

/// What a flow wants after handling an event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Control {
    #[default]
    Continue,
    Exit,
}

/// Trait for implementing a demo program.
pub trait GraphicsFlow {
    /// Build shaders, buffers and initial uniforms.
    ///
    /// Shader compile or link failures end up here and abort startup.
    fn on_init(&mut self, ctx: &mut dyn GraphicsContext) -> anyhow::Result<()>;

    /// The drawable area is now `width` x `height` pixels.
    fn on_resize(&mut self, ctx: &mut dyn GraphicsContext, width: u32, height: u32);

    /// Handle a key press. `position` is the last known cursor position.
    fn on_key(&mut self, key: &Key, position: PhysicalPosition<f64>) -> Control;

    /// Set uniforms and issue draws for one frame.
    ///
    /// `elapsed` is the time since the frame loop was created.
    fn on_render(&mut self, ctx: &mut dyn GraphicsContext, elapsed: Duration);
}

/// Sequences the callbacks of one flow.
#[derive(Debug)]
pub struct FrameLoop<F> {
    flow: F,
    clear_colour: wgpu::Color,
    started: Instant,
    exit_requested: bool,
}

impl<F: GraphicsFlow> FrameLoop<F> {
    pub fn new(flow: F, clear_colour: wgpu::Color) -> Self {
        Self {
            flow,
            clear_colour,
            started: Instant::now(),
            exit_requested: false,
        }
    }

    pub fn flow(&self) -> &F {
        &self.flow
    }

    pub fn flow_mut(&mut self) -> &mut F {
        &mut self.flow
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn init(&mut self, ctx: &mut dyn GraphicsContext) -> anyhow::Result<()> {
        log::info!("Initializing flow");
        self.flow.on_init(ctx)
    }

    pub fn resize(&mut self, ctx: &mut dyn GraphicsContext, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {width}x{height}");
            return;
        }
        ctx.resize(width, height);
        self.flow.on_resize(ctx, width, height);
    }

    pub fn key_pressed(&mut self, key: &Key, position: PhysicalPosition<f64>) {
        if *key == Key::Escape {
            log::info!("Escape pressed, leaving the main loop");
            self.exit_requested = true;
            return;
        }
        if self.flow.on_key(key, position) == Control::Exit {
            self.exit_requested = true;
        }
    }

    /// Draw one frame using the time since the loop was created.
    pub fn redraw(&mut self, ctx: &mut dyn GraphicsContext) -> anyhow::Result<()> {
        let elapsed = self.started.elapsed();
        self.redraw_at(ctx, elapsed)
    }

    /// Draw one frame as if `elapsed` had passed since start.
    pub fn redraw_at(
        &mut self,
        ctx: &mut dyn GraphicsContext,
        elapsed: Duration,
    ) -> anyhow::Result<()> {
        ctx.clear(self.clear_colour);
        self.flow.on_render(ctx, elapsed);
        let presented = ctx.swap_buffers();
        ctx.request_redraw();
        presented
    }
}

/// winit application driving a single flow in a single window.
pub struct App<F: GraphicsFlow> {
    async_runtime: tokio::runtime::Runtime,
    config: DemoConfig,
    frame_loop: FrameLoop<F>,
    ctx: Option<WgpuContext>,
    cursor: PhysicalPosition<f64>,
    error: Option<anyhow::Error>,
}

impl<F: GraphicsFlow> App<F> {
    pub fn new(flow: F, config: DemoConfig) -> anyhow::Result<Self> {
        let async_runtime = tokio::runtime::Runtime::new()?;
        let frame_loop = FrameLoop::new(flow, config.clear_colour);
        Ok(Self {
            async_runtime,
            config,
            frame_loop,
            ctx: None,
            cursor: PhysicalPosition::new(0.0, 0.0),
            error: None,
        })
    }

    /// The error that stopped the event loop, if any.
    pub fn take_error(&mut self) -> Option<anyhow::Error> {
        self.error.take()
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        log::error!("{:#}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn init_context(&mut self, event_loop: &ActiveEventLoop) -> anyhow::Result<()> {
        let window_attributes = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height))
            .with_position(LogicalPosition::new(
                self.config.position.0,
                self.config.position.1,
            ));
        let window = Arc::new(event_loop.create_window(window_attributes)?);

        let mut ctx = self
            .async_runtime
            .block_on(WgpuContext::new(window.clone(), &self.config))?;
        self.frame_loop.init(&mut ctx)?;

        let size = window.inner_size();
        self.frame_loop.resize(&mut ctx, size.width, size.height);
        ctx.request_redraw();
        self.ctx = Some(ctx);
        Ok(())
    }
}

impl<F: GraphicsFlow> ApplicationHandler for App<F> {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.ctx.is_some() {
            return;
        }
        if let Err(e) = self.init_context(event_loop) {
            self.fail(event_loop, e);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => self.frame_loop.resize(ctx, size.width, size.height),
            WindowEvent::CursorMoved { position, .. } => self.cursor = position,
            WindowEvent::KeyboardInput { event, .. } => {
                if let Some(key) = Key::from_event(&event) {
                    self.frame_loop.key_pressed(&key, self.cursor);
                }
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = self.frame_loop.redraw(ctx) {
                    self.fail(event_loop, e.context("unable to render"));
                    return;
                }
            }
            _ => {}
        }

        if self.frame_loop.exit_requested() {
            event_loop.exit();
        }
    }
}

/// Open a window configured by `config` and run `flow` until it exits.
pub fn run<F: GraphicsFlow>(flow: F, config: DemoConfig) -> anyhow::Result<()> {
    if let Err(e) = env_logger::try_init() {
        println!("Warning: Could not initialize logger: {}", e);
    };

    let event_loop = EventLoop::new()?;
    let mut app = App::new(flow, config)?;

    event_loop.run_app(&mut app)?;

    match app.take_error() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}
