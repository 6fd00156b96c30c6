//! Windowed-rendering bootstrap.
//!
//! One parameterized sequence: create a window, bind a graphics context,
//! compile + link a program, upload fixed geometry, draw it once per frame
//! until a close is requested, then release everything in reverse order.
//!
//! The sequence talks to the outside world only through [`Platform`] and
//! [`Graphics`], so the runtime can drive it with winit + wgpu and tests can
//! drive it with a recording double.

mod config;
mod lifecycle;
mod platform;

use std::time::Instant;

pub use config::{BootstrapConfig, WindowConfig};
pub use lifecycle::Lifecycle;
pub use platform::{DrawStatus, Graphics, Platform};

use crate::coords::ViewportRect;
use crate::error::BootstrapError;
use crate::geometry::DrawCall;
use crate::paint::Color;
use crate::shader::{self, ShaderStage};
use crate::time::FrameThrottle;

/// What happened on one pass through the render loop.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum FrameOutcome {
    /// One draw call was issued and the frame presented.
    Drawn,
    /// The frame interval has not elapsed; nothing before `until`.
    Throttled { until: Instant },
    /// Nothing to draw into this time (minimized, transient surface error).
    Skipped,
    /// Close requested or the pipeline is not live.
    Closed,
}

/// Counters reported after shutdown.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct RunReport {
    pub draw_calls: u64,
    pub frames_skipped: u64,
}

/// Bootstrap state for one window.
///
/// `W` is the platform's window handle, `G` its graphics context. All GPU
/// objects are created in [`start`](Self::start) and destroyed in
/// [`shutdown`](Self::shutdown); the render loop only reads them.
pub struct Bootstrap<W, G: Graphics> {
    config: BootstrapConfig,
    state: Lifecycle,
    draw_call: DrawCall,
    viewport: ViewportRect,
    throttle: Option<FrameThrottle>,
    close_requested: bool,
    report: RunReport,

    // Teardown order: mesh, pipeline, graphics, window.
    mesh: Option<G::Mesh>,
    pipeline: Option<G::Pipeline>,
    graphics: Option<G>,
    window: Option<W>,
}

/// Clear colors reach the surface unchanged, so they are made representable up front.
fn settle_clear_color(color: Color) -> Color {
    if !color.is_finite() {
        log::warn!("clear color {color:?} is not finite, clearing to black");
        return Color::BLACK;
    }
    color.clamped()
}

fn advance(state: &mut Lifecycle, next: Lifecycle) {
    debug_assert!(state.can_advance_to(next), "illegal transition {state} -> {next}");
    log::debug!("lifecycle: {state} -> {next}");
    *state = next;
}

impl<W, G: Graphics> Bootstrap<W, G> {
    pub fn new(mut config: BootstrapConfig) -> Self {
        config.clear_color = settle_clear_color(config.clear_color);
        let draw_call = config.mesh.draw_call();
        let viewport = ViewportRect::full(config.window.width, config.window.height);

        Self {
            config,
            state: Lifecycle::Uninitialized,
            draw_call,
            viewport,
            throttle: None,
            close_requested: false,
            report: RunReport::default(),
            mesh: None,
            pipeline: None,
            graphics: None,
            window: None,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn viewport(&self) -> ViewportRect {
        self.viewport
    }

    pub fn report(&self) -> RunReport {
        self.report
    }

    pub fn window(&self) -> Option<&W> {
        self.window.as_ref()
    }

    /// Marks the windowing subsystem as initialized and fixes the context hints.
    pub fn subsystem_ready(&mut self) {
        if self.state != Lifecycle::Uninitialized {
            return;
        }

        let gpu = &self.config.gpu;
        log::info!(
            "set context hints: backends {:?}, present mode {:?}, max texture size {}",
            gpu.backends,
            gpu.present_mode,
            gpu.required_limits.max_texture_dimension_2d
        );
        advance(&mut self.state, Lifecycle::SubsystemReady);
    }

    /// Runs the startup sequence up to `PipelineReady`.
    ///
    /// On failure everything acquired so far is released, the platform is
    /// terminated and the bootstrap ends in `Terminated`.
    pub fn start<P>(&mut self, platform: &mut P, now: Instant) -> Result<(), BootstrapError>
    where
        P: Platform<Window = W, Graphics = G>,
    {
        if self.state != Lifecycle::SubsystemReady {
            log::warn!("start ignored in state {}", self.state);
            return Ok(());
        }

        match self.acquire(platform, now) {
            Ok(()) => Ok(()),
            Err(err) => {
                log::error!("{err}");
                self.close(platform);
                Err(err)
            }
        }
    }

    fn acquire<P>(&mut self, platform: &mut P, now: Instant) -> Result<(), BootstrapError>
    where
        P: Platform<Window = W, Graphics = G>,
    {
        let cfg = &self.config.window;
        log::info!("create window: {}x{} \"{}\"", cfg.width, cfg.height, cfg.title);
        let window = self.window.insert(platform.create_window(cfg)?);
        let (width, height) = platform.framebuffer_size(window);
        self.viewport = ViewportRect::full(width, height);
        advance(&mut self.state, Lifecycle::WindowCreated);

        log::info!("load graphics API");
        let graphics = self
            .graphics
            .insert(platform.load_graphics(window, &self.config.gpu)?);
        advance(&mut self.state, Lifecycle::ContextLoaded);

        log::info!("initialize graphics pipeline");
        let mesh = &self.config.mesh;
        mesh.validate()?;

        log::info!("process vertex and fragment shaders");
        let vertex = shader::compile(ShaderStage::Vertex, &self.config.program.vertex)?;
        let fragment = shader::compile(ShaderStage::Fragment, &self.config.program.fragment)?;
        let program = shader::link(vertex, fragment, &mesh.layout)?;

        self.pipeline = Some(graphics.create_pipeline(&program)?);
        drop(program);
        log::debug!("released component shaders");

        log::info!(
            "upload geometry: {} vertices, {} triangles{}",
            mesh.vertex_count(),
            mesh.triangle_count(),
            if mesh.indices.is_some() { " (indexed)" } else { "" }
        );
        self.mesh = Some(graphics.upload_mesh(mesh));

        self.throttle = self
            .config
            .frame_interval
            .map(|interval| FrameThrottle::new(interval, now));

        advance(&mut self.state, Lifecycle::PipelineReady);
        Ok(())
    }

    /// Framebuffer resize: the viewport follows the new size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.viewport = ViewportRect::full(width, height);
        if let Some(graphics) = self.graphics.as_mut() {
            graphics.resize_framebuffer(width, height);
        }
        log::info!("window resized to dimensions: {width}x{height}");
    }

    /// Asks the loop to stop; takes effect at the next frame boundary.
    pub fn request_close(&mut self) {
        if !self.close_requested {
            log::info!("close requested");
            self.close_requested = true;
        }
    }

    pub fn should_close(&self) -> bool {
        self.close_requested || self.state >= Lifecycle::Closing
    }

    /// Whether a frame may be drawn at `now` without violating the frame interval.
    pub fn is_frame_due(&self, now: Instant) -> bool {
        self.throttle.as_ref().is_none_or(|t| t.is_due(now))
    }

    /// When the next throttled frame becomes due, if the loop is throttled.
    pub fn next_frame_at(&self) -> Option<Instant> {
        self.throttle.as_ref().map(FrameThrottle::deadline)
    }

    /// One render loop iteration: clear, bind, draw, present.
    pub fn frame(&mut self, now: Instant) -> FrameOutcome {
        if self.should_close() {
            return FrameOutcome::Closed;
        }

        match self.state {
            Lifecycle::PipelineReady => {
                log::info!("begin render loop");
                advance(&mut self.state, Lifecycle::Rendering);
            }
            Lifecycle::Rendering => {}
            _ => return FrameOutcome::Closed,
        }

        if let Some(throttle) = self.throttle.as_mut() {
            if !throttle.try_begin(now) {
                return FrameOutcome::Throttled { until: throttle.deadline() };
            }
        }

        if self.viewport.is_empty() {
            self.report.frames_skipped += 1;
            return FrameOutcome::Skipped;
        }

        let (Some(graphics), Some(pipeline), Some(mesh)) =
            (self.graphics.as_mut(), self.pipeline.as_ref(), self.mesh.as_ref())
        else {
            return FrameOutcome::Closed;
        };

        match graphics.draw(self.config.clear_color, self.viewport, pipeline, mesh, self.draw_call) {
            DrawStatus::Presented => {
                self.report.draw_calls += 1;
                FrameOutcome::Drawn
            }
            DrawStatus::Skipped => {
                self.report.frames_skipped += 1;
                FrameOutcome::Skipped
            }
            DrawStatus::Lost => {
                log::error!("graphics context lost");
                self.request_close();
                FrameOutcome::Closed
            }
        }
    }

    /// Releases every resource and shuts the platform down.
    pub fn shutdown<P>(&mut self, platform: &mut P) -> RunReport
    where
        P: Platform<Window = W, Graphics = G>,
    {
        self.close(platform);
        self.report
    }

    fn close<P>(&mut self, platform: &mut P)
    where
        P: Platform<Window = W, Graphics = G>,
    {
        if self.state >= Lifecycle::Closing {
            return;
        }
        advance(&mut self.state, Lifecycle::Closing);
        log::info!("initiate cleanup");

        if let Some(graphics) = self.graphics.as_mut() {
            if let Some(mesh) = self.mesh.take() {
                graphics.release_mesh(mesh);
            }
            if let Some(pipeline) = self.pipeline.take() {
                graphics.release_pipeline(pipeline);
            }
        }
        drop(self.graphics.take());

        if let Some(window) = self.window.take() {
            platform.destroy_window(window);
        }
        platform.terminate();

        advance(&mut self.state, Lifecycle::Terminated);
        log::info!(
            "terminated after {} frames ({} skipped)",
            self.report.draw_calls,
            self.report.frames_skipped
        );
    }
}
