use std::sync::Arc;
use std::time::Instant;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::bootstrap::{
    Bootstrap, BootstrapConfig, FrameOutcome, Lifecycle, Platform, RunReport, WindowConfig,
};
use crate::device::{Gpu, GpuInit};
use crate::error::BootstrapError;

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Runs one bootstrap to completion on the calling (main) thread.
    ///
    /// Returns once the window has been closed and every resource released,
    /// or with the error that stopped startup.
    pub fn run(config: BootstrapConfig) -> Result<RunReport, BootstrapError> {
        log::info!("initialize windowing subsystem");
        let event_loop = EventLoop::new().map_err(|e| subsystem_failure(e.to_string()))?;

        let mut state = RuntimeState::new(config);
        state.bootstrap.subsystem_ready();

        let result = event_loop.run_app(&mut state);

        if let Some(err) = state.error.take() {
            return Err(err);
        }
        result.map_err(|e| subsystem_failure(format!("event loop terminated with error: {e}")))?;

        Ok(state.bootstrap.report())
    }
}

/// Event loop failures surface here, past the point where the bootstrap
/// logs its own errors.
fn subsystem_failure(message: String) -> BootstrapError {
    let err = BootstrapError::SubsystemInit(message);
    log::error!("{err}");
    err
}

/// [`Platform`] backed by the active winit event loop.
///
/// Only lives for the duration of one event loop callback.
struct WinitPlatform<'a> {
    event_loop: &'a ActiveEventLoop,
}

impl Platform for WinitPlatform<'_> {
    type Window = Arc<Window>;
    type Graphics = Gpu;

    fn create_window(&mut self, config: &WindowConfig) -> Result<Arc<Window>, BootstrapError> {
        let attrs = Window::default_attributes()
            .with_title(config.title.as_str())
            .with_inner_size(LogicalSize::new(config.width as f64, config.height as f64));

        self.event_loop
            .create_window(attrs)
            .map(Arc::new)
            .map_err(|e| BootstrapError::WindowCreate(e.to_string()))
    }

    fn framebuffer_size(&self, window: &Arc<Window>) -> (u32, u32) {
        let size = window.inner_size();
        (size.width, size.height)
    }

    fn load_graphics(&mut self, window: &Arc<Window>, hints: &GpuInit) -> Result<Gpu, BootstrapError> {
        pollster::block_on(Gpu::new(Arc::clone(window), hints))
            .map_err(|e| BootstrapError::FunctionLoad(format!("{e:#}")))
    }

    fn destroy_window(&mut self, window: Arc<Window>) {
        if Arc::strong_count(&window) > 1 {
            log::warn!("window destroyed while still referenced");
        }
        drop(window);
    }

    fn terminate(&mut self) {
        self.event_loop.exit();
    }
}

struct RuntimeState {
    bootstrap: Bootstrap<Arc<Window>, Gpu>,
    error: Option<BootstrapError>,
}

impl RuntimeState {
    fn new(config: BootstrapConfig) -> Self {
        Self {
            bootstrap: Bootstrap::new(config),
            error: None,
        }
    }

    fn is_own_window(&self, id: WindowId) -> bool {
        self.bootstrap.window().is_some_and(|w| w.id() == id)
    }

    fn request_redraw(&self) {
        if let Some(window) = self.bootstrap.window() {
            window.request_redraw();
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        if self.bootstrap.state() == Lifecycle::Terminated {
            return;
        }
        let mut platform = WinitPlatform { event_loop };
        let report = self.bootstrap.shutdown(&mut platform);
        log::debug!("run report: {report:?}");
    }
}

impl ApplicationHandler for RuntimeState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.bootstrap.state() != Lifecycle::SubsystemReady {
            return;
        }

        let mut platform = WinitPlatform { event_loop };
        if let Err(err) = self.bootstrap.start(&mut platform, Instant::now()) {
            // The bootstrap has already cleaned up and asked the loop to exit.
            self.error = Some(err);
            return;
        }

        self.request_redraw();
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        if !self.is_own_window(window_id) {
            return;
        }

        match event {
            WindowEvent::CloseRequested => self.bootstrap.request_close(),

            WindowEvent::Resized(size) => {
                self.bootstrap.resize(size.width, size.height);
                self.request_redraw();
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(size) = self.bootstrap.window().map(|w| w.inner_size()) {
                    self.bootstrap.resize(size.width, size.height);
                }
            }

            WindowEvent::RedrawRequested => match self.bootstrap.frame(Instant::now()) {
                FrameOutcome::Drawn | FrameOutcome::Skipped | FrameOutcome::Closed => {}
                FrameOutcome::Throttled { until } => {
                    log::trace!("frame throttled for {:?}", until.saturating_duration_since(Instant::now()));
                }
            },

            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.bootstrap.should_close() {
            self.shutdown(event_loop);
            return;
        }
        if self.bootstrap.state() < Lifecycle::PipelineReady {
            return;
        }

        // Sleep until the next frame is due instead of spinning; unthrottled
        // loops are paced by the vsync'd present.
        let now = Instant::now();
        if self.bootstrap.is_frame_due(now) {
            event_loop.set_control_flow(ControlFlow::Wait);
            self.request_redraw();
        } else if let Some(deadline) = self.bootstrap.next_frame_at() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }

    fn exiting(&mut self, event_loop: &ActiveEventLoop) {
        self.shutdown(event_loop);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_loop_failure_is_subsystem_init() {
        let err = subsystem_failure("event loop terminated with error: os error 22".into());
        assert!(matches!(err, BootstrapError::SubsystemInit(ref m) if m.contains("os error 22")));
        assert_eq!(err.exit_code(), 1);
    }
}
