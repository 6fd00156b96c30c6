use std::time::Duration;

use crate::device::GpuInit;
use crate::geometry::Mesh;
use crate::paint::Color;
use crate::shader::ProgramSource;

/// Window parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner size in logical pixels.
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Trigon Playground".to_string(),
            width: 640,
            height: 480,
        }
    }
}

/// Everything one bootstrap run needs.
///
/// The program source, geometry and clear color are plain values owned by
/// the run; nothing is read from files or the environment.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    pub window: WindowConfig,
    /// Context hints, applied before the window exists.
    pub gpu: GpuInit,
    pub program: ProgramSource,
    pub mesh: Mesh,
    pub clear_color: Color,
    /// Minimum time between drawn frames. `None` draws once per vsync.
    pub frame_interval: Option<Duration>,
}

impl BootstrapConfig {
    pub fn new(program: ProgramSource, mesh: Mesh) -> Self {
        Self {
            window: WindowConfig::default(),
            gpu: GpuInit::default(),
            program,
            mesh,
            clear_color: Color::BLACK,
            frame_interval: None,
        }
    }

    pub fn with_clear_color(mut self, color: Color) -> Self {
        self.clear_color = color;
        self
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = Some(interval);
        self
    }
}
