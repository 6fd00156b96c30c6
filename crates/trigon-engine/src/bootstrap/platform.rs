use crate::coords::ViewportRect;
use crate::device::GpuInit;
use crate::error::BootstrapError;
use crate::geometry::{DrawCall, Mesh};
use crate::paint::Color;
use crate::shader::LinkedProgram;

/// Windowing collaborator: window lifetime and graphics acquisition.
pub trait Platform {
    type Window;
    type Graphics: Graphics;

    fn create_window(
        &mut self,
        config: &super::WindowConfig,
    ) -> Result<Self::Window, BootstrapError>;

    /// Current framebuffer size in physical pixels.
    fn framebuffer_size(&self, window: &Self::Window) -> (u32, u32);

    /// Binds a graphics context to `window` using the pre-set hints.
    fn load_graphics(
        &mut self,
        window: &Self::Window,
        hints: &GpuInit,
    ) -> Result<Self::Graphics, BootstrapError>;

    fn destroy_window(&mut self, window: Self::Window);

    /// Shuts the windowing subsystem down. Called exactly once, last.
    fn terminate(&mut self);
}

/// Result of presenting one frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawStatus {
    Presented,
    /// Nothing was drawn (e.g. zero-sized surface, transient surface error).
    Skipped,
    /// The context is unusable; the bootstrap closes.
    Lost,
}

/// Graphics collaborator: the direct GPU calls issued by the bootstrap.
///
/// Dropping the implementor releases the context itself.
pub trait Graphics {
    type Pipeline;
    type Mesh;

    /// Builds the GPU program from a linked program and its vertex layout.
    fn create_pipeline(&mut self, program: &LinkedProgram) -> Result<Self::Pipeline, BootstrapError>;

    /// Uploads static vertex (and index) buffers.
    fn upload_mesh(&mut self, mesh: &Mesh) -> Self::Mesh;

    /// Tracks a framebuffer resize.
    fn resize_framebuffer(&mut self, width: u32, height: u32);

    /// Clears, binds `pipeline`, issues `call` and presents.
    fn draw(
        &mut self,
        clear: Color,
        viewport: ViewportRect,
        pipeline: &Self::Pipeline,
        mesh: &Self::Mesh,
        call: DrawCall,
    ) -> DrawStatus;

    fn release_mesh(&mut self, mesh: Self::Mesh);

    fn release_pipeline(&mut self, pipeline: Self::Pipeline);
}
