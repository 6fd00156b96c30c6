//! GPU rendering.
//!
//! Implements the bootstrap's [`Graphics`](crate::bootstrap::Graphics) calls on
//! top of [`Gpu`](crate::device::Gpu): one pipeline, one static mesh, one
//! clear + draw pass per frame.

mod gpu_graphics;

pub use gpu_graphics::GpuMesh;
