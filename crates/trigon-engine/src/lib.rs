//! Trigon engine crate.
//!
//! A small windowed-rendering bootstrap: one window, one shader program, one
//! fixed mesh drawn every frame until the window is closed. The sequence lives
//! in [`bootstrap`]; [`window::Runtime`] drives it with winit + wgpu.

pub mod bootstrap;
pub mod coords;
pub mod device;
pub mod error;
pub mod geometry;
pub mod logging;
pub mod paint;
pub mod render;
pub mod shader;
pub mod time;
pub mod window;

pub use error::BootstrapError;
