//! Framebuffer coordinate types.
//!
//! Physical pixels, origin at the framebuffer's corner.

mod viewport;

pub use viewport::ViewportRect;
