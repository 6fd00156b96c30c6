//! Window + runtime loop.
//!
//! Owns the `winit` event loop and window, and drives a
//! [`Bootstrap`](crate::bootstrap::Bootstrap) from its callbacks.

mod runtime;

pub use runtime::Runtime;
