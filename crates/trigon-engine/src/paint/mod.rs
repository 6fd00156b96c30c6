//! Color model.

mod color;

pub use color::Color;
