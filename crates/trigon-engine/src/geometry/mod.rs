//! Host-side geometry: vertex layouts and the fixed mesh uploaded at startup.

mod layout;
mod mesh;

pub use layout::{VertexAttribute, VertexLayout, COMPONENT_SIZE};
pub use mesh::{DrawCall, Mesh};
