//! The three fixed scenes, as bootstrap configurations.

use trigon_engine::bootstrap::BootstrapConfig;
use trigon_engine::geometry::{Mesh, VertexLayout};
use trigon_engine::paint::Color;
use trigon_engine::shader::ProgramSource;
use trigon_engine::time::FRAME_INTERVAL_60HZ;

const POSITION_VS: &str = include_str!("shaders/position.vert.wgsl");
const ORANGE_FS: &str = include_str!("shaders/orange.frag.wgsl");
const COLOR_VS: &str = include_str!("shaders/color.vert.wgsl");
const COLOR_FS: &str = include_str!("shaders/color.frag.wgsl");

/// Slate blue-gray behind the flat triangle.
pub const SLATE: Color = Color::rgba(0.17, 0.25, 0.32, 1.0);

#[rustfmt::skip]
const TRIANGLE_POSITIONS: [f32; 9] = [
    -0.5, -0.433, 0.0,
     0.5, -0.433, 0.0,
     0.0,  0.433, 0.0,
];

#[rustfmt::skip]
const TRIANGLE_COLORED: [f32; 18] = [
    // position           color
    -0.5, -0.433, 0.0,    1.0, 0.0, 0.0,
     0.5, -0.433, 0.0,    0.0, 1.0, 0.0,
     0.0,  0.433, 0.0,    0.0, 0.0, 1.0,
];

/// A center vertex fanned out to two wings, plus two inner triangles.
#[rustfmt::skip]
const SHAPE_VERTICES: [f32; 66] = [
    // position              color
     0.0,     0.0,   0.0,    1.0, 0.0, 0.0,
    -0.75,   -0.75,  0.0,    0.0, 1.0, 0.0,
    -0.75,    0.75,  0.0,    0.0, 0.0, 1.0,
     0.75,   -0.75,  0.0,    0.0, 1.0, 0.0,
     0.75,    0.75,  0.0,    0.0, 0.0, 1.0,
    -0.1875,  0.0,   0.0,    0.0, 1.0, 0.0,
    -0.625,  -0.375, 0.0,    0.0, 0.0, 1.0,
    -0.625,   0.375, 0.0,    1.0, 0.0, 0.0,
     0.1875,  0.0,   0.0,    0.0, 1.0, 0.0,
     0.625,  -0.375, 0.0,    0.0, 0.0, 1.0,
     0.625,   0.375, 0.0,    1.0, 0.0, 0.0,
];

#[rustfmt::skip]
const SHAPE_INDICES: [u32; 12] = [
    0, 1, 2,
    0, 3, 4,
    5, 6, 7,
    8, 9, 10,
];

/// Flat orange triangle on slate.
pub fn hello_triangle() -> BootstrapConfig {
    BootstrapConfig::new(
        ProgramSource::new(POSITION_VS, ORANGE_FS),
        Mesh::new(TRIANGLE_POSITIONS.to_vec(), VertexLayout::position()),
    )
    .with_clear_color(SLATE)
}

/// Red/green/blue corners blended across the face, on black.
pub fn hello_triangle_interpolated() -> BootstrapConfig {
    BootstrapConfig::new(
        ProgramSource::new(COLOR_VS, COLOR_FS),
        Mesh::new(TRIANGLE_COLORED.to_vec(), VertexLayout::position_color()),
    )
    .with_clear_color(Color::BLACK)
}

/// Four indexed triangles on black, capped at 60 frames per second.
pub fn cool_triangle_shape() -> BootstrapConfig {
    BootstrapConfig::new(
        ProgramSource::new(COLOR_VS, COLOR_FS),
        Mesh::indexed(
            SHAPE_VERTICES.to_vec(),
            SHAPE_INDICES.to_vec(),
            VertexLayout::position_color(),
        ),
    )
    .with_clear_color(Color::BLACK)
    .with_frame_interval(FRAME_INTERVAL_60HZ)
}
