//! Shader compilation and program linking.
//!
//! Sources are WGSL. Both steps run on the CPU through `naga`, so a broken
//! shader is reported with a diagnostic before any GPU object is created
//! instead of surfacing as a blank window.

mod compile;
mod link;

pub use compile::{compile, CompiledShader, ShaderStage};
pub use link::{link, LinkedProgram, Varying};

/// Embedded source text for one program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSource {
    pub vertex: String,
    pub fragment: String,
}

impl ProgramSource {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        Self { vertex: vertex.into(), fragment: fragment.into() }
    }
}
