use std::fmt;

use crate::error::BootstrapError;

/// Pipeline stage a shader runs at.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn naga(self) -> naga::ShaderStage {
        match self {
            ShaderStage::Vertex => naga::ShaderStage::Vertex,
            ShaderStage::Fragment => naga::ShaderStage::Fragment,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// A single validated shader stage.
///
/// Holds the WGSL text (handed to the GPU when the pipeline is built) and the
/// parsed IR (used for interface checks at link time).
#[derive(Debug, Clone)]
pub struct CompiledShader {
    pub stage: ShaderStage,
    pub entry_point: String,
    pub source: String,
    pub(crate) module: naga::Module,
}

impl CompiledShader {
    pub(crate) fn entry(&self) -> Option<&naga::EntryPoint> {
        self.module
            .entry_points
            .iter()
            .find(|ep| ep.name == self.entry_point)
    }
}

/// Parses and validates one WGSL stage.
///
/// The module must declare exactly one entry point for `stage`. Parse and
/// validation diagnostics are rendered against `source` so the error carries
/// line/column context.
pub fn compile(stage: ShaderStage, source: &str) -> Result<CompiledShader, BootstrapError> {
    let fail = |message: String| BootstrapError::ShaderCompile {
        stage,
        message: message.trim_end().to_string(),
    };

    let module = naga::front::wgsl::parse_str(source).map_err(|e| fail(e.emit_to_string(source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| fail(e.emit_to_string(source)))?;

    let mut entries = module.entry_points.iter().filter(|ep| ep.stage == stage.naga());
    let entry_point = match (entries.next(), entries.next()) {
        (Some(ep), None) => ep.name.clone(),
        (None, _) => return Err(fail(format!("no @{stage} entry point"))),
        (Some(_), Some(_)) => return Err(fail(format!("more than one @{stage} entry point"))),
    };

    log::debug!("compiled {stage} shader (entry point `{entry_point}`)");

    Ok(CompiledShader {
        stage,
        entry_point,
        source: source.to_string(),
        module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const VS: &str = r#"
        @vertex
        fn vs_main(@location(0) pos: vec3<f32>) -> @builtin(position) vec4<f32> {
            return vec4<f32>(pos, 1.0);
        }
    "#;

    #[test]
    fn compiles_valid_vertex_stage() {
        let shader = compile(ShaderStage::Vertex, VS).unwrap();
        assert_eq!(shader.entry_point, "vs_main");
        assert!(shader.entry().is_some());
    }

    #[test]
    fn syntax_error_is_shader_compile_failure() {
        let err = compile(ShaderStage::Vertex, "@vertex fn vs_main( -> {").unwrap_err();
        assert!(matches!(err, BootstrapError::ShaderCompile { stage: ShaderStage::Vertex, .. }));
    }

    #[test]
    fn type_mismatch_is_shader_compile_failure() {
        let src = r#"
            @fragment
            fn fs_main() -> @location(0) vec4<f32> {
                let x: f32 = 1u;
                return vec4<f32>(x);
            }
        "#;
        let err = compile(ShaderStage::Fragment, src).unwrap_err();
        assert!(matches!(err, BootstrapError::ShaderCompile { stage: ShaderStage::Fragment, .. }));
    }

    #[test]
    fn wrong_stage_is_rejected() {
        let err = compile(ShaderStage::Fragment, VS).unwrap_err();
        assert!(err.to_string().contains("no @fragment entry point"));
    }
}
