use crate::error::BootstrapError;
use crate::geometry::VertexLayout;

use super::compile::{CompiledShader, ShaderStage};

/// A user-defined value crossing a stage boundary at `@location(n)`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Varying {
    pub location: u32,
    pub components: u32,
    pub float: bool,
}

/// Vertex + fragment stages checked against each other and the vertex layout.
///
/// The GPU-side pipeline is built from this; the component shaders are not
/// needed once that is done.
#[derive(Debug, Clone)]
pub struct LinkedProgram {
    pub vertex: CompiledShader,
    pub fragment: CompiledShader,
    pub layout: VertexLayout,
    pub inputs: Vec<Varying>,
    pub varyings: Vec<Varying>,
}

/// Links two compiled stages for use with `layout`.
///
/// Fails when:
/// - a stage is bound to the wrong slot
/// - a vertex input has no layout attribute of the same width, or an
///   attribute feeds no vertex input
/// - a fragment input is not written by the vertex stage with the same type
/// - the fragment stage does not write color location 0
pub fn link(
    vertex: CompiledShader,
    fragment: CompiledShader,
    layout: &VertexLayout,
) -> Result<LinkedProgram, BootstrapError> {
    if vertex.stage != ShaderStage::Vertex || fragment.stage != ShaderStage::Fragment {
        return Err(BootstrapError::ProgramLink(format!(
            "expected vertex + fragment stages, got {} + {}",
            vertex.stage, fragment.stage
        )));
    }

    let inputs = stage_inputs(&vertex)?;
    let varyings = stage_output(&vertex)?;
    let fragment_inputs = stage_inputs(&fragment)?;
    let fragment_outputs = stage_output(&fragment)?;

    for input in &inputs {
        let Some(attr) = layout.attribute(input.location) else {
            return Err(BootstrapError::ProgramLink(format!(
                "vertex input at location {} has no attribute in the vertex layout",
                input.location
            )));
        };
        if !input.float || attr.components != input.components {
            return Err(BootstrapError::ProgramLink(format!(
                "vertex input at location {} expects {} components, layout provides {} floats",
                input.location, input.components, attr.components
            )));
        }
    }

    if let Some(unused) = layout
        .attributes
        .iter()
        .find(|a| !inputs.iter().any(|i| i.location == a.location))
    {
        return Err(BootstrapError::ProgramLink(format!(
            "layout attribute at location {} is not consumed by the vertex shader",
            unused.location
        )));
    }

    for input in &fragment_inputs {
        match varyings.iter().find(|v| v.location == input.location) {
            Some(v) if v == input => {}
            Some(v) => {
                return Err(BootstrapError::ProgramLink(format!(
                    "varying at location {} is {} components from the vertex stage but {} in the fragment stage",
                    input.location, v.components, input.components
                )));
            }
            None => {
                return Err(BootstrapError::ProgramLink(format!(
                    "fragment input at location {} is not written by the vertex stage",
                    input.location
                )));
            }
        }
    }

    if !fragment_outputs.iter().any(|o| o.location == 0) {
        return Err(BootstrapError::ProgramLink(
            "fragment stage does not write color location 0".to_string(),
        ));
    }

    log::debug!(
        "linked program: {} vertex inputs, {} varyings",
        inputs.len(),
        varyings.len()
    );

    Ok(LinkedProgram {
        vertex,
        fragment,
        layout: layout.clone(),
        inputs,
        varyings,
    })
}

fn stage_inputs(shader: &CompiledShader) -> Result<Vec<Varying>, BootstrapError> {
    let ep = entry_point(shader)?;
    let mut out = Vec::new();
    for arg in &ep.function.arguments {
        collect(shader, arg.ty, arg.binding.as_ref(), &mut out)?;
    }
    Ok(out)
}

fn stage_output(shader: &CompiledShader) -> Result<Vec<Varying>, BootstrapError> {
    let ep = entry_point(shader)?;
    let mut out = Vec::new();
    if let Some(result) = &ep.function.result {
        collect(shader, result.ty, result.binding.as_ref(), &mut out)?;
    }
    Ok(out)
}

fn entry_point(shader: &CompiledShader) -> Result<&naga::EntryPoint, BootstrapError> {
    shader.entry().ok_or_else(|| {
        BootstrapError::ProgramLink(format!(
            "{} entry point `{}` is missing",
            shader.stage, shader.entry_point
        ))
    })
}

/// Flattens a (possibly struct-typed) interface value into located varyings.
/// Built-ins such as `@builtin(position)` are skipped.
fn collect(
    shader: &CompiledShader,
    ty: naga::Handle<naga::Type>,
    binding: Option<&naga::Binding>,
    out: &mut Vec<Varying>,
) -> Result<(), BootstrapError> {
    let inner = &shader.module.types[ty].inner;

    match binding {
        Some(naga::Binding::BuiltIn(_)) => Ok(()),
        Some(naga::Binding::Location { location, .. }) => {
            let (components, scalar) = match inner {
                naga::TypeInner::Scalar(scalar) => (1, scalar),
                naga::TypeInner::Vector { size, scalar } => (vector_width(*size), scalar),
                _ => {
                    return Err(BootstrapError::ProgramLink(format!(
                        "{} interface at location {location} is not a scalar or vector",
                        shader.stage
                    )));
                }
            };
            out.push(Varying {
                location: *location,
                components,
                float: scalar.kind == naga::ScalarKind::Float,
            });
            Ok(())
        }
        None => match inner {
            naga::TypeInner::Struct { members, .. } => {
                for member in members {
                    collect(shader, member.ty, member.binding.as_ref(), out)?;
                }
                Ok(())
            }
            _ => Err(BootstrapError::ProgramLink(format!(
                "{} interface value has no binding",
                shader.stage
            ))),
        },
    }
}

fn vector_width(size: naga::VectorSize) -> u32 {
    match size {
        naga::VectorSize::Bi => 2,
        naga::VectorSize::Tri => 3,
        naga::VectorSize::Quad => 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::compile;

    const VS_COLOR: &str = r#"
        struct VertexOut {
            @builtin(position) position: vec4<f32>,
            @location(0) color: vec3<f32>,
        }

        @vertex
        fn vs_main(@location(0) pos: vec3<f32>, @location(1) color: vec3<f32>) -> VertexOut {
            var out: VertexOut;
            out.position = vec4<f32>(pos, 1.0);
            out.color = color;
            return out;
        }
    "#;

    const FS_COLOR: &str = r#"
        @fragment
        fn fs_main(@location(0) color: vec3<f32>) -> @location(0) vec4<f32> {
            return vec4<f32>(color, 1.0);
        }
    "#;

    fn vs(src: &str) -> CompiledShader {
        compile(ShaderStage::Vertex, src).unwrap()
    }

    fn fs(src: &str) -> CompiledShader {
        compile(ShaderStage::Fragment, src).unwrap()
    }

    #[test]
    fn links_matching_interface() {
        let program = link(vs(VS_COLOR), fs(FS_COLOR), &VertexLayout::position_color()).unwrap();
        assert_eq!(program.inputs.len(), 2);
        assert_eq!(
            program.varyings,
            vec![Varying { location: 0, components: 3, float: true }]
        );
    }

    #[test]
    fn missing_layout_attribute_fails() {
        let err = link(vs(VS_COLOR), fs(FS_COLOR), &VertexLayout::position()).unwrap_err();
        assert!(matches!(err, BootstrapError::ProgramLink(ref m) if m.contains("location 1")));
    }

    #[test]
    fn component_count_mismatch_fails() {
        let layout = VertexLayout::packed(&[(0, 3), (1, 4)]);
        let err = link(vs(VS_COLOR), fs(FS_COLOR), &layout).unwrap_err();
        assert!(matches!(err, BootstrapError::ProgramLink(_)));
    }

    #[test]
    fn unwritten_fragment_input_fails() {
        let fs_src = r#"
            @fragment
            fn fs_main(@location(2) tint: vec3<f32>) -> @location(0) vec4<f32> {
                return vec4<f32>(tint, 1.0);
            }
        "#;
        let err = link(vs(VS_COLOR), fs(fs_src), &VertexLayout::position_color()).unwrap_err();
        assert!(matches!(err, BootstrapError::ProgramLink(ref m) if m.contains("not written")));
    }

    #[test]
    fn varying_width_mismatch_fails() {
        let fs_src = r#"
            @fragment
            fn fs_main(@location(0) color: vec4<f32>) -> @location(0) vec4<f32> {
                return color;
            }
        "#;
        let err = link(vs(VS_COLOR), fs(fs_src), &VertexLayout::position_color()).unwrap_err();
        assert!(matches!(err, BootstrapError::ProgramLink(_)));
    }

    #[test]
    fn fragment_without_color_location_zero_fails() {
        let vs_src = r#"
            @vertex
            fn vs_main(@location(0) pos: vec3<f32>) -> @builtin(position) vec4<f32> {
                return vec4<f32>(pos, 1.0);
            }
        "#;
        let fs_src = r#"
            @fragment
            fn fs_main() -> @location(1) vec4<f32> {
                return vec4<f32>(0.8, 0.3, 0.02, 1.0);
            }
        "#;
        let err = link(vs(vs_src), fs(fs_src), &VertexLayout::position()).unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::ProgramLink(ref m) if m.contains("does not write color location 0")
        ));
    }

    #[test]
    fn swapped_stages_fail() {
        let err = link(fs(FS_COLOR), vs(VS_COLOR), &VertexLayout::position_color()).unwrap_err();
        assert!(matches!(err, BootstrapError::ProgramLink(_)));
    }
}
