/// Size in bytes of one vertex component. All attributes are 32-bit floats.
pub const COMPONENT_SIZE: u64 = std::mem::size_of::<f32>() as u64;

/// One shader input fed from the vertex buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct VertexAttribute {
    /// Shader input location (`@location(n)`).
    pub location: u32,
    /// Number of f32 components (1..=4).
    pub components: u32,
    /// Byte offset from the start of a vertex.
    pub offset: u64,
}

impl VertexAttribute {
    pub const fn new(location: u32, components: u32, offset: u64) -> Self {
        Self { location, components, offset }
    }

    /// Matching wgpu vertex format, or `None` for an unsupported component count.
    pub fn format(&self) -> Option<wgpu::VertexFormat> {
        match self.components {
            1 => Some(wgpu::VertexFormat::Float32),
            2 => Some(wgpu::VertexFormat::Float32x2),
            3 => Some(wgpu::VertexFormat::Float32x3),
            4 => Some(wgpu::VertexFormat::Float32x4),
            _ => None,
        }
    }

    fn end(&self) -> u64 {
        self.offset + self.components as u64 * COMPONENT_SIZE
    }
}

/// Interleaved vertex buffer layout.
///
/// Maps attribute locations to `(components, offset)` within a vertex of
/// `stride` bytes. It must agree with the vertex shader's declared inputs;
/// the shader linker rejects any mismatch.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct VertexLayout {
    pub stride: u64,
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// Builds a tightly packed layout from `(location, components)` pairs in buffer order.
    pub fn packed(attrs: &[(u32, u32)]) -> Self {
        let mut offset = 0;
        let attributes = attrs
            .iter()
            .map(|&(location, components)| {
                let attr = VertexAttribute::new(location, components, offset);
                offset = attr.end();
                attr
            })
            .collect();

        Self { stride: offset, attributes }
    }

    /// `vec3` position at location 0.
    pub fn position() -> Self {
        Self::packed(&[(0, 3)])
    }

    /// `vec3` position at location 0 followed by `vec3` color at location 1.
    pub fn position_color() -> Self {
        Self::packed(&[(0, 3), (1, 3)])
    }

    /// Looks up the attribute bound to `location`.
    pub fn attribute(&self, location: u32) -> Option<&VertexAttribute> {
        self.attributes.iter().find(|a| a.location == location)
    }

    /// Stride in f32 units.
    pub fn stride_floats(&self) -> usize {
        (self.stride / COMPONENT_SIZE) as usize
    }

    /// Checks that the layout is self-consistent.
    pub fn validate(&self) -> Result<(), String> {
        if self.stride == 0 || self.stride % COMPONENT_SIZE != 0 {
            return Err(format!("stride {} is not a positive multiple of 4 bytes", self.stride));
        }
        if self.attributes.is_empty() {
            return Err("layout declares no attributes".to_string());
        }

        for (i, attr) in self.attributes.iter().enumerate() {
            if attr.format().is_none() {
                return Err(format!(
                    "attribute at location {} has {} components (expected 1..=4)",
                    attr.location, attr.components
                ));
            }
            if attr.end() > self.stride {
                return Err(format!(
                    "attribute at location {} ends at byte {} past stride {}",
                    attr.location,
                    attr.end(),
                    self.stride
                ));
            }
            if self.attributes[..i].iter().any(|a| a.location == attr.location) {
                return Err(format!("location {} is declared twice", attr.location));
            }
        }

        Ok(())
    }

    /// wgpu attribute descriptors in declaration order.
    pub fn wgpu_attributes(&self) -> Vec<wgpu::VertexAttribute> {
        self.attributes
            .iter()
            .filter_map(|a| {
                a.format().map(|format| wgpu::VertexAttribute {
                    format,
                    offset: a.offset,
                    shader_location: a.location,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_color_is_interleaved() {
        let layout = VertexLayout::position_color();
        assert_eq!(layout.stride, 24);
        assert_eq!(layout.stride_floats(), 6);
        assert_eq!(layout.attribute(0), Some(&VertexAttribute::new(0, 3, 0)));
        assert_eq!(layout.attribute(1), Some(&VertexAttribute::new(1, 3, 12)));
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn rejects_attribute_past_stride() {
        let layout = VertexLayout {
            stride: 12,
            attributes: vec![VertexAttribute::new(0, 3, 0), VertexAttribute::new(1, 3, 12)],
        };
        assert!(layout.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_location() {
        let layout = VertexLayout::packed(&[(0, 3), (0, 2)]);
        assert!(layout.validate().unwrap_err().contains("twice"));
    }

    #[test]
    fn rejects_five_components() {
        let layout = VertexLayout::packed(&[(0, 5)]);
        assert!(layout.validate().is_err());
    }

    #[test]
    fn wgpu_attributes_carry_offsets() {
        let attrs = VertexLayout::position_color().wgpu_attributes();
        assert_eq!(attrs.len(), 2);
        assert_eq!(attrs[1].offset, 12);
        assert_eq!(attrs[1].format, wgpu::VertexFormat::Float32x3);
    }
}
