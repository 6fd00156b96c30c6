use crate::error::BootstrapError;

use super::layout::VertexLayout;

/// The single draw issued per frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DrawCall {
    /// Non-indexed triangle list.
    Arrays { vertex_count: u32 },
    /// Indexed triangle list with `u32` indices.
    Indexed { index_count: u32 },
}

impl DrawCall {
    pub fn triangle_count(self) -> u32 {
        match self {
            DrawCall::Arrays { vertex_count } => vertex_count / 3,
            DrawCall::Indexed { index_count } => index_count / 3,
        }
    }
}

/// Host-side geometry uploaded once before the render loop.
///
/// Counts are derived from the data; nothing downstream hardcodes them.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<f32>,
    pub indices: Option<Vec<u32>>,
    pub layout: VertexLayout,
}

impl Mesh {
    pub fn new(vertices: Vec<f32>, layout: VertexLayout) -> Self {
        Self { vertices, indices: None, layout }
    }

    pub fn indexed(vertices: Vec<f32>, indices: Vec<u32>, layout: VertexLayout) -> Self {
        Self { vertices, indices: Some(indices), layout }
    }

    pub fn vertex_count(&self) -> usize {
        match self.layout.stride_floats() {
            0 => 0,
            n => self.vertices.len() / n,
        }
    }

    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.vertex_count() / 3,
        }
    }

    pub fn draw_call(&self) -> DrawCall {
        match &self.indices {
            Some(indices) => DrawCall::Indexed { index_count: indices.len() as u32 },
            None => DrawCall::Arrays { vertex_count: self.vertex_count() as u32 },
        }
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> Option<&[u8]> {
        self.indices.as_deref().map(bytemuck::cast_slice)
    }

    /// Checks the data against its layout before any of it reaches the GPU.
    ///
    /// - the layout is well formed
    /// - the vertex data is a whole number of vertices
    /// - the primitive count is a whole number of triangles
    /// - every index refers to an existing vertex
    pub fn validate(&self) -> Result<(), BootstrapError> {
        self.layout.validate().map_err(BootstrapError::InvalidGeometry)?;

        let stride = self.layout.stride_floats();
        if self.vertices.is_empty() || self.vertices.len() % stride != 0 {
            return Err(BootstrapError::InvalidGeometry(format!(
                "{} floats is not a whole number of {stride}-float vertices",
                self.vertices.len()
            )));
        }

        let vertex_count = self.vertex_count();
        match &self.indices {
            None => {
                if vertex_count % 3 != 0 {
                    return Err(BootstrapError::InvalidGeometry(format!(
                        "{vertex_count} vertices do not form whole triangles"
                    )));
                }
            }
            Some(indices) => {
                if indices.is_empty() || indices.len() % 3 != 0 {
                    return Err(BootstrapError::InvalidGeometry(format!(
                        "{} indices do not form whole triangles",
                        indices.len()
                    )));
                }
                if let Some((slot, &index)) =
                    indices.iter().enumerate().find(|&(_, &i)| i as usize >= vertex_count)
                {
                    return Err(BootstrapError::InvalidGeometry(format!(
                        "index {index} at slot {slot} is out of range for {vertex_count} vertices"
                    )));
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        Mesh::new(
            vec![-0.5, -0.433, 0.0, 0.5, -0.433, 0.0, 0.0, 0.433, 0.0],
            VertexLayout::position(),
        )
    }

    #[test]
    fn three_vertices_make_one_triangle() {
        let mesh = triangle();
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.draw_call(), DrawCall::Arrays { vertex_count: 3 });
    }

    #[test]
    fn indexed_draw_uses_index_count() {
        let mut mesh = triangle();
        mesh.indices = Some(vec![0, 1, 2, 2, 1, 0]);
        assert!(mesh.validate().is_ok());
        assert_eq!(mesh.draw_call(), DrawCall::Indexed { index_count: 6 });
        assert_eq!(mesh.draw_call().triangle_count(), 2);
    }

    #[test]
    fn rejects_out_of_range_index() {
        let mut mesh = triangle();
        mesh.indices = Some(vec![0, 1, 3]);
        let err = mesh.validate().unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidGeometry(ref m) if m.contains("index 3")));
    }

    #[test]
    fn rejects_partial_vertex() {
        let mut mesh = triangle();
        mesh.vertices.pop();
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn rejects_partial_triangle() {
        let mut mesh = triangle();
        mesh.indices = Some(vec![0, 1]);
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn byte_views_match_data() {
        let mut mesh = triangle();
        mesh.indices = Some(vec![0, 1, 2]);
        assert_eq!(mesh.vertex_bytes().len(), 9 * 4);
        assert_eq!(mesh.index_bytes().map(<[u8]>::len), Some(12));
    }
}
