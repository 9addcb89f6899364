use crate::{
    octant::Octant,
    vertex::{ColoredVertex, Vertex},
};

/// Geometry uploaded once and drawn every frame.
#[derive(Debug, Clone)]
pub enum Mesh {
    /// Drawn with `draw`, three vertices per triangle.
    Colored(Vec<ColoredVertex>),
    /// Drawn with `draw_indexed`.
    Indexed {
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
    },
}

impl Mesh {
    pub fn vertex_bytes(&self) -> &[u8] {
        match self {
            Mesh::Colored(vertices) => bytemuck::cast_slice(vertices),
            Mesh::Indexed { vertices, .. } => bytemuck::cast_slice(vertices),
        }
    }

    pub fn indices(&self) -> Option<&[u32]> {
        match self {
            Mesh::Colored(_) => None,
            Mesh::Indexed { indices, .. } => Some(indices),
        }
    }

    pub fn layout(&self) -> wgpu::VertexBufferLayout<'static> {
        match self {
            Mesh::Colored(_) => ColoredVertex::desc(),
            Mesh::Indexed { .. } => Vertex::desc(),
        }
    }

    /// Vertices or indices handed to the draw call.
    pub fn element_count(&self) -> u32 {
        match self {
            Mesh::Colored(vertices) => vertices.len() as u32,
            Mesh::Indexed { indices, .. } => indices.len() as u32,
        }
    }
}

impl From<Octant> for Mesh {
    fn from(octant: Octant) -> Self {
        Mesh::Indexed {
            vertices: octant.vertices,
            indices: octant.indices,
        }
    }
}
