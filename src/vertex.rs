// Vertex layouts shared with the shaders

/// A bare position, used by the octant grid.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

impl Vertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // posn_obj
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ColoredVertex {
    /// Position of the vertex in x, y, z
    pub position: [f32; 3],
    /// Color of the vertex in r, g, b
    pub color: [f32; 3],
}

impl ColoredVertex {
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ColoredVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                // vPos
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                // vCol, right after the 3 position floats
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Unit-edge triangle centered on its centroid, one primary color per corner.
pub const TRIANGLE: &[ColoredVertex] = &[
    ColoredVertex {
        position: [-0.5, -0.289, 0.0],
        color: [1.0, 0.0, 0.0],
    },
    ColoredVertex {
        position: [0.5, -0.289, 0.0],
        color: [0.0, 1.0, 0.0],
    },
    ColoredVertex {
        position: [0.0, 0.577, 0.0],
        color: [0.0, 0.0, 1.0],
    },
];
