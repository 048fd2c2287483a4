//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY_TOP: [f32; 4] = [0.439, 0.773, 0.808, 1.0]; // #70c5ce
    pub const SKY_BOTTOM: [f32; 4] = [0.878, 0.969, 0.980, 1.0]; // #e0f7fa
    pub const GROUND: [f32; 4] = [0.875, 0.910, 0.631, 1.0]; // #dfe8a1
    pub const GRASS: [f32; 4] = [0.596, 0.765, 0.475, 1.0]; // #98c379
    pub const PIPE: [f32; 4] = [0.180, 0.800, 0.443, 1.0]; // #2ecc71
    pub const PIPE_LIP: [f32; 4] = [0.153, 0.682, 0.376, 1.0]; // #27ae60
    pub const BIRD_BODY: [f32; 4] = [1.0, 0.8, 0.0, 1.0]; // #ffcc00
    pub const BIRD_WING: [f32; 4] = [1.0, 0.847, 0.302, 1.0]; // #ffd84d
    pub const BIRD_EYE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BIRD_PUPIL: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const BIRD_BEAK: [f32; 4] = [1.0, 0.561, 0.0, 1.0]; // #ff8f00
    /// Dimming behind menu / game over / pause overlays
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.35];
    pub const BACKGROUND: [f32; 4] = [0.02, 0.02, 0.05, 1.0];
}
