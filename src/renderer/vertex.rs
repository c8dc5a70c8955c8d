//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position (canvas pixels) and color
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

/// Same color with a different alpha
#[inline]
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Colors for game elements
pub mod colors {
    pub const PLAYER_NEUTRAL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const PLAYER_FACE: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const SHIELD_RING: [f32; 4] = [1.0, 1.0, 0.0, 0.8];
    pub const MAGNET_RING: [f32; 4] = [1.0, 0.0, 1.0, 0.3];
    pub const PLATFORM: [f32; 4] = [0.29, 0.29, 0.29, 1.0];
    pub const PLATFORM_MOVING: [f32; 4] = [0.4, 0.4, 0.55, 1.0];
    pub const PLATFORM_EDGE: [f32; 4] = [0.53, 0.53, 0.53, 1.0];
    pub const GRID: [f32; 4] = [1.0, 1.0, 1.0, 0.05];
    pub const TARGET_BORDER: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const LIFE_ICON: [f32; 4] = [1.0, 0.27, 0.27, 1.0];
    pub const PROGRESS_TRACK: [f32; 4] = [1.0, 1.0, 1.0, 0.15];
    pub const PROGRESS_FILL: [f32; 4] = [0.3, 0.9, 0.5, 0.9];
    pub const TOUCH_BUTTON: [f32; 4] = [1.0, 1.0, 1.0, 0.18];
    pub const TOUCH_BUTTON_HELD: [f32; 4] = [1.0, 1.0, 1.0, 0.4];
    pub const TOUCH_GLYPH: [f32; 4] = [1.0, 1.0, 1.0, 0.8];
    pub const POWERUP_SHIELD: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    pub const POWERUP_EXTRA_LIFE: [f32; 4] = [1.0, 0.27, 0.27, 1.0];
    pub const POWERUP_MULTIPLIER: [f32; 4] = [1.0, 0.84, 0.0, 1.0];
    pub const POWERUP_SLOW_MOTION: [f32; 4] = [0.53, 0.81, 0.92, 1.0];
    pub const POWERUP_MAGNET: [f32; 4] = [1.0, 0.0, 1.0, 1.0];
}
