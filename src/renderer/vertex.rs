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

/// `0xRRGGBB` to an RGBA color
pub const fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
    [
        ((rgb >> 16) & 0xff) as f32 / 255.0,
        ((rgb >> 8) & 0xff) as f32 / 255.0,
        (rgb & 0xff) as f32 / 255.0,
        alpha,
    ]
}

/// Same color with alpha multiplied by `factor`
pub fn fade(color: [f32; 4], factor: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * factor]
}

/// Linear blend between two colors
pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Colors for game elements
pub mod colors {
    use super::hex;

    pub const STAR: [f32; 4] = hex(0xffffff, 1.0);

    pub const PLANET_LIGHT: [f32; 4] = hex(0x2e8bc0, 1.0);
    pub const PLANET_DARK: [f32; 4] = hex(0x063c77, 1.0);
    pub const CONTINENT: [f32; 4] = hex(0x159447, 1.0);

    pub const MISSILE_BODY: [f32; 4] = hex(0x555555, 1.0);
    pub const MISSILE_NOSE: [f32; 4] = hex(0xe74c3c, 1.0);
    pub const MISSILE_FIN: [f32; 4] = hex(0x888888, 1.0);

    /// Explosion gradient: center, middle, rim (before alpha scaling)
    pub const EXPLOSION_CENTER: [f32; 4] = hex(0xffffc8, 0.8);
    pub const EXPLOSION_MID: [f32; 4] = hex(0xff8c00, 0.5);
    pub const EXPLOSION_RIM: [f32; 4] = hex(0xff4500, 0.0);
    pub const EXPLOSION_CORE: [f32; 4] = hex(0xffffff, 0.6);
}
