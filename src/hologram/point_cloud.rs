use glam::Vec2;

use crate::camera::PerspectiveCamera;
use crate::types::HologramUniform;

pub const FRAME_WIDTH: u32 = 320;
pub const FRAME_HEIGHT: u32 = 240;
pub const NEAR_CLIPPING: f32 = 850.0;
pub const FAR_CLIPPING: f32 = 4000.0;
pub const X_TO_Z: f32 = 1.11146;
pub const Y_TO_Z: f32 = 0.83359;
pub const Z_OFFSET: f32 = 1000.0;
pub const POINT_SIZE: f32 = 6.0;

/// One point of the cloud: its integer grid coordinate, stored as floats
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GridPoint {
    pub grid: [f32; 2],
}

impl GridPoint {
    /// Stepped per instance; the six quad corners come from the vertex index
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GridPoint>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Row-major grid, x fastest
pub fn grid(width: u32, height: u32) -> Vec<GridPoint> {
    (0..width * height)
        .map(|j| GridPoint {
            grid: [(j % width) as f32, (j / width) as f32],
        })
        .collect()
}

/// Projection of the depth feed into world space. The vertex stage reads
/// all of these through [`HologramUniform`] and hardcodes none of them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HologramParams {
    pub width: u32,
    pub height: u32,
    pub near: f32,
    pub far: f32,
    pub point_size: f32,
    pub z_offset: f32,
    /// Horizontal spread per unit of depth
    pub x_to_z: f32,
    pub y_to_z: f32,
}

impl Default for HologramParams {
    fn default() -> Self {
        Self {
            width: FRAME_WIDTH,
            height: FRAME_HEIGHT,
            near: NEAR_CLIPPING,
            far: FAR_CLIPPING,
            point_size: POINT_SIZE,
            z_offset: Z_OFFSET,
            x_to_z: X_TO_Z,
            y_to_z: Y_TO_Z,
        }
    }
}

impl HologramParams {
    pub fn point_count(&self) -> u32 {
        self.width * self.height
    }

    pub fn frame_size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    pub fn uniform(&self, camera: &PerspectiveCamera, viewport: Vec2) -> HologramUniform {
        HologramUniform {
            view_proj: camera.view_projection().to_cols_array_2d(),
            frame_size: self.frame_size().to_array(),
            viewport: viewport.to_array(),
            near: self.near,
            far: self.far,
            point_size: self.point_size,
            z_offset: self.z_offset,
            x_to_z: self.x_to_z,
            y_to_z: self.y_to_z,
            _pad: [0.0; 2],
        }
    }
}
