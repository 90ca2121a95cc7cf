use glam::{Mat4, Vec3};

use crate::core::FrameContext;

/// Shared light state, written once per frame and bound into every
/// trophy material
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightsUniform {
    pub l1_position: [f32; 3],
    pub time: f32,
    pub l2_position: [f32; 3],
    pub _pad0: f32,
    pub l1_color: [f32; 3],
    pub _pad1: f32,
    pub l2_color: [f32; 3],
    pub _pad2: f32,
}

impl LightsUniform {
    pub fn from_frame(ctx: &FrameContext) -> Self {
        let [l1, l2] = &ctx.lights.lights;
        Self {
            l1_position: l1.position.to_array(),
            time: ctx.shader_time,
            l2_position: l2.position.to_array(),
            _pad0: 0.0,
            l1_color: l1.color.to_array(),
            _pad1: 0.0,
            l2_color: l2.color.to_array(),
            _pad2: 0.0,
        }
    }
}

/// Camera uniform buffer data for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 3],
    pub _pad0: f32,
}

impl CameraUniform {
    pub fn new(view_proj: Mat4, position: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            position: position.to_array(),
            _pad0: 0.0,
        }
    }
}

/// Per-mesh transforms. The inverse brings world-space lights into model space.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ModelUniform {
    pub model: [[f32; 4]; 4],
    pub inverse_model: [[f32; 4]; 4],
    pub normal_matrix: [[f32; 4]; 4],
}

impl ModelUniform {
    pub fn new(model: Mat4) -> Self {
        let inverse = model.inverse();
        Self {
            model: model.to_cols_array_2d(),
            inverse_model: inverse.to_cols_array_2d(),
            normal_matrix: inverse.transpose().to_cols_array_2d(),
        }
    }
}

/// Point cloud projection parameters. Every constant the vertex stage
/// needs arrives through this block.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct HologramUniform {
    pub view_proj: [[f32; 4]; 4],
    pub frame_size: [f32; 2],
    pub viewport: [f32; 2],
    pub near: f32,
    pub far: f32,
    pub point_size: f32,
    pub z_offset: f32,
    pub x_to_z: f32,
    pub y_to_z: f32,
    pub _pad: [f32; 2],
}

// Layouts must match the WGSL structs byte for byte
const _: () = assert!(std::mem::size_of::<LightsUniform>() == 64);
const _: () = assert!(std::mem::size_of::<CameraUniform>() == 80);
const _: () = assert!(std::mem::size_of::<ModelUniform>() == 192);
const _: () = assert!(std::mem::size_of::<HologramUniform>() == 112);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_uniform_inverse_round_trips() {
        let model = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0)) * Mat4::from_scale(Vec3::splat(0.8));
        let u = ModelUniform::new(model);
        let product = Mat4::from_cols_array_2d(&u.model) * Mat4::from_cols_array_2d(&u.inverse_model);
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }

    #[test]
    fn camera_uniform_keeps_position() {
        let u = CameraUniform::new(Mat4::IDENTITY, Vec3::new(0.0, 0.5, 5.0));
        assert_eq!(u.position, [0.0, 0.5, 5.0]);
    }
}
