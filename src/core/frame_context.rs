use glam::{EulerRot, Mat4, Quat, Vec3};

use crate::scene::LightRig;

/// Everything a material needs for one frame.
///
/// Built once per frame by the render loop and passed by reference to every
/// material update, so all shaders see identical light state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameContext {
    pub frame: u64,
    /// Seconds since start
    pub time: f32,
    /// Animation time fed to shaders and the light orbit
    pub shader_time: f32,
    pub lights: LightRig,
    pub model: Mat4,
}

/// Placement of the trophy group in the world
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelTransform {
    pub scale: f32,
    pub offset: Vec3,
    pub tilt_x: f32,
    pub rotation_y: f32,
}

impl ModelTransform {
    pub fn trophy() -> Self {
        Self {
            scale: 0.8,
            offset: Vec3::new(-0.03, -0.1, 0.0),
            tilt_x: 5.0_f32.to_radians(),
            rotation_y: 0.0,
        }
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_euler(EulerRot::XYZ, self.tilt_x, self.rotation_y, 0.0),
            self.offset,
        )
    }
}

impl Default for ModelTransform {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset: Vec3::ZERO,
            tilt_x: 0.0,
            rotation_y: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform() {
        assert!(ModelTransform::default().matrix().abs_diff_eq(Mat4::IDENTITY, 1e-6));
    }

    #[test]
    fn trophy_transform_scales_and_offsets() {
        let m = ModelTransform::trophy().matrix();
        let origin = m.transform_point3(Vec3::ZERO);
        assert!(origin.abs_diff_eq(Vec3::new(-0.03, -0.1, 0.0), 1e-6));

        let unit = m.transform_vector3(Vec3::X);
        assert!((unit.length() - 0.8).abs() < 1e-5);
    }
}
