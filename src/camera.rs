use glam::{Mat4, Vec3};

use crate::types::CameraUniform;

/// Look-at perspective camera with a mutable aspect ratio
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveCamera {
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl PerspectiveCamera {
    /// Camera framing the trophy
    pub fn trophy(aspect: f32) -> Self {
        Self {
            fov_y_degrees: 35.0,
            aspect,
            near: 0.1,
            far: 100.0,
            position: Vec3::new(0.0, 0.5, 5.0),
            target: Vec3::ZERO,
        }
    }

    /// Camera looking down the hologram depth axis
    pub fn hologram(aspect: f32) -> Self {
        Self {
            fov_y_degrees: 50.0,
            aspect,
            near: 1.0,
            far: 10_000.0,
            position: Vec3::new(0.0, 0.0, 500.0),
            target: Vec3::new(0.0, 0.0, -1000.0),
        }
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    pub fn to_uniform(&self) -> CameraUniform {
        CameraUniform::new(self.view_projection(), self.position)
    }
}
