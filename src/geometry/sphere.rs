use glam::Vec3;
use std::f32::consts::PI;

use super::SolidVertex;

/// UV sphere as a triangle list, used for the light indicators
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Vec<SolidVertex> {
    let width_segments = width_segments.max(3);
    let height_segments = height_segments.max(2);

    let point = |ix: u32, iy: u32| {
        let u = ix as f32 / width_segments as f32;
        let v = iy as f32 / height_segments as f32;
        let theta = u * 2.0 * PI;
        let phi = v * PI;
        Vec3::new(-theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin())
    };

    let mut vertices = Vec::with_capacity((width_segments * height_segments * 6) as usize);
    for iy in 0..height_segments {
        for ix in 0..width_segments {
            let a = point(ix, iy);
            let b = point(ix + 1, iy);
            let c = point(ix + 1, iy + 1);
            let d = point(ix, iy + 1);

            // poles collapse one triangle of each quad
            if iy != 0 {
                for n in [a, d, b] {
                    vertices.push(SolidVertex::new(n * radius, n));
                }
            }
            if iy != height_segments - 1 {
                for n in [b, d, c] {
                    vertices.push(SolidVertex::new(n * radius, n));
                }
            }
        }
    }

    vertices
}
