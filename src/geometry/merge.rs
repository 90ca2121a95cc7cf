use glam::Vec3;

use super::{FragmentVertex, SolidVertex};
use crate::math::AABB;

/// Vertex types whose position can be read and rewritten in place
pub trait Positioned {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, p: Vec3);
}

impl Positioned for FragmentVertex {
    fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    fn set_position(&mut self, p: Vec3) {
        self.position = p.to_array();
    }
}

impl Positioned for SolidVertex {
    fn position(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    fn set_position(&mut self, p: Vec3) {
        self.position = p.to_array();
    }
}

pub fn bounds_of<V: Positioned>(vertices: &[V]) -> Option<AABB> {
    AABB::from_points(vertices.iter().map(Positioned::position))
}

/// Concatenate per-asset vertex lists into one buffer (one draw call)
pub fn merge<V>(parts: Vec<Vec<V>>) -> Vec<V> {
    let total = parts.iter().map(Vec::len).sum();
    parts.into_iter().fold(Vec::with_capacity(total), |mut acc, mut part| {
        acc.append(&mut part);
        acc
    })
}

/// Uniform scale and translation fitting a bounding box into a target size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub scale: f32,
    pub translation: Vec3,
}

impl Normalization {
    /// Largest axis of `bounds` maps to `target_size`, center maps to origin.
    /// A flat or empty box keeps scale 1.
    pub fn fit(bounds: &AABB, target_size: f32) -> Self {
        let extent = bounds.max_extent();
        let scale = if extent > f32::EPSILON { target_size / extent } else { 1.0 };
        Self {
            scale,
            translation: -bounds.center() * scale,
        }
    }

    pub fn apply_point(&self, p: Vec3) -> Vec3 {
        p * self.scale + self.translation
    }

    /// Bake the transform into vertex positions. Normals are unaffected by a
    /// uniform scale and translation.
    pub fn apply<V: Positioned>(&self, vertices: &mut [V]) {
        for v in vertices {
            let p = self.apply_point(v.position());
            v.set_position(p);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_concatenates_in_order() {
        let merged = merge(vec![vec![1, 2], vec![], vec![3]]);
        assert_eq!(merged, vec![1, 2, 3]);
    }

    #[test]
    fn fit_maps_largest_axis_to_target() {
        let bounds = AABB::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 6.0, 1.0));
        let n = Normalization::fit(&bounds, 3.0);
        assert!((n.scale - 0.5).abs() < 1e-6);

        let min = n.apply_point(bounds.min);
        let max = n.apply_point(bounds.max);
        assert!(((max - min).max_element() - 3.0).abs() < 1e-5);
        assert!(((min + max) * 0.5).length() < 1e-5);
    }

    #[test]
    fn fit_degenerate_box_keeps_unit_scale() {
        let p = Vec3::new(4.0, 4.0, 4.0);
        let n = Normalization::fit(&AABB::new(p, p), 3.0);
        assert_eq!(n.scale, 1.0);
        assert_eq!(n.apply_point(p), Vec3::ZERO);
    }

    #[test]
    fn apply_rewrites_positions() {
        let mut verts = vec![SolidVertex::new(Vec3::new(2.0, 0.0, 0.0), Vec3::Y)];
        let n = Normalization { scale: 2.0, translation: Vec3::new(0.0, 1.0, 0.0) };
        n.apply(&mut verts);
        assert_eq!(verts[0].position, [4.0, 1.0, 0.0]);
        assert_eq!(verts[0].normal, [0.0, 1.0, 0.0]);
    }
}
