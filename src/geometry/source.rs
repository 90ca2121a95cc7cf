use glam::{Mat4, Vec3};

use super::GeometryError;

/// Triangulated input mesh as it comes out of an asset file
#[derive(Debug, Clone, Default)]
pub struct SourceMesh {
    pub positions: Vec<Vec3>,
    pub indices: Option<Vec<u32>>,
}

impl SourceMesh {
    pub fn new(positions: Vec<Vec3>) -> Self {
        Self { positions, indices: None }
    }

    pub fn indexed(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self {
            positions,
            indices: Some(indices),
        }
    }

    /// Number of complete triangles, trailing partial triangle excluded
    pub fn triangle_count(&self) -> usize {
        match &self.indices {
            Some(indices) => indices.len() / 3,
            None => self.positions.len() / 3,
        }
    }

    /// Bake a node transform into the positions
    pub fn transformed(mut self, transform: &Mat4) -> Self {
        for p in &mut self.positions {
            *p = transform.transform_point3(*p);
        }
        self
    }

    /// Expand into a plain triangle list. A trailing partial triangle is
    /// dropped before any index is resolved.
    pub fn into_triangle_soup(self) -> Result<Vec<Vec3>, GeometryError> {
        let Self { mut positions, indices } = self;

        let corners = indices.as_ref().map_or(positions.len(), Vec::len);
        let remainder = corners % 3;
        if remainder != 0 {
            log::warn!(
                "Trimming {} trailing vertices that do not form a triangle",
                remainder
            );
        }
        let whole = corners - remainder;

        match indices {
            Some(indices) => indices[..whole]
                .iter()
                .map(|&i| {
                    positions.get(i as usize).copied().ok_or(GeometryError::IndexOutOfRange {
                        index: i,
                        vertex_count: positions.len(),
                    })
                })
                .collect(),
            None => {
                positions.truncate(whole);
                Ok(positions)
            }
        }
    }
}
