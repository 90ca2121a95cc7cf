use crate::geometry::{
    bounds_of, fragment, merge, solidify, FragmentOptions, FragmentVertex, GeometryError,
    Normalization, SolidVertex, SourceMesh,
};
use crate::math::{FragmentRng, AABB};

use super::barrier::Settled;

pub const DEFAULT_TARGET_SIZE: f32 = 3.0;

#[derive(Debug, Clone, Copy)]
pub struct AssemblyOptions {
    pub fragment: FragmentOptions,
    /// Length the largest axis of the combined model is scaled to
    pub target_size: f32,
}

impl Default for AssemblyOptions {
    fn default() -> Self {
        Self {
            fragment: FragmentOptions::default(),
            target_size: DEFAULT_TARGET_SIZE,
        }
    }
}

/// Body and plinth merged into one buffer each, in a shared normalized frame
#[derive(Debug, Clone)]
pub struct MergedSceneMesh {
    pub body: Option<Vec<FragmentVertex>>,
    pub plinth: Option<Vec<SolidVertex>>,
    pub normalization: Normalization,
    /// Bounds of the union after normalization
    pub bounds: AABB,
}

impl MergedSceneMesh {
    pub fn body_vertex_count(&self) -> usize {
        self.body.as_ref().map_or(0, Vec::len)
    }

    pub fn plinth_vertex_count(&self) -> usize {
        self.plinth.as_ref().map_or(0, Vec::len)
    }
}

fn fragment_body(
    meshes: Vec<SourceMesh>,
    options: &FragmentOptions,
    rng: &mut FragmentRng,
) -> Result<Vec<FragmentVertex>, GeometryError> {
    let parts = meshes
        .into_iter()
        .map(|mesh| {
            fragment(mesh, options, rng).map(|geo| {
                log::debug!("{} fragments, {} faces", geo.fragment_count(), geo.face_count());
                geo.into_vertices()
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(merge(parts))
}

fn solidify_plinth(meshes: Vec<SourceMesh>) -> Result<Vec<SolidVertex>, GeometryError> {
    let parts = meshes.into_iter().map(solidify).collect::<Result<Vec<_>, _>>()?;
    Ok(merge(parts))
}

/// Keep a category only if it produced geometry; log and drop it otherwise
fn keep_category<V>(name: &str, result: Option<Result<Vec<V>, GeometryError>>) -> Option<Vec<V>> {
    match result? {
        Ok(vertices) if !vertices.is_empty() => Some(vertices),
        Ok(_) => {
            log::warn!("{} asset contained no triangles", name);
            None
        }
        Err(e) => {
            log::error!("{} geometry rejected: {}", name, e);
            None
        }
    }
}

/// Build the merged scene once both loads have settled.
///
/// Returns `None` when neither category produced geometry.
pub fn assemble(
    settled: Settled<Vec<SourceMesh>>,
    options: &AssemblyOptions,
    rng: &mut FragmentRng,
) -> Option<MergedSceneMesh> {
    let body = keep_category(
        "body",
        settled.body.map(|meshes| fragment_body(meshes, &options.fragment, rng)),
    );
    let plinth = keep_category("plinth", settled.plinth.map(solidify_plinth));

    let combined = [
        body.as_deref().and_then(bounds_of),
        plinth.as_deref().and_then(bounds_of),
    ]
    .into_iter()
    .flatten()
    .reduce(|a, b| a.union(&b))?;

    let normalization = Normalization::fit(&combined, options.target_size);

    let mut body = body;
    let mut plinth = plinth;
    if let Some(vertices) = body.as_mut() {
        normalization.apply(vertices);
    }
    if let Some(vertices) = plinth.as_mut() {
        normalization.apply(vertices);
    }

    let bounds = AABB::new(
        normalization.apply_point(combined.min),
        normalization.apply_point(combined.max),
    );

    let scene = MergedSceneMesh {
        body,
        plinth,
        normalization,
        bounds,
    };
    log::info!(
        "Assembled trophy: {} body vertices, {} plinth vertices, scale {:.4}",
        scene.body_vertex_count(),
        scene.plinth_vertex_count(),
        normalization.scale
    );
    Some(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn triangle(offset: Vec3, size: f32) -> SourceMesh {
        SourceMesh::new(vec![
            offset,
            offset + Vec3::new(size, 0.0, 0.0),
            offset + Vec3::new(0.0, size, 0.0),
        ])
    }

    #[test]
    fn failed_body_keeps_plinth() {
        let settled = Settled {
            body: None,
            plinth: Some(vec![triangle(Vec3::ZERO, 2.0)]),
        };
        let scene = assemble(settled, &AssemblyOptions::default(), &mut FragmentRng::new(1)).unwrap();
        assert!(scene.body.is_none());
        assert_eq!(scene.plinth_vertex_count(), 3);
    }

    #[test]
    fn nothing_loaded_yields_nothing() {
        let settled: Settled<Vec<SourceMesh>> = Settled { body: None, plinth: None };
        assert!(assemble(settled, &AssemblyOptions::default(), &mut FragmentRng::new(1)).is_none());
    }

    #[test]
    fn empty_category_is_dropped() {
        let settled = Settled {
            body: Some(vec![SourceMesh::new(vec![Vec3::ZERO])]),
            plinth: Some(vec![triangle(Vec3::ZERO, 1.0)]),
        };
        let scene = assemble(settled, &AssemblyOptions::default(), &mut FragmentRng::new(1)).unwrap();
        assert!(scene.body.is_none());
        assert!(scene.plinth.is_some());
    }
}
