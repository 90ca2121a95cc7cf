use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use std::path::{Path, PathBuf};
use std::thread;

use crate::geometry::SourceMesh;
use crate::scene::{AssetKind, AssetSender};

/// Loads every mesh primitive of a glTF/GLB file as a [`SourceMesh`], with the
/// node's world transform baked into its positions.
pub fn load_source_meshes(path: impl AsRef<Path>) -> Result<Vec<SourceMesh>> {
    let path = path.as_ref();
    log::info!("Loading glTF file: {:?}", path);

    let (gltf, buffers, _images) =
        gltf::import(path).context(format!("Failed to load glTF file: {:?}", path))?;

    log::debug!(
        "glTF loaded: {} scenes, {} nodes, {} meshes",
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count()
    );

    let mut meshes = Vec::new();

    // Only the default scene; files with several scenes would otherwise duplicate geometry
    if let Some(scene) = gltf.default_scene().or_else(|| gltf.scenes().next()) {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut meshes)?;
        }
    }

    let triangles: usize = meshes.iter().map(SourceMesh::triangle_count).sum();
    log::info!(
        "Extracted {} meshes ({} triangles) from {:?}",
        meshes.len(),
        triangles,
        path.file_name().unwrap_or_default()
    );
    Ok(meshes)
}

/// Recursively processes glTF nodes
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    meshes: &mut Vec<SourceMesh>,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    if let Some(mesh) = node.mesh() {
        process_mesh(&mesh, buffers, &global_transform, meshes)?;
    }

    for child in node.children() {
        process_node(&child, buffers, &global_transform, meshes)?;
    }

    Ok(())
}

fn process_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
    meshes: &mut Vec<SourceMesh>,
) -> Result<()> {
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::warn!("Skipping non-triangle primitive in mesh {:?}", mesh.name());
            continue;
        }

        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let positions: Vec<Vec3> = reader
            .read_positions()
            .context("Mesh primitive has no positions")?
            .map(Vec3::from_array)
            .collect();

        if positions.is_empty() {
            continue;
        }

        let source = match reader.read_indices() {
            Some(indices) => SourceMesh::indexed(positions, indices.into_u32().collect()),
            None => SourceMesh::new(positions),
        };
        meshes.push(source.transformed(transform));
    }

    Ok(())
}

/// Load an asset on its own thread and report through `sender`.
///
/// The thread only parses the file; it never touches scene or GPU state.
pub fn spawn_load(
    kind: AssetKind,
    path: impl Into<PathBuf>,
    sender: AssetSender<Vec<SourceMesh>>,
) -> Result<thread::JoinHandle<()>> {
    let path = path.into();
    thread::Builder::new()
        .name(format!("{}-loader", kind))
        .spawn(move || {
            let result = load_source_meshes(&path).with_context(|| format!("{} asset", kind));
            if sender.send(result).is_err() {
                log::debug!("{} load finished after teardown, result dropped", kind);
            }
        })
        .context(format!("Failed to spawn {} loader thread", kind))
}
