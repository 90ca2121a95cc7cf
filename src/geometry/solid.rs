use glam::Vec3;

use super::{GeometryError, SourceMesh};

/// Per-vertex data of unfragmented geometry (plinth, light markers)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SolidVertex {
    pub position: [f32; 3],
    pub _pad0: f32,
    pub normal: [f32; 3],
    pub _pad1: f32,
}

impl SolidVertex {
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Self {
            position: position.to_array(),
            _pad0: 0.0,
            normal: normal.to_array(),
            _pad1: 0.0,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 2] = [
            wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x3, offset: 0, shader_location: 0 },
            wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x3, offset: 16, shader_location: 1 },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SolidVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Turn a source mesh into a triangle list with vertex normals.
///
/// Indexed meshes get area-weighted smooth normals shared across the index
/// buffer. Plain triangle lists get one flat normal per face.
pub fn solidify(mesh: SourceMesh) -> Result<Vec<SolidVertex>, GeometryError> {
    match mesh {
        SourceMesh { positions, indices: Some(indices) } => smooth(positions, indices),
        plain => Ok(flat(plain.into_triangle_soup()?)),
    }
}

fn flat(soup: Vec<Vec3>) -> Vec<SolidVertex> {
    soup.chunks_exact(3)
        .flat_map(|tri| {
            let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]).normalize_or_zero();
            tri.iter().map(move |&p| SolidVertex::new(p, n))
        })
        .collect()
}

fn smooth(positions: Vec<Vec3>, indices: Vec<u32>) -> Result<Vec<SolidVertex>, GeometryError> {
    let mut accum = vec![Vec3::ZERO; positions.len()];
    let usable = indices.len() - indices.len() % 3;

    for tri in indices[..usable].chunks_exact(3) {
        let idx = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        for &i in &idx {
            if i >= positions.len() {
                return Err(GeometryError::IndexOutOfRange {
                    index: i as u32,
                    vertex_count: positions.len(),
                });
            }
        }
        let [a, b, c] = idx.map(|i| positions[i]);
        // unnormalized cross product weights by triangle area
        let n = (b - a).cross(c - a);
        for i in idx {
            accum[i] += n;
        }
    }

    Ok(indices[..usable]
        .iter()
        .map(|&i| SolidVertex::new(positions[i as usize], accum[i as usize].normalize_or_zero()))
        .collect())
}
