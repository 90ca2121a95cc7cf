use glam::Vec3;
use serde::Deserialize;

use super::{GeometryError, SourceMesh};
use crate::math::FragmentRng;

/// Warm gold base color baked into every fragment vertex
pub const FRAGMENT_GOLD: [f32; 3] = [0.82, 0.58, 0.12];

/// Apex depth of the shatter profile relative to the mean edge length
const SHATTER_APEX_RATIO: f32 = 0.5;

pub const DEFAULT_SHRINK: f32 = 0.88;

const BARYCENTRIC: [[f32; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// How a source triangle is turned into a fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FragmentProfile {
    /// Keep the source triangle as-is, 3 vertices per triangle
    Flat,
    /// Tetrahedron per triangle shrunk toward its centroid, 12 vertices per triangle
    #[default]
    Shatter,
}

impl FragmentProfile {
    pub const fn vertices_per_fragment(self) -> usize {
        match self {
            FragmentProfile::Flat => 3,
            FragmentProfile::Shatter => 12,
        }
    }
}

impl std::str::FromStr for FragmentProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "flat" => Ok(FragmentProfile::Flat),
            "shatter" => Ok(FragmentProfile::Shatter),
            other => Err(format!("unknown fragment profile '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FragmentOptions {
    pub profile: FragmentProfile,
    /// Scale toward the fragment centroid, only used by the shatter profile
    pub shrink: f32,
}

impl Default for FragmentOptions {
    fn default() -> Self {
        Self {
            profile: FragmentProfile::default(),
            shrink: DEFAULT_SHRINK,
        }
    }
}

/// Per-vertex data of the fragmented body
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FragmentVertex {
    pub position: [f32; 3],
    pub time: f32,
    pub normal: [f32; 3],
    pub seed: f32,
    pub displace_normal: [f32; 3],
    pub _pad0: f32,
    pub barycentric: [f32; 3],
    pub _pad1: f32,
    pub color: [f32; 3],
    pub _pad2: f32,
}

impl FragmentVertex {
    fn new(position: Vec3, normal: Vec3, displace_normal: Vec3, time: f32, seed: f32, bary: [f32; 3]) -> Self {
        Self {
            position: position.to_array(),
            time,
            normal: normal.to_array(),
            seed,
            displace_normal: displace_normal.to_array(),
            _pad0: 0.0,
            barycentric: bary,
            _pad1: 0.0,
            color: FRAGMENT_GOLD,
            _pad2: 0.0,
        }
    }

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        const ATTRIBUTES: [wgpu::VertexAttribute; 7] = [
            wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x3, offset: 0, shader_location: 0 },
            wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32, offset: 12, shader_location: 1 },
            wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x3, offset: 16, shader_location: 2 },
            wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32, offset: 28, shader_location: 3 },
            wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x3, offset: 32, shader_location: 4 },
            wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x3, offset: 48, shader_location: 5 },
            wgpu::VertexAttribute { format: wgpu::VertexFormat::Float32x3, offset: 64, shader_location: 6 },
        ];

        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FragmentVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRIBUTES,
        }
    }
}

/// Fragmented body geometry, immutable once built
#[derive(Debug, Clone)]
pub struct FragmentGeometry {
    profile: FragmentProfile,
    vertices: Vec<FragmentVertex>,
}

impl FragmentGeometry {
    pub fn profile(&self) -> FragmentProfile {
        self.profile
    }

    pub fn vertices(&self) -> &[FragmentVertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<FragmentVertex> {
        self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn fragment_count(&self) -> usize {
        self.vertices.len() / self.profile.vertices_per_fragment()
    }

    pub fn face_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Vertices grouped by the fragment they belong to
    pub fn fragments(&self) -> impl Iterator<Item = &[FragmentVertex]> {
        self.vertices.chunks_exact(self.profile.vertices_per_fragment())
    }
}

fn face_normal(a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}

/// Fragment a source mesh. The mesh is consumed so its buffers are released.
pub fn fragment(
    mesh: SourceMesh,
    options: &FragmentOptions,
    rng: &mut FragmentRng,
) -> Result<FragmentGeometry, GeometryError> {
    let soup = mesh.into_triangle_soup()?;
    let profile = options.profile;
    let mut vertices = Vec::with_capacity(soup.len() / 3 * profile.vertices_per_fragment());

    for tri in soup.chunks_exact(3) {
        let (v0, v1, v2) = (tri[0], tri[1], tri[2]);
        let n = face_normal(v0, v1, v2);

        let time = rng.next_f32();
        let seed = rng.next_f32();

        match profile {
            FragmentProfile::Flat => {
                for (v, bary) in [v0, v1, v2].into_iter().zip(BARYCENTRIC) {
                    vertices.push(FragmentVertex::new(v, n, n, time, seed, bary));
                }
            }
            FragmentProfile::Shatter => {
                let mean_edge = ((v1 - v0).length() + (v2 - v1).length() + (v0 - v2).length()) / 3.0;
                let centroid = (v0 + v1 + v2) / 3.0;
                let v3 = centroid - n * mean_edge * SHATTER_APEX_RATIO;
                let center = (v0 + v1 + v2 + v3) * 0.25;
                let pull = |v: Vec3| center + (v - center) * options.shrink;

                let faces = [[v0, v1, v2], [v3, v1, v0], [v3, v2, v1], [v3, v0, v2]];
                for face in faces {
                    let shrunk = face.map(pull);
                    let face_n = face_normal(shrunk[0], shrunk[1], shrunk[2]);
                    for (v, bary) in shrunk.into_iter().zip(BARYCENTRIC) {
                        vertices.push(FragmentVertex::new(v, face_n, n, time, seed, bary));
                    }
                }
            }
        }
    }

    Ok(FragmentGeometry { profile, vertices })
}
