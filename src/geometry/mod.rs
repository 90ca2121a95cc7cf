//! CPU-side mesh processing: de-indexing, fragmentation, normals, merging

mod fragment;
mod merge;
mod solid;
mod source;
mod sphere;

pub use fragment::{
    fragment, FragmentGeometry, FragmentOptions, FragmentProfile, FragmentVertex, DEFAULT_SHRINK,
    FRAGMENT_GOLD,
};
pub use merge::{bounds_of, merge, Normalization, Positioned};
pub use solid::{solidify, SolidVertex};
pub use source::SourceMesh;
pub use sphere::uv_sphere;

#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange { index: u32, vertex_count: usize },
}
