pub mod gltf;

pub use self::gltf::{load_source_meshes, spawn_load};
