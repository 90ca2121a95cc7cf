mod aabb;
mod rng;

pub use aabb::AABB;
pub use rng::FragmentRng;
