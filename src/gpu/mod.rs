pub mod context;
pub mod hologram;
pub mod mesh;
pub mod trophy;

pub use context::{GpuContext, WindowSurface};
pub use hologram::HologramRenderer;
pub use mesh::{DepthTarget, GpuMesh};
pub use trophy::TrophyRenderer;
