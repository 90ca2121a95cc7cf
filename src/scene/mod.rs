pub mod assembly;
pub mod barrier;
pub mod lights;

pub use assembly::{assemble, AssemblyOptions, MergedSceneMesh, DEFAULT_TARGET_SIZE};
pub use barrier::{AssetBarrier, AssetKind, AssetSender, Settled};
pub use lights::{hex_color, Light, LightRig, DEFAULT_ORBIT_RADIUS};
