pub mod camera;
pub mod cli;
pub mod config;
pub mod contact;
pub mod core;
pub mod geometry;
pub mod gpu;
pub mod hologram;
pub mod loaders;
pub mod math;
pub mod scene;
pub mod shaders;
pub mod traits;
pub mod types;

pub use config::ShowcaseConfig;
pub use core::{Showcase, ShowcaseOptions};
