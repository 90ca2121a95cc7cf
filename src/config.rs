use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::{LoopSettings, ModelTransform, ShowcaseOptions, DEFAULT_MAX_FPS, DEFAULT_ROTATION_SPEED};
use crate::geometry::{FragmentOptions, FragmentProfile, DEFAULT_SHRINK};
use crate::hologram::{FrameSequenceFeed, HologramFeed, SyntheticFeed, FRAME_HEIGHT, FRAME_WIDTH};
use crate::scene::{AssemblyOptions, DEFAULT_ORBIT_RADIUS, DEFAULT_TARGET_SIZE};

/// Showcase settings, read from a JSON file. Every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShowcaseConfig {
    pub body_asset: PathBuf,
    pub plinth_asset: PathBuf,
    pub target_size: f32,
    pub fragment_profile: FragmentProfile,
    pub shrink: f32,
    /// Fixed seed for reproducible fragments
    pub seed: Option<u64>,
    /// `0` renders every frame
    pub max_fps: f32,
    pub rotation_speed: f32,
    pub orbit_radius: f32,
    pub resize_debounce_ms: u64,
    /// Directory of extracted video frames; the synthetic feed plays when unset
    pub hologram_frames: Option<PathBuf>,
    pub hologram_fps: f32,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            body_asset: PathBuf::from("assets/trophy_body_opt.glb"),
            plinth_asset: PathBuf::from("assets/trophy_plinth_opt.glb"),
            target_size: DEFAULT_TARGET_SIZE,
            fragment_profile: FragmentProfile::default(),
            shrink: DEFAULT_SHRINK,
            seed: None,
            max_fps: DEFAULT_MAX_FPS,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            orbit_radius: DEFAULT_ORBIT_RADIUS,
            resize_debounce_ms: 100,
            hologram_frames: None,
            hologram_fps: 30.0,
        }
    }
}

impl ShowcaseConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).context(format!("Failed to read config file: {:?}", path))?;
        serde_json::from_str(&text).context(format!("Failed to parse config file: {:?}", path))
    }

    pub fn loop_settings(&self) -> LoopSettings {
        LoopSettings {
            max_fps: self.max_fps,
            rotation_speed: self.rotation_speed,
            orbit_radius: self.orbit_radius,
            resize_debounce: self.resize_debounce_ms as f32 / 1000.0,
            model: ModelTransform::trophy(),
        }
    }

    pub fn hologram_feed(&self) -> Result<HologramFeed> {
        let Some(dir) = &self.hologram_frames else {
            return Ok(HologramFeed::Synthetic(SyntheticFeed::new(FRAME_WIDTH, FRAME_HEIGHT)));
        };
        let feed = FrameSequenceFeed::open(dir, FRAME_WIDTH, FRAME_HEIGHT, self.hologram_fps)
            .context(format!("Failed to load hologram frames: {:?}", dir))?;
        log::info!("hologram plays {} frames at {} fps", feed.frame_count(), self.hologram_fps);
        Ok(HologramFeed::Frames(feed))
    }

    pub fn showcase_options(&self) -> ShowcaseOptions {
        ShowcaseOptions {
            settings: self.loop_settings(),
            assembly: AssemblyOptions {
                fragment: FragmentOptions {
                    profile: self.fragment_profile,
                    shrink: self.shrink,
                },
                target_size: self.target_size,
            },
            seed: self.seed,
        }
    }
}
