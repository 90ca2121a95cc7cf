use image::imageops::{self, FilterType};
use image::RgbaImage;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::traits::DepthFeed;

const FRAME_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

#[derive(Debug, Error)]
pub enum SequenceError {
    #[error("failed to list frames in {path:?}")]
    Listing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode frame {path:?}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("no frames found")]
    Empty,
    #[error("frame rate must be positive, got {0}")]
    BadFrameRate(f32),
}

/// Looping playback of pre-extracted video frames. Every frame is resampled
/// to the feed size once, at load.
#[derive(Debug, Clone)]
pub struct FrameSequenceFeed {
    width: u32,
    height: u32,
    fps: f32,
    frames: Vec<RgbaImage>,
}

impl FrameSequenceFeed {
    pub fn from_frames(frames: Vec<RgbaImage>, width: u32, height: u32, fps: f32) -> Result<Self, SequenceError> {
        if fps.is_nan() || fps <= 0.0 {
            return Err(SequenceError::BadFrameRate(fps));
        }
        if frames.is_empty() {
            return Err(SequenceError::Empty);
        }

        let frames = frames
            .into_iter()
            .map(|frame| {
                if frame.dimensions() == (width, height) {
                    frame
                } else {
                    imageops::resize(&frame, width, height, FilterType::Triangle)
                }
            })
            .collect();

        Ok(Self {
            width,
            height,
            fps,
            frames,
        })
    }

    /// Load every png/jpeg in `dir`, ordered by file name
    pub fn open(dir: impl AsRef<Path>, width: u32, height: u32, fps: f32) -> Result<Self, SequenceError> {
        let paths = frame_paths(dir.as_ref())?;
        log::info!("loading {} hologram frames from {:?}", paths.len(), dir.as_ref());

        let frames = paths
            .into_iter()
            .map(|path| match image::open(&path) {
                Ok(img) => Ok(img.to_rgba8()),
                Err(source) => Err(SequenceError::Decode { path, source }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Self::from_frames(frames, width, height, fps)
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    fn index_at(&self, t: f32) -> usize {
        let n = (t.max(0.0) * self.fps) as usize;
        n % self.frames.len()
    }
}

fn frame_paths(dir: &Path) -> Result<Vec<PathBuf>, SequenceError> {
    let listing = |source| SequenceError::Listing {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(listing)? {
        let path = entry.map_err(listing)?.path();
        let is_frame = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| FRAME_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
        if is_frame {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths)
}

impl DepthFeed for FrameSequenceFeed {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame(&mut self, t: f32, rgba: &mut [u8]) {
        let src = self.frames[self.index_at(t)].as_raw();
        let n = src.len().min(rgba.len());
        rgba[..n].copy_from_slice(&src[..n]);
    }
}
