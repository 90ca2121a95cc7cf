pub mod feed;
pub mod point_cloud;
pub mod sequence;

pub use feed::{HologramFeed, SyntheticFeed};
pub use point_cloud::{grid, GridPoint, HologramParams, FRAME_HEIGHT, FRAME_WIDTH};
pub use sequence::{FrameSequenceFeed, SequenceError};
