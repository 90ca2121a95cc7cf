pub mod depth_feed;
pub mod render_target;

pub use depth_feed::*;
pub use render_target::*;
