pub mod clock;
pub mod frame_context;
pub mod lifecycle;
pub mod render_loop;
pub mod resources;
pub mod showcase;
pub mod timer;
pub mod window;

pub use clock::Clock;
pub use frame_context::{FrameContext, ModelTransform};
pub use lifecycle::{Lifecycle, LifecycleError, Phase};
pub use render_loop::{
    FrameOutcome, LoopSettings, RenderLoop, RenderState, DEFAULT_MAX_FPS, DEFAULT_RESIZE_DEBOUNCE,
    DEFAULT_ROTATION_SPEED,
};
pub use resources::{Dispose, ResourceSlot};
pub use showcase::{Mount, Showcase, ShowcaseOptions};
pub use timer::{Debounce, FrameCap};
pub use window::WindowDimensions;
