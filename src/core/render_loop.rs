use super::{Debounce, FrameCap, FrameContext, ModelTransform, WindowDimensions};
use crate::scene::{LightRig, DEFAULT_ORBIT_RADIUS};
use crate::traits::{RenderError, RenderTarget};

pub const DEFAULT_MAX_FPS: f32 = 45.0;
pub const DEFAULT_ROTATION_SPEED: f32 = 0.003;
pub const DEFAULT_RESIZE_DEBOUNCE: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoopSettings {
    /// `0` disables the frame cap
    pub max_fps: f32,
    /// Radians added to the model's Y rotation per rendered frame
    pub rotation_speed: f32,
    pub orbit_radius: f32,
    /// Quiet period in seconds before a resize is applied
    pub resize_debounce: f32,
    pub model: ModelTransform,
}

impl LoopSettings {
    pub fn trophy() -> Self {
        Self {
            max_fps: DEFAULT_MAX_FPS,
            rotation_speed: DEFAULT_ROTATION_SPEED,
            orbit_radius: DEFAULT_ORBIT_RADIUS,
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            model: ModelTransform::trophy(),
        }
    }

    /// Uncapped and static; the point cloud animates through its feed
    pub fn hologram() -> Self {
        Self {
            max_fps: 0.0,
            rotation_speed: 0.0,
            orbit_radius: DEFAULT_ORBIT_RADIUS,
            resize_debounce: DEFAULT_RESIZE_DEBOUNCE,
            model: ModelTransform::default(),
        }
    }
}

impl Default for LoopSettings {
    fn default() -> Self {
        Self::trophy()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderState {
    /// Last tick time in seconds, monotonic
    pub time: f32,
    /// Frames rendered successfully
    pub frame: u64,
    pub visible: bool,
    pub context_lost: bool,
    /// Calls made into `RenderTarget::render`
    pub render_calls: u64,
    pub resizes_applied: u64,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            time: 0.0,
            frame: 0,
            visible: true,
            context_lost: false,
            render_calls: 0,
            resizes_applied: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Rendered,
    SkippedHidden,
    SkippedContextLost,
    /// The surface was reconfigured; the next tick renders normally
    SkippedOutdated,
    Throttled,
    /// The mount has not started yet
    NotStarted,
    Stopped,
    Failed,
}

/// Per-frame driver. The host calls [`RenderLoop::tick`] from its redraw
/// callback and keeps re-arming it; the loop decides whether a frame is
/// actually produced.
#[derive(Debug, Clone)]
pub struct RenderLoop {
    settings: LoopSettings,
    state: RenderState,
    cap: FrameCap,
    resize: Debounce<WindowDimensions>,
    model: ModelTransform,
    lights: LightRig,
    stopped: bool,
}

impl RenderLoop {
    pub fn new(settings: LoopSettings) -> Self {
        Self {
            cap: FrameCap::new(settings.max_fps),
            resize: Debounce::new(settings.resize_debounce),
            model: settings.model,
            lights: LightRig::new(settings.orbit_radius),
            state: RenderState::default(),
            stopped: false,
            settings,
        }
    }

    pub fn settings(&self) -> &LoopSettings {
        &self.settings
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    pub fn model(&self) -> &ModelTransform {
        &self.model
    }

    pub fn set_visible(&mut self, visible: bool) {
        if self.state.visible != visible {
            log::debug!("visibility -> {}", visible);
        }
        self.state.visible = visible;
    }

    /// Restart the resize quiet period with the latest size. Zero sizes are ignored.
    pub fn request_resize(&mut self, dimensions: WindowDimensions, now: f32) {
        if dimensions.is_empty() || self.stopped {
            return;
        }
        self.resize.trigger(dimensions, now);
    }

    pub fn on_context_lost(&mut self) {
        if !self.state.context_lost {
            log::warn!("rendering context lost, suspending draw calls");
        }
        self.state.context_lost = true;
    }

    pub fn on_context_restored(&mut self) {
        if self.state.context_lost {
            log::info!("rendering context restored");
        }
        self.state.context_lost = false;
    }

    /// Cancel the loop and drop any pending resize
    pub fn stop(&mut self) {
        self.stopped = true;
        self.resize.cancel();
    }

    pub fn tick<T: RenderTarget + ?Sized>(&mut self, now: f32, target: &mut T) -> FrameOutcome {
        if self.stopped {
            return FrameOutcome::Stopped;
        }
        self.state.time = now;

        if let Some(dimensions) = self.resize.poll(now) {
            log::debug!("applying resize {}x{}", dimensions.width, dimensions.height);
            target.resize(dimensions);
            self.state.resizes_applied += 1;
        }

        if !self.state.visible {
            return FrameOutcome::SkippedHidden;
        }
        if self.state.context_lost {
            return FrameOutcome::SkippedContextLost;
        }
        if !self.cap.try_fire(now) {
            return FrameOutcome::Throttled;
        }

        let t = now * 0.5;
        self.model.rotation_y += self.settings.rotation_speed;
        self.lights.update(t);

        let ctx = FrameContext {
            frame: self.state.frame,
            time: now,
            shader_time: t,
            lights: self.lights,
            model: self.model.matrix(),
        };

        self.state.render_calls += 1;
        match target.render(&ctx) {
            Ok(()) => {
                self.state.frame += 1;
                FrameOutcome::Rendered
            }
            Err(RenderError::ContextLost) => {
                self.on_context_lost();
                FrameOutcome::SkippedContextLost
            }
            Err(RenderError::Outdated) => {
                log::debug!("surface outdated, frame skipped");
                FrameOutcome::SkippedOutdated
            }
            Err(e) => {
                log::error!("render error: {}", e);
                FrameOutcome::Failed
            }
        }
    }
}
