use std::cell::Cell;
use std::rc::Rc;

use trophy_showcase::core::{
    FrameContext, FrameOutcome, LoopSettings, Mount, Phase, RenderLoop, WindowDimensions,
};
use trophy_showcase::traits::{RenderError, RenderTarget};

/// Mock target counting every call the loop makes into it
#[derive(Default)]
struct CountingTarget {
    renders: usize,
    resizes: Vec<WindowDimensions>,
    restores: usize,
    disposals: Rc<Cell<usize>>,
    lose_context: bool,
}

impl RenderTarget for CountingTarget {
    fn resize(&mut self, dimensions: WindowDimensions) {
        self.resizes.push(dimensions);
    }

    fn render(&mut self, _ctx: &FrameContext) -> Result<(), RenderError> {
        if self.lose_context {
            return Err(RenderError::ContextLost);
        }
        self.renders += 1;
        Ok(())
    }

    fn restore(&mut self) -> Result<(), RenderError> {
        self.restores += 1;
        self.lose_context = false;
        Ok(())
    }

    fn dispose(&mut self) {
        self.disposals.set(self.disposals.get() + 1);
    }
}

fn uncapped() -> Mount<CountingTarget> {
    Mount::start(CountingTarget::default(), WindowDimensions::new(800, 600), LoopSettings::hologram())
}

// ============================================================================
// Visibility
// ============================================================================

#[test]
fn test_hidden_mount_does_not_render() {
    let mut mount = uncapped();
    mount.set_visible(false);

    for i in 0..20 {
        assert_eq!(mount.frame(i as f32 * 0.1), FrameOutcome::SkippedHidden);
    }
    assert_eq!(mount.target().renders, 0);

    mount.set_visible(true);
    assert_eq!(mount.frame(2.0), FrameOutcome::Rendered);
    assert_eq!(mount.target().renders, 1);
}

// ============================================================================
// Resize Debounce
// ============================================================================

#[test]
fn test_resize_burst_applies_once() {
    let mut mount = uncapped();
    let initial = mount.target().resizes.len();

    // ten events 5 ms apart
    for i in 0..10 {
        let now = i as f32 * 0.005;
        mount.request_resize(WindowDimensions::new(800 + i, 600), now);
        mount.frame(now);
    }
    assert_eq!(mount.target().resizes.len(), initial);

    mount.frame(0.3);
    mount.frame(0.4);
    assert_eq!(mount.target().resizes.len(), initial + 1);
    assert_eq!(mount.target().resizes.last(), Some(&WindowDimensions::new(809, 600)));
    assert_eq!(mount.state().resizes_applied, 1);
}

#[test]
fn test_resize_applies_while_hidden() {
    let mut mount = uncapped();
    mount.set_visible(false);
    mount.request_resize(WindowDimensions::new(100, 100), 0.0);
    mount.frame(1.0);
    assert_eq!(mount.target().resizes.last(), Some(&WindowDimensions::new(100, 100)));
    assert_eq!(mount.target().renders, 0);
}

#[test]
fn test_pending_resize_is_dropped_on_teardown() {
    let mut mount = uncapped();
    let initial = mount.target().resizes.len();
    mount.request_resize(WindowDimensions::new(100, 100), 0.0);
    mount.teardown();
    mount.frame(1.0);
    assert_eq!(mount.target().resizes.len(), initial);
}

// ============================================================================
// Teardown
// ============================================================================

#[test]
fn test_started_mount_is_rendering() {
    let mount = uncapped();
    assert_eq!(mount.phase(), Phase::Rendering);
}

#[test]
fn test_teardown_twice_disposes_once() {
    let mut mount = uncapped();
    let disposals = mount.target().disposals.clone();
    mount.frame(0.0);

    mount.teardown();
    mount.teardown();
    assert_eq!(disposals.get(), 1);
    assert_eq!(mount.phase(), Phase::Disposed);
    assert_eq!(mount.frame(1.0), FrameOutcome::Stopped);

    drop(mount);
    assert_eq!(disposals.get(), 1);
}

#[test]
fn test_drop_tears_down() {
    let mount = uncapped();
    let disposals = mount.target().disposals.clone();
    drop(mount);
    assert_eq!(disposals.get(), 1);
}

// ============================================================================
// Context Loss
// ============================================================================

#[test]
fn test_context_loss_suspends_until_restored() {
    let mut mount = uncapped();
    assert_eq!(mount.frame(0.0), FrameOutcome::Rendered);

    mount.target_mut().lose_context = true;
    assert_eq!(mount.frame(0.1), FrameOutcome::SkippedContextLost);
    assert!(mount.state().context_lost);
    assert_eq!(mount.frame(0.2), FrameOutcome::SkippedContextLost);

    mount.on_context_restored();
    assert_eq!(mount.target().restores, 1);
    assert!(!mount.state().context_lost);
    assert_eq!(mount.frame(0.3), FrameOutcome::Rendered);
    assert_eq!(mount.target().renders, 2);
}

#[test]
fn test_host_reported_loss() {
    let mut mount = uncapped();
    mount.on_context_lost();
    assert_eq!(mount.frame(0.0), FrameOutcome::SkippedContextLost);
    assert_eq!(mount.target().renders, 0);
}

/// Mock surface that reports itself outdated while its configured size
/// trails the window size
struct SurfaceLike {
    configured: WindowDimensions,
    window: WindowDimensions,
    renders: usize,
}

impl RenderTarget for SurfaceLike {
    fn resize(&mut self, dimensions: WindowDimensions) {
        self.configured = dimensions;
    }

    fn render(&mut self, _ctx: &FrameContext) -> Result<(), RenderError> {
        if self.configured != self.window {
            return Err(RenderError::Outdated);
        }
        self.renders += 1;
        Ok(())
    }

    fn dispose(&mut self) {}
}

#[test]
fn test_outdated_surface_recovers_after_debounced_resize() {
    let start = WindowDimensions::new(800, 600);
    let target = SurfaceLike { configured: start, window: start, renders: 0 };
    let mut mount = Mount::start(target, start, LoopSettings::hologram());
    assert_eq!(mount.frame(0.0), FrameOutcome::Rendered);

    // window grows; the surface is stale until the quiet period ends
    let grown = WindowDimensions::new(1024, 768);
    mount.target_mut().window = grown;
    mount.request_resize(grown, 0.01);
    assert_eq!(mount.frame(0.02), FrameOutcome::SkippedOutdated);
    assert!(!mount.state().context_lost);

    let mut outcomes = Vec::new();
    for i in 0..200 {
        outcomes.push(mount.frame(0.2 + i as f32 * 0.01));
    }
    assert_eq!(mount.target().configured, grown);
    assert!(!mount.state().context_lost);
    assert!(outcomes.iter().all(|o| *o == FrameOutcome::Rendered));
    assert_eq!(mount.target().renders, 201);
}

// ============================================================================
// Frame Cap
// ============================================================================

#[test]
fn test_trophy_loop_caps_at_45_fps() {
    let mut lp = RenderLoop::new(LoopSettings::trophy());
    let mut target = CountingTarget::default();

    // 240 Hz host for one second
    for i in 0..240 {
        lp.tick(i as f32 / 240.0, &mut target);
    }
    assert!(target.renders <= 46, "rendered {}", target.renders);
    assert!(target.renders >= 30, "rendered {}", target.renders);
}
