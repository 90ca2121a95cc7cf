use super::{FrameOutcome, Lifecycle, LoopSettings, Phase, RenderLoop, RenderState, WindowDimensions};
use crate::geometry::SourceMesh;
use crate::math::FragmentRng;
use crate::scene::{assemble, AssemblyOptions, AssetBarrier};
use crate::traits::{RenderTarget, TrophyTarget};

/// A render target driven by a [`RenderLoop`] under a guarded lifecycle.
///
/// Owns the target; [`Mount::teardown`] stops the loop and releases the
/// target's resources exactly once.
pub struct Mount<T: RenderTarget> {
    target: T,
    lifecycle: Lifecycle,
    render_loop: RenderLoop,
}

impl<T: RenderTarget> Mount<T> {
    pub fn new(mut target: T, dimensions: WindowDimensions, settings: LoopSettings) -> Self {
        if !dimensions.is_empty() {
            target.resize(dimensions);
        }
        Self {
            target,
            lifecycle: Lifecycle::new(),
            render_loop: RenderLoop::new(settings),
        }
    }

    /// Mount a target that needs no assets and go straight to rendering
    pub fn start(target: T, dimensions: WindowDimensions, settings: LoopSettings) -> Self {
        let mut mount = Self::new(target, dimensions, settings);
        for phase in [Phase::Loading, Phase::Assembled, Phase::Rendering] {
            mount.advance(phase);
        }
        mount
    }

    pub fn phase(&self) -> Phase {
        self.lifecycle.phase()
    }

    pub fn is_disposed(&self) -> bool {
        self.lifecycle.is_disposed()
    }

    pub fn state(&self) -> &RenderState {
        self.render_loop.state()
    }

    pub fn render_loop(&self) -> &RenderLoop {
        &self.render_loop
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    fn advance(&mut self, to: Phase) {
        if let Err(e) = self.lifecycle.advance(to) {
            log::warn!("{}", e);
        }
    }

    pub fn frame(&mut self, now: f32) -> FrameOutcome {
        match self.lifecycle.phase() {
            Phase::Disposed => FrameOutcome::Stopped,
            phase if phase.draws_frames() => self.render_loop.tick(now, &mut self.target),
            _ => FrameOutcome::NotStarted,
        }
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.render_loop.set_visible(visible);
    }

    pub fn request_resize(&mut self, dimensions: WindowDimensions, now: f32) {
        self.render_loop.request_resize(dimensions, now);
    }

    pub fn on_context_lost(&mut self) {
        self.render_loop.on_context_lost();
    }

    /// Reconfigure the surface; existing GPU resources are kept
    pub fn on_context_restored(&mut self) {
        if self.lifecycle.is_disposed() || !self.render_loop.state().context_lost {
            return;
        }
        match self.target.restore() {
            Ok(()) => self.render_loop.on_context_restored(),
            Err(e) => log::error!("context restore failed: {}", e),
        }
    }

    /// Idempotent: later calls are no-ops
    pub fn teardown(&mut self) {
        if self.lifecycle.is_disposed() {
            return;
        }
        self.render_loop.stop();
        self.target.dispose();
        self.advance(Phase::Disposed);
        log::info!("torn down after {} frames", self.render_loop.state().frame);
    }
}

impl<T: RenderTarget> Drop for Mount<T> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Options consumed once at mount time
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowcaseOptions {
    pub settings: LoopSettings,
    pub assembly: AssemblyOptions,
    /// Fixed fragment seed; entropy-seeded when absent
    pub seed: Option<u64>,
}

/// The mounted trophy: waits on both asset loads, assembles once, then
/// renders until torn down.
pub struct Showcase<T: TrophyTarget> {
    mount: Mount<T>,
    barrier: Option<AssetBarrier<Vec<SourceMesh>>>,
    assembly: AssemblyOptions,
    rng: FragmentRng,
}

impl<T: TrophyTarget> Showcase<T> {
    pub fn start(
        target: T,
        dimensions: WindowDimensions,
        options: ShowcaseOptions,
        barrier: AssetBarrier<Vec<SourceMesh>>,
    ) -> Self {
        let mut mount = Mount::new(target, dimensions, options.settings);
        mount.advance(Phase::Loading);

        let rng = match options.seed {
            Some(seed) => FragmentRng::new(seed),
            None => FragmentRng::from_entropy(),
        };

        Self {
            mount,
            barrier: Some(barrier),
            assembly: options.assembly,
            rng,
        }
    }

    pub fn phase(&self) -> Phase {
        self.mount.phase()
    }

    pub fn state(&self) -> &RenderState {
        self.mount.state()
    }

    pub fn target(&self) -> &T {
        self.mount.target()
    }

    pub fn mount(&self) -> &Mount<T> {
        &self.mount
    }

    /// Run one host frame: settle assets if they are ready, then tick
    pub fn frame(&mut self, now: f32) -> FrameOutcome {
        if self.mount.is_disposed() {
            return FrameOutcome::Stopped;
        }
        self.poll_assets();
        self.mount.frame(now)
    }

    fn poll_assets(&mut self) {
        let Some(settled) = self.barrier.as_mut().and_then(|barrier| barrier.poll()) else {
            return;
        };
        self.barrier = None;

        match assemble(settled, &self.assembly, &mut self.rng) {
            Some(mesh) => {
                if let Err(e) = self.mount.target_mut().install(&mesh) {
                    log::error!("failed to install trophy geometry: {}", e);
                }
            }
            None => log::warn!("no trophy geometry loaded, scene stays empty"),
        }

        self.mount.advance(Phase::Assembled);
        self.mount.advance(Phase::Rendering);
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.mount.set_visible(visible);
    }

    pub fn request_resize(&mut self, dimensions: WindowDimensions, now: f32) {
        self.mount.request_resize(dimensions, now);
    }

    pub fn on_context_lost(&mut self) {
        self.mount.on_context_lost();
    }

    pub fn on_context_restored(&mut self) {
        self.mount.on_context_restored();
    }

    /// Stops the loop, abandons in-flight loads and disposes the target.
    /// Idempotent.
    pub fn teardown(&mut self) {
        self.barrier = None;
        self.mount.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FrameContext;
    use crate::scene::MergedSceneMesh;
    use crate::traits::RenderError;
    use glam::Vec3;

    #[derive(Default)]
    struct StubTarget {
        installs: usize,
        renders: usize,
        disposals: usize,
        restores: usize,
        resizes: Vec<WindowDimensions>,
    }

    impl RenderTarget for StubTarget {
        fn resize(&mut self, dimensions: WindowDimensions) {
            self.resizes.push(dimensions);
        }

        fn render(&mut self, _ctx: &FrameContext) -> Result<(), RenderError> {
            self.renders += 1;
            Ok(())
        }

        fn restore(&mut self) -> Result<(), RenderError> {
            self.restores += 1;
            Ok(())
        }

        fn dispose(&mut self) {
            self.disposals += 1;
        }
    }

    impl TrophyTarget for StubTarget {
        fn install(&mut self, _mesh: &MergedSceneMesh) -> Result<(), RenderError> {
            self.installs += 1;
            Ok(())
        }
    }

    fn triangle() -> Vec<SourceMesh> {
        vec![SourceMesh::new(vec![Vec3::ZERO, Vec3::X, Vec3::Y])]
    }

    fn options() -> ShowcaseOptions {
        ShowcaseOptions {
            settings: LoopSettings::hologram(),
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn initial_size_is_applied_at_mount() {
        let (barrier, _body, _plinth) = AssetBarrier::new();
        let showcase = Showcase::start(StubTarget::default(), WindowDimensions::new(640, 480), options(), barrier);
        assert_eq!(showcase.target().resizes, vec![WindowDimensions::new(640, 480)]);
        assert_eq!(showcase.phase(), Phase::Loading);
    }

    #[test]
    fn assembles_once_after_both_loads() {
        let (barrier, body, plinth) = AssetBarrier::new();
        let mut showcase = Showcase::start(StubTarget::default(), WindowDimensions::new(8, 8), options(), barrier);

        body.send(Ok(triangle())).ok();
        showcase.frame(0.0);
        assert_eq!(showcase.target().installs, 0);

        plinth.send(Ok(triangle())).ok();
        showcase.frame(1.0);
        showcase.frame(2.0);
        assert_eq!(showcase.target().installs, 1);
        assert_eq!(showcase.phase(), Phase::Rendering);
    }

    #[test]
    fn both_failed_leaves_scene_empty() {
        let (barrier, body, plinth) = AssetBarrier::new();
        let mut showcase = Showcase::start(StubTarget::default(), WindowDimensions::new(8, 8), options(), barrier);
        drop(body);
        plinth.send(Err(anyhow::anyhow!("404"))).ok();

        assert_eq!(showcase.frame(0.0), FrameOutcome::Rendered);
        assert_eq!(showcase.target().installs, 0);
        assert_eq!(showcase.phase(), Phase::Rendering);
    }

    #[test]
    fn loads_completing_after_teardown_are_ignored() {
        let (barrier, body, plinth) = AssetBarrier::new();
        let mut showcase = Showcase::start(StubTarget::default(), WindowDimensions::new(8, 8), options(), barrier);
        showcase.teardown();

        assert!(body.send(Ok(triangle())).is_err());
        assert!(plinth.send(Ok(triangle())).is_err());
        assert_eq!(showcase.frame(1.0), FrameOutcome::Stopped);
        assert_eq!(showcase.target().installs, 0);
        assert_eq!(showcase.phase(), Phase::Disposed);

        showcase.teardown();
        assert_eq!(showcase.target().disposals, 1);
        assert_eq!(showcase.target().renders, 0);
    }

    #[test]
    fn unstarted_mount_does_not_render() {
        let mut mount = Mount::new(StubTarget::default(), WindowDimensions::new(8, 8), LoopSettings::hologram());
        assert_eq!(mount.frame(0.0), FrameOutcome::NotStarted);
        assert_eq!(mount.target().renders, 0);

        let mut started = Mount::start(StubTarget::default(), WindowDimensions::new(8, 8), LoopSettings::hologram());
        assert_eq!(started.phase(), Phase::Rendering);
        assert_eq!(started.frame(0.0), FrameOutcome::Rendered);
    }

    #[test]
    fn restore_only_reconfigures_when_lost() {
        let (barrier, _body, _plinth) = AssetBarrier::new();
        let mut showcase = Showcase::start(StubTarget::default(), WindowDimensions::new(8, 8), options(), barrier);

        showcase.on_context_restored();
        assert_eq!(showcase.target().restores, 0);

        showcase.on_context_lost();
        assert_eq!(showcase.frame(0.0), FrameOutcome::SkippedContextLost);
        showcase.on_context_restored();
        assert_eq!(showcase.target().restores, 1);
        assert_eq!(showcase.frame(1.0), FrameOutcome::Rendered);
    }
}
