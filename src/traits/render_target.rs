use crate::core::{FrameContext, WindowDimensions};
use crate::scene::MergedSceneMesh;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The surface was invalidated; draw calls are suspended until restore
    #[error("rendering context lost")]
    ContextLost,
    /// The surface no longer matches the window; it was reconfigured and
    /// only this frame is dropped
    #[error("surface outdated")]
    Outdated,
    #[error("surface timed out")]
    Timeout,
    #[error("render failed: {0}")]
    Other(String),
}

/// Anything the render loop can drive once per frame
pub trait RenderTarget {
    /// Apply a debounced surface size (camera aspect and surface config)
    fn resize(&mut self, dimensions: WindowDimensions);

    /// Write per-frame uniforms and submit one frame
    fn render(&mut self, ctx: &FrameContext) -> Result<(), RenderError>;

    /// Reconfigure the surface after a context restore
    fn restore(&mut self) -> Result<(), RenderError> {
        Ok(())
    }

    /// Release every GPU resource owned by the target
    fn dispose(&mut self);
}

/// Render target that accepts the assembled trophy scene
pub trait TrophyTarget: RenderTarget {
    /// Upload the merged geometry; called once per mount
    fn install(&mut self, mesh: &MergedSceneMesh) -> Result<(), RenderError>;
}
