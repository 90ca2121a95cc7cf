#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Loading,
    Assembled,
    Rendering,
    Disposed,
}

impl Phase {
    /// Whether frames may be drawn. Loading draws the empty stage (lights and
    /// markers) while the assets arrive.
    pub fn draws_frames(self) -> bool {
        matches!(self, Phase::Loading | Phase::Assembled | Phase::Rendering)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum LifecycleError {
    #[error("invalid lifecycle transition {from:?} -> {to:?}")]
    InvalidTransition { from: Phase, to: Phase },
}

/// Guarded state machine for a mounted visual
#[derive(Debug, Clone)]
pub struct Lifecycle {
    phase: Phase,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self { phase: Phase::Uninitialized }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_disposed(&self) -> bool {
        self.phase == Phase::Disposed
    }

    fn allowed(from: Phase, to: Phase) -> bool {
        use Phase::*;
        matches!(
            (from, to),
            (Uninitialized, Loading) | (Loading, Assembled) | (Assembled, Rendering)
        ) || (to == Disposed && from != Disposed)
    }

    pub fn advance(&mut self, to: Phase) -> Result<Phase, LifecycleError> {
        if !Self::allowed(self.phase, to) {
            return Err(LifecycleError::InvalidTransition { from: self.phase, to });
        }
        log::debug!("lifecycle {:?} -> {:?}", self.phase, to);
        self.phase = to;
        Ok(to)
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn happy_path() {
        let mut lc = Lifecycle::new();
        for phase in [Phase::Loading, Phase::Assembled, Phase::Rendering, Phase::Disposed] {
            assert_eq!(lc.advance(phase), Ok(phase));
        }
        assert!(lc.is_disposed());
    }

    #[test]
    fn cannot_skip_assembly() {
        let mut lc = Lifecycle::new();
        lc.advance(Phase::Loading).unwrap();
        assert_eq!(
            lc.advance(Phase::Rendering),
            Err(LifecycleError::InvalidTransition { from: Phase::Loading, to: Phase::Rendering })
        );
        assert_eq!(lc.phase(), Phase::Loading);
    }

    #[test]
    fn dispose_from_any_live_phase() {
        let mut lc = Lifecycle::new();
        assert!(lc.advance(Phase::Disposed).is_ok());

        let mut lc = Lifecycle::new();
        lc.advance(Phase::Loading).unwrap();
        assert!(lc.advance(Phase::Disposed).is_ok());
    }

    #[test]
    fn disposed_is_terminal() {
        let mut lc = Lifecycle::new();
        lc.advance(Phase::Disposed).unwrap();
        assert!(lc.advance(Phase::Disposed).is_err());
        assert!(lc.advance(Phase::Loading).is_err());
    }

    #[test]
    fn only_live_phases_draw() {
        assert!(!Phase::Uninitialized.draws_frames());
        assert!(Phase::Loading.draws_frames());
        assert!(Phase::Rendering.draws_frames());
        assert!(!Phase::Disposed.draws_frames());
    }
}
