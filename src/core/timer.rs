//! Self-contained timers driven by absolute frame time in seconds
/// Frame cap - lets a frame through only when the minimum interval has passed
/// since the last one that was let through
#[derive(Debug, Clone, Copy)]
pub struct FrameCap {
    min_interval: f32,
    last_fire: f32,
}

impl FrameCap {
    /// `max_fps <= 0` disables the cap
    pub fn new(max_fps: f32) -> Self {
        Self {
            min_interval: if max_fps > 0.0 { 1.0 / max_fps } else { 0.0 },
            last_fire: f32::NEG_INFINITY,
        }
    }

    /// Returns true if a frame should be produced at `now`
    pub fn try_fire(&mut self, now: f32) -> bool {
        if now - self.last_fire < self.min_interval {
            return false;
        }
        self.last_fire = now;
        true
    }
}

/// Debouncer - holds the latest value until no new value arrived for
/// the quiet period, then releases it once
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    quiet: f32,
    pending: Option<(T, f32)>,
}

impl<T> Debounce<T> {
    pub fn new(quiet: f32) -> Self {
        Self { quiet, pending: None }
    }

    /// Replace the pending value and restart the quiet period
    pub fn trigger(&mut self, value: T, now: f32) {
        self.pending = Some((value, now + self.quiet));
    }

    /// Release the pending value if its deadline has passed
    pub fn poll(&mut self, now: f32) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_cap_enforces_minimum() {
        let mut cap = FrameCap::new(45.0);

        assert!(cap.try_fire(0.0)); // First fire immediate
        assert!(!cap.try_fire(0.01)); // Too soon
        assert!(cap.try_fire(0.03)); // Enough time
        assert!(!cap.try_fire(0.04));
    }

    #[test]
    fn uncapped_always_fires() {
        let mut cap = FrameCap::new(0.0);
        assert!(cap.try_fire(0.0));
        assert!(cap.try_fire(0.0));
        assert!(cap.try_fire(1e-6));
    }

    #[test]
    fn debounce_releases_latest_value_once() {
        let mut d = Debounce::new(0.1);
        d.trigger(1, 0.0);
        d.trigger(2, 0.05);

        assert_eq!(d.poll(0.1), None); // deadline moved to 0.15
        assert_eq!(d.poll(0.2), Some(2));
        assert_eq!(d.poll(0.5), None);
    }

    #[test]
    fn debounce_cancel_drops_value() {
        let mut d = Debounce::new(0.1);
        d.trigger("x", 0.0);
        d.cancel();
        assert_eq!(d.poll(1.0), None);
    }
}
