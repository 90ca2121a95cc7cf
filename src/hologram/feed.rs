use crate::traits::DepthFeed;

use super::sequence::FrameSequenceFeed;

/// The feed mounted by the hologram widget
#[derive(Debug, Clone)]
pub enum HologramFeed {
    Synthetic(SyntheticFeed),
    Frames(FrameSequenceFeed),
}

impl DepthFeed for HologramFeed {
    fn dimensions(&self) -> (u32, u32) {
        match self {
            HologramFeed::Synthetic(feed) => feed.dimensions(),
            HologramFeed::Frames(feed) => feed.dimensions(),
        }
    }

    fn frame(&mut self, t: f32, rgba: &mut [u8]) {
        match self {
            HologramFeed::Synthetic(feed) => feed.frame(t, rgba),
            HologramFeed::Frames(feed) => feed.frame(t, rgba),
        }
    }
}

/// Procedural stand-in for the hero video: a warm, breathing silhouette on
/// black. Brightness falls off from the figure's centre so the point cloud
/// bulges toward the camera.
#[derive(Debug, Clone)]
pub struct SyntheticFeed {
    width: u32,
    height: u32,
}

impl SyntheticFeed {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Brightness of the figure at normalized image coordinates
    fn intensity(x: f32, y: f32, t: f32) -> f32 {
        let sway = (t * 0.7).sin() * 0.04;
        let breathe = 1.0 + (t * 1.3).sin() * 0.03;

        // head and torso as two ellipses
        let head = ellipse(x - 0.5 - sway, y - 0.22, 0.07, 0.09);
        let torso = ellipse(x - 0.5 - sway * 0.5, y - 0.62, 0.24 * breathe, 0.36);
        head.max(torso)
    }
}

fn ellipse(dx: f32, dy: f32, rx: f32, ry: f32) -> f32 {
    let d = (dx / rx).powi(2) + (dy / ry).powi(2);
    (1.0 - d).clamp(0.0, 1.0).sqrt()
}

impl DepthFeed for SyntheticFeed {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frame(&mut self, t: f32, rgba: &mut [u8]) {
        let (w, h) = (self.width as usize, self.height as usize);
        for (i, px) in rgba.chunks_exact_mut(4).take(w * h).enumerate() {
            let x = (i % w) as f32 / w as f32;
            let y = (i / w) as f32 / h as f32;
            let v = Self::intensity(x, y, t);
            px.copy_from_slice(&[
                (v * 235.0) as u8,
                (v * 160.0) as u8,
                (v * 80.0) as u8,
                255,
            ]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel(rgba: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let i = ((y * width + x) * 4) as usize;
        [rgba[i], rgba[i + 1], rgba[i + 2], rgba[i + 3]]
    }

    #[test]
    fn background_is_black_figure_is_warm() {
        let mut feed = SyntheticFeed::new(320, 240);
        let mut rgba = vec![0u8; 320 * 240 * 4];
        feed.frame(0.0, &mut rgba);

        assert_eq!(pixel(&rgba, 320, 5, 5), [0, 0, 0, 255]);

        let [r, g, b, a] = pixel(&rgba, 320, 160, 150);
        assert!(r > g && g > b, "not warm: {} {} {}", r, g, b);
        assert!(r > 128);
        assert_eq!(a, 255);
    }

    #[test]
    fn frames_change_over_time() {
        let mut feed = SyntheticFeed::new(64, 48);
        let mut a = vec![0u8; 64 * 48 * 4];
        let mut b = a.clone();
        feed.frame(0.0, &mut a);
        feed.frame(2.0, &mut b);
        assert_ne!(a, b);
    }

    #[test]
    fn hologram_feed_forwards_to_inner_feed() {
        let mut feed = HologramFeed::Synthetic(SyntheticFeed::new(32, 24));
        assert_eq!(feed.dimensions(), (32, 24));

        let mut direct = vec![0u8; 32 * 24 * 4];
        let mut wrapped = direct.clone();
        SyntheticFeed::new(32, 24).frame(1.0, &mut direct);
        feed.frame(1.0, &mut wrapped);
        assert_eq!(direct, wrapped);
    }
}
