/// Source of RGBA frames for the hologram
pub trait DepthFeed {
    /// Frame size in pixels
    fn dimensions(&self) -> (u32, u32);

    /// Write the frame at time `t` (seconds) into `rgba`, tightly packed
    /// `width * height * 4` bytes
    fn frame(&mut self, t: f32, rgba: &mut [u8]);
}
