use glam::Vec3;

pub const DEFAULT_ORBIT_RADIUS: f32 = 2.5;
const ORBIT_HEIGHT: f32 = 1.5;

/// Converts a 0xRRGGBB hex color to linear-ish float RGB
pub fn hex_color(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
}

/// The two orbiting point lights shared by every trophy material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightRig {
    pub lights: [Light; 2],
    pub orbit_radius: f32,
}

impl LightRig {
    pub fn new(orbit_radius: f32) -> Self {
        Self {
            lights: [
                Light { position: Vec3::ZERO, color: hex_color(0xffd280) },
                Light { position: Vec3::ZERO, color: hex_color(0xffbf60) },
            ],
            orbit_radius,
        }
    }

    /// Closed-form orbit, `t` is the animation time (half the wall clock)
    pub fn orbit_position(t: f32, radius: f32) -> Vec3 {
        Vec3::new(
            t.sin() * radius,
            (t * 0.75).cos() * ORBIT_HEIGHT,
            (t * 0.5).cos() * radius,
        )
    }

    /// Recompute both positions; the second light mirrors the first through the origin
    pub fn update(&mut self, t: f32) {
        let p = Self::orbit_position(t, self.orbit_radius);
        self.lights[0].position = p;
        self.lights[1].position = -p;
    }
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new(DEFAULT_ORBIT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_color_decodes_channels() {
        let c = hex_color(0xff8000);
        assert_eq!(c.x, 1.0);
        assert!((c.y - 128.0 / 255.0).abs() < 1e-6);
        assert_eq!(c.z, 0.0);
    }

    #[test]
    fn orbit_at_zero() {
        let p = LightRig::orbit_position(0.0, 2.5);
        assert_eq!(p, Vec3::new(0.0, 1.5, 2.5));
    }

    #[test]
    fn lights_mirror_each_other() {
        let mut rig = LightRig::default();
        rig.update(1.234);
        assert_eq!(rig.lights[0].position, -rig.lights[1].position);
    }

    #[test]
    fn orbit_is_deterministic() {
        let mut a = LightRig::default();
        let mut b = LightRig::default();
        a.update(3.0);
        b.update(1.0);
        b.update(3.0);
        assert_eq!(a, b);
    }
}
