/// Light payload attached to a scene node.
///
/// The light's position is its node's world position. Directional-style
/// lights additionally aim at a world-space target point, which is the
/// derived property retargeted every tick by a `LightTarget` binding.

use glam::Vec3;

/// Kind of light source (shading itself is the renderer's business)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
    Spot,
    RectArea,
}

impl LightKind {
    /// Whether the light aims at a target point
    pub fn has_target(&self) -> bool {
        matches!(self, LightKind::Directional | LightKind::Spot | LightKind::RectArea)
    }
}

/// Light parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub kind: LightKind,
    /// Color as 0xRRGGBB
    pub color: u32,
    pub intensity: f32,
    /// World-space point the light aims at
    pub target: Vec3,
    pub cast_shadow: bool,
}

impl Light {
    pub fn new(kind: LightKind, color: u32, intensity: f32) -> Self {
        Self {
            kind,
            color,
            intensity,
            target: Vec3::ZERO,
            cast_shadow: false,
        }
    }

    pub fn ambient(color: u32, intensity: f32) -> Self {
        Self::new(LightKind::Ambient, color, intensity)
    }

    pub fn directional(color: u32, intensity: f32) -> Self {
        Self::new(LightKind::Directional, color, intensity)
    }

    pub fn with_target(mut self, target: Vec3) -> Self {
        self.target = target;
        self
    }

    pub fn with_cast_shadow(mut self, cast_shadow: bool) -> Self {
        self.cast_shadow = cast_shadow;
        self
    }

    /// Color split into linear [0, 1] RGB components
    pub fn color_rgb(&self) -> Vec3 {
        Vec3::new(
            ((self.color >> 16) & 0xff) as f32 / 255.0,
            ((self.color >> 8) & 0xff) as f32 / 255.0,
            (self.color & 0xff) as f32 / 255.0,
        )
    }
}
