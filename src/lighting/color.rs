use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Packed 0xAARRGGBB color, the representation handed to the mesher
pub type PackedColor = u32;

/// Shade factors for faces under direct angled sunlight
pub const SUN_SHADE_X_SIDE: f32 = 0.8;
pub const SUN_SHADE_Z_SIDE: f32 = 0.9;
pub const SUN_SHADE_Y_BOTTOM: f32 = 0.7;

/// Shade factors for faces inside shadow
pub const SHADOW_SHADE_X_SIDE: f32 = 0.6;
pub const SHADOW_SHADE_Z_SIDE: f32 = 0.8;
pub const SHADOW_SHADE_Y_BOTTOM: f32 = 0.5;

/// Working light color with float channels in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightColor {
    pub rgb: Vec3,
}

impl LightColor {
    pub fn new(r: f32, g: f32, b: f32) -> Self {
        Self {
            rgb: Vec3::new(r, g, b),
        }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Default sunlight color (white)
    pub fn default_sun() -> Self {
        Self::from_rgb8(255, 255, 255)
    }

    /// Default shadow color
    pub fn default_shadow() -> Self {
        Self::from_rgb8(0x9B, 0x9B, 0x9B)
    }

    /// Scale every channel by `factor`
    pub fn scale(self, factor: f32) -> Self {
        Self {
            rgb: self.rgb * factor,
        }
    }

    /// Pack into 0xAARRGGBB with opaque alpha
    pub fn pack(self) -> PackedColor {
        let c = (self.rgb.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
        0xFF00_0000 | ((c.x as u32) << 16) | ((c.y as u32) << 8) | (c.z as u32)
    }
}

/// A base light color packed together with its three face-shaded variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShadedColors {
    pub full: PackedColor,
    pub x_side: PackedColor,
    pub z_side: PackedColor,
    pub y_bottom: PackedColor,
}

/// Scale `base` by a face factor and pack it
pub fn shade(base: LightColor, factor: f32) -> PackedColor {
    base.scale(factor).pack()
}

/// Precompute the sunlit face variants of `base`
pub fn shade_sun(base: LightColor) -> ShadedColors {
    ShadedColors {
        full: base.pack(),
        x_side: shade(base, SUN_SHADE_X_SIDE),
        z_side: shade(base, SUN_SHADE_Z_SIDE),
        y_bottom: shade(base, SUN_SHADE_Y_BOTTOM),
    }
}

/// Precompute the shadowed face variants of `base`
pub fn shade_shadow(base: LightColor) -> ShadedColors {
    ShadedColors {
        full: base.pack(),
        x_side: shade(base, SHADOW_SHADE_X_SIDE),
        z_side: shade(base, SHADOW_SHADE_Z_SIDE),
        y_bottom: shade(base, SHADOW_SHADE_Y_BOTTOM),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pack_white() {
        assert_eq!(LightColor::default_sun().pack(), 0xFFFFFFFF);
    }

    #[test]
    fn test_pack_channel_order() {
        assert_eq!(LightColor::from_rgb8(0x12, 0x34, 0x56).pack(), 0xFF123456);
    }

    #[test]
    fn test_pack_clamps_out_of_range() {
        assert_eq!(LightColor::new(2.0, -1.0, 0.0).pack(), 0xFFFF0000);
    }

    #[test]
    fn test_sun_variants_follow_factors() {
        let base = LightColor::default_sun();
        let sun = shade_sun(base);
        assert_eq!(sun.full, base.pack());
        assert_eq!(sun.x_side, shade(base, SUN_SHADE_X_SIDE));
        assert_eq!(sun.z_side, shade(base, SUN_SHADE_Z_SIDE));
        assert_eq!(sun.y_bottom, shade(base, SUN_SHADE_Y_BOTTOM));
    }

    #[test]
    fn test_shadow_variants_are_darker_than_sun() {
        let base = LightColor::default_sun();
        let sun = shade_sun(base);
        let shadow = shade_shadow(base);
        // Same base, smaller factors: every shadow channel is dimmer
        assert!((shadow.x_side & 0xFF) < (sun.x_side & 0xFF));
        assert!((shadow.z_side & 0xFF) <= (sun.z_side & 0xFF));
        assert!((shadow.y_bottom & 0xFF) < (sun.y_bottom & 0xFF));
    }
}
