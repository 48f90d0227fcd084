//! Angled sky lighting: classification of voxels as sunlit or shadowed under
//! a fixed diagonal light direction, and the face-shaded colors derived from
//! that classification.

pub mod color;
pub mod engine;
pub mod events;
pub mod invalidate;
pub mod shadow_field;

pub use color::{
    shade, shade_shadow, shade_sun, LightColor, PackedColor, ShadedColors, SHADOW_SHADE_X_SIDE,
    SHADOW_SHADE_Y_BOTTOM, SHADOW_SHADE_Z_SIDE, SUN_SHADE_X_SIDE, SUN_SHADE_Y_BOTTOM,
    SUN_SHADE_Z_SIDE,
};
pub use engine::{AngledLighting, Face, HEIGHT_STALE};
pub use events::{EnvChange, EnvEventBus, EnvVar};
pub use invalidate::{ChunkRefresher, DirtyChunks};
pub use shadow_field::ShadowHeightField;
