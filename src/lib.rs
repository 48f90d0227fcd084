//! Angled sky lighting for fixed-size voxel worlds.
//!
//! A fixed diagonal light direction (one step down in Y per step in X and Z)
//! classifies every voxel as sunlit or shadowed. The crate maintains a
//! per-diagonal-column shadow-height field sized
//! `(width + height) x (length + height)`, so classification is O(1) per
//! voxel after an O(area) build; the field is patched incrementally when a
//! light-blocking voxel changes, and the affected render chunks are reported
//! for remeshing.
//!
//! The world store, the block table and the chunk remesher stay external:
//! they are consumed through the [`WorldSource`] and [`ChunkRefresher`]
//! seams.

pub mod error;
pub mod lighting;
pub mod world;

use serde::{Deserialize, Serialize};

pub use error::{LightingError, LightingResult};
pub use lighting::{
    AngledLighting, ChunkRefresher, DirtyChunks, EnvChange, EnvEventBus, EnvVar, Face, LightColor,
    PackedColor, ShadedColors, ShadowHeightField,
};
pub use world::{
    ArrayWorld, BlockId, BlockRegistry, ChunkPos, VoxelPos, WorldDims, WorldSource, CHUNK_SIZE,
};

/// Lighting subsystem configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Initial sunlight color
    pub sun_color: LightColor,
    /// Initial shadow color
    pub shadow_color: LightColor,
    /// Also refresh forward neighbour chunks on boundary edits, for hosts
    /// that mesh with sub-chunk granularity
    pub smooth_lighting: bool,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            sun_color: LightColor::default_sun(),
            shadow_color: LightColor::default_shadow(),
            smooth_lighting: false,
        }
    }
}

impl LightingConfig {
    /// Parse a config from TOML text
    pub fn from_toml_str(raw: &str) -> LightingResult<Self> {
        Ok(toml::from_str(raw)?)
    }
}
