//! The angled-lighting engine.
//!
//! Owns the shadow-height field and the precomputed sun/shadow colors for
//! one loaded world, and exposes the lifecycle hooks and per-voxel queries
//! the rest of the engine calls. Everything runs synchronously on the
//! caller's thread; the host serialises edits and render-time queries.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::error::LightingResult;
use crate::lighting::color::{shade_shadow, shade_sun, LightColor, PackedColor, ShadedColors};
use crate::lighting::events::{EnvChange, EnvEventBus, EnvVar};
use crate::lighting::invalidate::{invalidate_after_edit, ChunkRefresher};
use crate::lighting::shadow_field::ShadowHeightField;
use crate::world::{BlockId, VoxelPos, WorldDims, WorldSource};
use crate::LightingConfig;

/// Sentinel marking a column hint as not computed
pub const HEIGHT_STALE: i16 = i16::MAX;

/// Cube face orientations with distinct shading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Top,
    Sprite,
    Bottom,
    XSide,
    ZSide,
}

pub struct AngledLighting {
    config: LightingConfig,
    field: Option<ShadowHeightField>,
    /// Reserved per-(x, z) column cache for future incremental relight
    /// reuse. Reset to `HEIGHT_STALE` on load and on `refresh`; never read
    /// back today.
    height_hint: Vec<i16>,
    sun_color: LightColor,
    shadow_color: LightColor,
    sun: ShadedColors,
    shadow: ShadedColors,
    env_subscription: Option<u64>,
}

impl AngledLighting {
    pub fn new(config: LightingConfig) -> Self {
        let sun_color = config.sun_color;
        let shadow_color = config.shadow_color;
        Self {
            config,
            field: None,
            height_hint: Vec::new(),
            sun_color,
            shadow_color,
            sun: shade_sun(sun_color),
            shadow: shade_shadow(shadow_color),
            env_subscription: None,
        }
    }

    /// Drop all per-world state
    pub fn reset(&mut self) {
        self.field = None;
        self.height_hint = Vec::new();
    }

    /// A new map is about to load: colors return to their configured values
    /// and per-world state is dropped
    pub fn on_new_map(&mut self) {
        self.set_sun_color(self.config.sun_color);
        self.set_shadow_color(self.config.shadow_color);
        self.reset();
    }

    /// The world finished loading: allocate the field and run the full build
    pub fn on_world_loaded(&mut self, world: &dyn WorldSource) -> LightingResult<()> {
        let d = world.dims();
        let dims = WorldDims::new(d.width, d.height, d.length)?;

        self.height_hint = vec![HEIGHT_STALE; dims.column_count()];
        let mut field = ShadowHeightField::new(dims);
        field.build_region(world, 0, 0, dims.width, dims.length);
        self.field = Some(field);
        log::info!(
            "angled lighting field built for {}x{}x{} world",
            dims.width,
            dims.height,
            dims.length
        );
        Ok(())
    }

    /// Invalidate the per-column hints so all future queries recompute from
    /// the field. Does not rebuild the field itself.
    pub fn refresh(&mut self) {
        self.height_hint.fill(HEIGHT_STALE);
    }

    /// Deregister from the environment bus and drop per-world state
    pub fn dispose(&mut self, events: &EnvEventBus) {
        if let Some(id) = self.env_subscription.take() {
            events.unsubscribe(id);
        }
        self.reset();
    }

    /// The shadow-height field of the loaded world, if any
    pub fn shadow_field(&self) -> Option<&ShadowHeightField> {
        self.field.as_ref()
    }

    /// Reserved per-column hints; stale entries hold [`HEIGHT_STALE`]
    pub fn column_hints(&self) -> &[i16] {
        &self.height_hint
    }

    fn field(&self) -> &ShadowHeightField {
        self.field
            .as_ref()
            .expect("lighting queried before a world was loaded")
    }

    /// Lit/shadow classification for a voxel. Positions outside the world
    /// count as lit (open sky).
    pub fn is_lit(&self, pos: VoxelPos) -> bool {
        self.field().is_lit(pos)
    }

    /// Unshaded color for a voxel
    pub fn light_color(&self, pos: VoxelPos) -> PackedColor {
        if self.is_lit(pos) {
            self.sun.full
        } else {
            self.shadow.full
        }
    }

    /// Color for a specific face orientation at `pos`
    pub fn light_color_face(&self, pos: VoxelPos, face: Face) -> PackedColor {
        let colors = if self.is_lit(pos) {
            &self.sun
        } else {
            &self.shadow
        };
        match face {
            Face::Top | Face::Sprite => colors.full,
            Face::Bottom => colors.y_bottom,
            Face::XSide => colors.x_side,
            Face::ZSide => colors.z_side,
        }
    }

    pub fn light_color_top(&self, pos: VoxelPos) -> PackedColor {
        self.light_color_face(pos, Face::Top)
    }

    pub fn light_color_sprite(&self, pos: VoxelPos) -> PackedColor {
        self.light_color_face(pos, Face::Sprite)
    }

    pub fn light_color_bottom(&self, pos: VoxelPos) -> PackedColor {
        self.light_color_face(pos, Face::Bottom)
    }

    pub fn light_color_x_side(&self, pos: VoxelPos) -> PackedColor {
        self.light_color_face(pos, Face::XSide)
    }

    pub fn light_color_z_side(&self, pos: VoxelPos) -> PackedColor {
        self.light_color_face(pos, Face::ZSide)
    }

    pub fn sun_color(&self) -> LightColor {
        self.sun_color
    }

    pub fn shadow_color(&self) -> LightColor {
        self.shadow_color
    }

    pub fn set_sun_color(&mut self, color: LightColor) {
        self.sun_color = color;
        self.sun = shade_sun(color);
        log::debug!("sunlight color set to {:?}", color);
    }

    pub fn set_shadow_color(&mut self, color: LightColor) {
        self.shadow_color = color;
        self.shadow = shade_shadow(color);
        log::debug!("shadow color set to {:?}", color);
    }

    /// React to an environment change notification
    pub fn handle_env_change(&mut self, change: &EnvChange) {
        match change.var {
            EnvVar::SunColor => self.set_sun_color(change.color),
            EnvVar::ShadowColor => self.set_shadow_color(change.color),
        }
    }

    /// Register `engine` on the environment bus. `dispose` releases the
    /// subscription; a dropped engine falls out via the weak handle.
    pub fn attach_env(engine: &Arc<Mutex<AngledLighting>>, events: &EnvEventBus) {
        let weak = Arc::downgrade(engine);
        let id = events.subscribe(move |change| {
            if let Some(engine) = weak.upgrade() {
                engine.lock().handle_env_change(change);
            }
        });
        engine.lock().env_subscription = Some(id);
    }

    /// A single voxel changed from `old_block` to `new_block`: patch the
    /// affected diagonal field cells and request the render refreshes the
    /// change can reach.
    ///
    /// The caller guarantees `pos` is a valid world voxel and that `world`
    /// already reflects the new block.
    pub fn on_block_changed(
        &mut self,
        world: &dyn WorldSource,
        pos: VoxelPos,
        old_block: BlockId,
        new_block: BlockId,
        refresher: &mut dyn ChunkRefresher,
    ) {
        // A swap between two light-passing blocks cannot move the boundary
        if !world.blocks_light(new_block) && !world.blocks_light(old_block) {
            return;
        }

        let field = self
            .field
            .as_mut()
            .expect("block change before a world was loaded");
        let dims = field.dims();
        assert!(
            dims.contains(pos),
            "block change outside world bounds: {:?}",
            pos
        );

        let VoxelPos { x, y, z } = pos;
        let mut x_width = 2;
        let mut z_length = 2;
        if x + x_width >= dims.width {
            x_width -= 1;
        }
        if z + z_length >= dims.length {
            z_length -= 1;
        }

        // The two 2x2 diagonal regions bracketing the edit are exactly the
        // cells whose rays can pass through it
        field.build_region(world, (x - 1) - y, (z - 1) - y, x_width, z_length);
        field.build_region(world, x - y, z - y, x_width, z_length);
        log::debug!("patched shadow field around {:?}", pos);

        invalidate_after_edit(pos, self.config.smooth_lighting, refresher);
    }
}
