//! The diagonal shadow-height field.
//!
//! The light direction descends one step in X, Y and Z at a time, so a voxel
//! (x, y, z) is addressed through the diagonal transform
//! `(x + height - y, z + height - y)`. The field stores, per diagonal
//! column, the lowest Y the light still reaches; it extends `height` cells
//! past the world footprint on both axes because a ray entering at the world
//! ceiling can drift that far diagonally before touching the ground.

use crate::world::{VoxelPos, WorldDims, WorldSource};

#[derive(Debug, Clone)]
pub struct ShadowHeightField {
    dims: WorldDims,
    x_extent: i32,
    z_extent: i32,
    /// Lowest lit Y per diagonal column, addressed through `cell_index`
    blockers: Vec<i32>,
}

impl ShadowHeightField {
    pub fn new(dims: WorldDims) -> Self {
        let x_extent = dims.width + dims.height;
        let z_extent = dims.length + dims.height;
        Self {
            dims,
            x_extent,
            z_extent,
            blockers: vec![0; (x_extent as usize) * (z_extent as usize)],
        }
    }

    pub fn dims(&self) -> WorldDims {
        self.dims
    }

    /// Raw cell storage, in `x + z * (width + height)` order
    pub fn cells(&self) -> &[i32] {
        &self.blockers
    }

    /// Flat index of the field cell addressing voxel (x, y, z)
    #[inline]
    fn cell_index(&self, x: i32, y: i32, z: i32) -> usize {
        let dx = x + self.dims.height - y;
        let dz = z + self.dims.height - y;
        debug_assert!(dx >= 0 && dx < self.x_extent && dz >= 0 && dz < self.z_extent);
        (dx + dz * self.x_extent) as usize
    }

    /// Boundary height stored for the diagonal column through `pos`, which
    /// must lie inside the world
    pub fn boundary_height(&self, pos: VoxelPos) -> i32 {
        assert!(
            self.dims.contains(pos),
            "field queried out of bounds: {:?}",
            pos
        );
        self.blockers[self.cell_index(pos.x, pos.y, pos.z)]
    }

    /// Lit/shadow classification. Positions outside the world count as lit
    /// (open sky).
    pub fn is_lit(&self, pos: VoxelPos) -> bool {
        !self.dims.contains(pos) || pos.y >= self.blockers[self.cell_index(pos.x, pos.y, pos.z)]
    }

    /// Recompute the field over a rectangular region of world columns.
    ///
    /// `x_start`/`z_start` may lie before the world origin (incremental
    /// rebuilds pass diagonal offsets). A build over the full world footprint
    /// widens to the whole parallelogram, covering the rays that enter beyond
    /// the footprint as well.
    pub fn build_region(
        &mut self,
        world: &dyn WorldSource,
        mut x_start: i32,
        mut z_start: i32,
        mut x_width: i32,
        mut z_length: i32,
    ) {
        let WorldDims {
            width,
            height,
            length,
        } = self.dims;

        x_start += height;
        if x_width == width {
            x_width += height;
            x_start -= height;
        }
        z_start += height;
        if z_length == length {
            z_length += height;
            z_start -= height;
        }

        for x in x_start..x_start + x_width {
            for z in z_start..z_start + z_length {
                debug_assert!(x >= 0 && x < self.x_extent && z >= 0 && z < self.z_extent);
                let cell = (x + z * self.x_extent) as usize;
                let old_height = self.blockers[cell];

                let mut y_cur = height - 1;
                let mut x_cur = x + height - 1;
                let mut z_cur = z + height - 1;

                // Clip the entry point onto the far edge of the parallelogram.
                // The ray enters lower by the same amount it was pushed back,
                // which keeps it on the same diagonal.
                let x_over = (x_cur - (self.x_extent - 1)).max(0);
                let z_over = (z_cur - (self.z_extent - 1)).max(0);
                let max_over = x_over.max(z_over);
                y_cur -= max_over;
                x_cur -= max_over;
                z_cur -= max_over;

                // Undo the diagonal offset to get world coordinates
                x_cur -= height;
                z_cur -= height;

                while y_cur > 0
                    && x_cur >= 0
                    && x_cur < width
                    && z_cur >= 0
                    && z_cur < length
                    && !ray_blocked_at(world, x_cur, y_cur, z_cur)
                {
                    y_cur -= 1;
                    x_cur -= 1;
                    z_cur -= 1;
                }

                // A march that left through the low X/Z edge carries no height
                // of its own; keep whatever an overlapping neighbouring build
                // computed for this cell.
                self.blockers[cell] = if x_cur < 0 || z_cur < 0 {
                    old_height
                } else {
                    y_cur
                };
            }
        }
    }
}

/// Conservative occlusion test for one ray step: the current voxel and every
/// corner toward the next step (one lower in X, Y and Z) must pass light.
/// Testing the full corner set keeps light from leaking through gaps between
/// diagonally adjacent solid voxels.
fn ray_blocked_at(world: &dyn WorldSource, x: i32, y: i32, z: i32) -> bool {
    let x_next = if x > 0 { x - 1 } else { x };
    let y_next = if y > 0 { y - 1 } else { y };
    let z_next = if z > 0 { z - 1 } else { z };
    for cx in [x, x_next] {
        for cy in [y, y_next] {
            for cz in [z, z_next] {
                if world.is_opaque(VoxelPos::new(cx, cy, cz)) {
                    return true;
                }
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{ArrayWorld, BlockId, BlockRegistry};

    fn stone_world(width: i32, height: i32, length: i32) -> (ArrayWorld, BlockId) {
        let mut registry = BlockRegistry::new();
        let stone = registry.register("stone", true);
        let dims = WorldDims::new(width, height, length).unwrap();
        (ArrayWorld::new(dims, registry), stone)
    }

    fn full_build(field: &mut ShadowHeightField, world: &ArrayWorld) {
        let dims = world.dims();
        field.build_region(world, 0, 0, dims.width, dims.length);
    }

    #[test]
    fn test_no_blockers_everything_lit() {
        let (world, _) = stone_world(4, 4, 4);
        let mut field = ShadowHeightField::new(world.dims());
        full_build(&mut field, &world);

        for x in 0..4 {
            for y in 0..4 {
                for z in 0..4 {
                    assert!(field.is_lit(VoxelPos::new(x, y, z)), "({}, {}, {})", x, y, z);
                }
            }
        }
    }

    #[test]
    fn test_full_column_shadowed_below_top() {
        let (mut world, stone) = stone_world(4, 4, 4);
        for y in 0..4 {
            world.set_block(VoxelPos::new(2, y, 2), stone);
        }
        let mut field = ShadowHeightField::new(world.dims());
        full_build(&mut field, &world);

        // The column's entry cell records the top blocking voxel
        assert_eq!(field.boundary_height(VoxelPos::new(2, 3, 2)), 3);
        assert!(field.is_lit(VoxelPos::new(2, 3, 2)));
        for y in 0..3 {
            assert!(!field.is_lit(VoxelPos::new(2, y, 2)), "y={}", y);
        }
    }

    #[test]
    fn test_blocker_shadows_its_diagonal() {
        let (mut world, stone) = stone_world(4, 4, 4);
        world.set_block(VoxelPos::new(2, 3, 2), stone);
        let mut field = ShadowHeightField::new(world.dims());
        full_build(&mut field, &world);

        // Voxels diagonally below and behind the blocker fall in shadow
        assert!(!field.is_lit(VoxelPos::new(1, 2, 1)));
        assert!(!field.is_lit(VoxelPos::new(0, 1, 0)));
        // The corner test also shades the diagonally adjacent column
        assert!(!field.is_lit(VoxelPos::new(2, 2, 2)));
        // The blocker's own top stays lit, as does the far side
        assert!(field.is_lit(VoxelPos::new(2, 3, 2)));
        assert!(field.is_lit(VoxelPos::new(3, 2, 3)));
    }

    #[test]
    fn test_build_region_is_idempotent() {
        let (mut world, stone) = stone_world(6, 4, 6);
        world.set_block(VoxelPos::new(2, 2, 3), stone);
        world.set_block(VoxelPos::new(4, 1, 1), stone);
        world.set_block(VoxelPos::new(5, 3, 5), stone);

        let mut field = ShadowHeightField::new(world.dims());
        full_build(&mut field, &world);
        let first = field.cells().to_vec();
        full_build(&mut field, &world);
        assert_eq!(field.cells(), &first[..]);
    }

    #[test]
    fn test_adjacent_region_builds_match_full_build() {
        let (mut world, stone) = stone_world(6, 4, 6);
        world.set_block(VoxelPos::new(1, 1, 4), stone);
        world.set_block(VoxelPos::new(3, 3, 2), stone);
        world.set_block(VoxelPos::new(5, 0, 5), stone);

        let mut full = ShadowHeightField::new(world.dims());
        full_build(&mut full, &world);

        // Cover the same parallelogram as two side-by-side region builds
        let mut split = ShadowHeightField::new(world.dims());
        split.build_region(&world, -4, -4, 5, 10);
        split.build_region(&world, 1, -4, 5, 10);

        assert_eq!(split.cells(), full.cells());
    }

    #[test]
    fn test_edge_rebuild_preserves_neighbor_cells() {
        let (mut world, stone) = stone_world(6, 4, 6);
        world.set_block(VoxelPos::new(0, 2, 0), stone);
        world.set_block(VoxelPos::new(4, 1, 3), stone);

        let mut field = ShadowHeightField::new(world.dims());
        full_build(&mut field, &world);
        let before = field.cells().to_vec();

        // Rebuilding a strip against the +X edge must leave every other
        // cell's value alone, including cells whose clipped rays exit the
        // low edge and fall back on the stored value
        field.build_region(&world, 4, 0, 1, world.dims().length);
        assert_eq!(field.cells(), &before[..]);
    }

    #[test]
    fn test_out_of_bounds_is_lit() {
        let (world, _) = stone_world(4, 4, 4);
        let mut field = ShadowHeightField::new(world.dims());
        full_build(&mut field, &world);
        assert!(field.is_lit(VoxelPos::new(-1, 0, 0)));
        assert!(field.is_lit(VoxelPos::new(0, 4, 0)));
        assert!(field.is_lit(VoxelPos::new(0, 0, 17)));
    }
}
