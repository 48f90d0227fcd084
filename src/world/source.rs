use serde::{Deserialize, Serialize};

use crate::error::{LightingError, LightingResult};
use crate::world::{BlockId, BlockRegistry, VoxelPos};

/// Fixed extents of a loaded world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDims {
    pub width: i32,
    pub height: i32,
    pub length: i32,
}

impl WorldDims {
    pub fn new(width: i32, height: i32, length: i32) -> LightingResult<Self> {
        if width <= 0 || height <= 0 || length <= 0 {
            return Err(LightingError::InvalidDimensions {
                width,
                height,
                length,
            });
        }
        Ok(Self {
            width,
            height,
            length,
        })
    }

    /// Whether the voxel position lies inside the world
    pub fn contains(&self, pos: VoxelPos) -> bool {
        pos.x >= 0
            && pos.y >= 0
            && pos.z >= 0
            && pos.x < self.width
            && pos.y < self.height
            && pos.z < self.length
    }

    /// Number of (x, z) columns
    pub fn column_count(&self) -> usize {
        (self.width as usize) * (self.length as usize)
    }
}

/// Read access to the voxel world, as needed by the lighting subsystem.
///
/// The world store and its block table are external collaborators; this
/// trait is the seam they are consumed through.
pub trait WorldSource {
    fn dims(&self) -> WorldDims;

    fn get_block(&self, pos: VoxelPos) -> BlockId;

    /// Whether the block type obstructs the angled light
    fn blocks_light(&self, id: BlockId) -> bool;

    /// Whether the voxel at `pos` obstructs the angled light
    fn is_opaque(&self, pos: VoxelPos) -> bool {
        self.blocks_light(self.get_block(pos))
    }
}

/// Dense in-memory world, the reference [`WorldSource`] implementation
pub struct ArrayWorld {
    dims: WorldDims,
    blocks: Vec<BlockId>,
    registry: BlockRegistry,
}

impl ArrayWorld {
    pub fn new(dims: WorldDims, registry: BlockRegistry) -> Self {
        let volume = dims.column_count() * dims.height as usize;
        Self {
            dims,
            blocks: vec![BlockId::AIR; volume],
            registry,
        }
    }

    fn index(&self, pos: VoxelPos) -> usize {
        assert!(
            self.dims.contains(pos),
            "voxel out of world bounds: {:?}",
            pos
        );
        ((pos.y * self.dims.length + pos.z) * self.dims.width + pos.x) as usize
    }

    pub fn set_block(&mut self, pos: VoxelPos, block: BlockId) {
        let idx = self.index(pos);
        self.blocks[idx] = block;
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BlockRegistry {
        &mut self.registry
    }
}

impl WorldSource for ArrayWorld {
    fn dims(&self) -> WorldDims {
        self.dims
    }

    fn get_block(&self, pos: VoxelPos) -> BlockId {
        self.blocks[self.index(pos)]
    }

    fn blocks_light(&self, id: BlockId) -> bool {
        self.registry.blocks_light(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dims_validation() {
        assert!(WorldDims::new(16, 8, 16).is_ok());
        assert!(WorldDims::new(0, 8, 16).is_err());
        assert!(WorldDims::new(16, -1, 16).is_err());
    }

    #[test]
    fn test_set_and_get_block() {
        let mut registry = BlockRegistry::new();
        let stone = registry.register("stone", true);
        let dims = WorldDims::new(4, 4, 4).unwrap();
        let mut world = ArrayWorld::new(dims, registry);

        let pos = VoxelPos::new(1, 2, 3);
        assert_eq!(world.get_block(pos), BlockId::AIR);
        world.set_block(pos, stone);
        assert_eq!(world.get_block(pos), stone);
        assert!(world.is_opaque(pos));
        assert!(!world.is_opaque(VoxelPos::new(0, 0, 0)));
    }

    #[test]
    #[should_panic(expected = "out of world bounds")]
    fn test_out_of_bounds_read_panics() {
        let dims = WorldDims::new(4, 4, 4).unwrap();
        let world = ArrayWorld::new(dims, BlockRegistry::new());
        world.get_block(VoxelPos::new(4, 0, 0));
    }
}
