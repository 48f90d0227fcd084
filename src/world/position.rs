use serde::{Deserialize, Serialize};

/// Render chunk edge length in voxels
pub const CHUNK_SIZE: i32 = 16;
/// log2 of [`CHUNK_SIZE`], for shift-based chunk coordinate math
pub const CHUNK_BITS: i32 = 4;
/// Mask selecting the within-chunk part of a voxel coordinate
pub const CHUNK_MASK: i32 = CHUNK_SIZE - 1;

/// Position of a voxel in the world (world coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoxelPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl VoxelPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Get the chunk this voxel belongs to
    pub fn to_chunk_pos(&self) -> ChunkPos {
        ChunkPos::new(
            self.x >> CHUNK_BITS,
            self.y >> CHUNK_BITS,
            self.z >> CHUNK_BITS,
        )
    }

    /// Get local position within the chunk
    pub fn to_local_pos(&self) -> (i32, i32, i32) {
        (self.x & CHUNK_MASK, self.y & CHUNK_MASK, self.z & CHUNK_MASK)
    }
}

/// Position of a render chunk in the world (chunk coordinates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl ChunkPos {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Create ChunkPos from VoxelPos
    pub fn from_voxel_pos(voxel_pos: VoxelPos) -> Self {
        voxel_pos.to_chunk_pos()
    }

    /// Create a new chunk position offset by the given amounts
    pub fn offset(&self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}
