//! World-side collaborators of the lighting subsystem: coordinates, block
//! types and the read seam over voxel storage.

mod block;
mod position;
mod source;

pub use block::{BlockId, BlockRegistry};
pub use position::{ChunkPos, VoxelPos, CHUNK_BITS, CHUNK_MASK, CHUNK_SIZE};
pub use source::{ArrayWorld, WorldDims, WorldSource};
