//! Render invalidation after a lighting-relevant edit.
//!
//! A change to the diagonal field can flip the classification of voxels far
//! below and behind the edit (toward decreasing X, Y and Z), so the refresh
//! walk follows the light direction back toward the world origin instead of
//! stopping at the edited chunk.

use rustc_hash::FxHashSet;

use crate::world::{ChunkPos, VoxelPos, CHUNK_MASK};

/// Receives chunk-geometry rebuild requests. Idempotent and fire-and-forget
/// from the lighting subsystem's point of view.
pub trait ChunkRefresher {
    fn refresh_chunk(&mut self, pos: ChunkPos);
}

/// Collects refresh requests into a deduplicated set, for hosts that batch
/// remeshing (and for tests)
#[derive(Debug, Default)]
pub struct DirtyChunks {
    chunks: FxHashSet<ChunkPos>,
}

impl DirtyChunks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the accumulated set, leaving this collector empty
    pub fn take(&mut self) -> FxHashSet<ChunkPos> {
        std::mem::take(&mut self.chunks)
    }

    pub fn contains(&self, pos: ChunkPos) -> bool {
        self.chunks.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChunkPos> {
        self.chunks.iter()
    }
}

impl ChunkRefresher for DirtyChunks {
    fn refresh_chunk(&mut self, pos: ChunkPos) {
        self.chunks.insert(pos);
    }
}

/// Walk from the edited voxel's chunk back toward the origin, refreshing
/// every chunk whose lit/shadow classification the edit can reach. Chunks at
/// negative coordinates are never requested.
pub(crate) fn invalidate_after_edit(
    pos: VoxelPos,
    smooth_lighting: bool,
    refresher: &mut dyn ChunkRefresher,
) {
    let mut c = pos.to_chunk_pos();
    let (bx, by, bz) = pos.to_local_pos();

    loop {
        if smooth_lighting {
            // An edit on a +X/+Y/+Z chunk face also changes geometry meshed
            // by the forward neighbour
            if bx == CHUNK_MASK {
                refresher.refresh_chunk(c.offset(1, 0, 0));
            }
            if by == CHUNK_MASK {
                refresher.refresh_chunk(c.offset(0, 1, 0));
            }
            if bz == CHUNK_MASK {
                refresher.refresh_chunk(c.offset(0, 0, 1));
            }
            if bx == CHUNK_MASK && bz == CHUNK_MASK {
                refresher.refresh_chunk(c.offset(1, 0, 1));
            }
            if bx == CHUNK_MASK && by == CHUNK_MASK && bz == CHUNK_MASK {
                refresher.refresh_chunk(c.offset(1, 1, 1));
            }
            if bx == CHUNK_MASK && bz == 0 && c.z > 0 {
                refresher.refresh_chunk(c.offset(1, 0, -1));
            }
            if bz == CHUNK_MASK && bx == 0 && c.x > 0 {
                refresher.refresh_chunk(c.offset(-1, 0, 1));
            }
        }

        refresher.refresh_chunk(c);
        if c.x > 0 {
            refresher.refresh_chunk(c.offset(-1, 0, 0));
        }
        if c.z > 0 {
            refresher.refresh_chunk(c.offset(0, 0, -1));
        }
        if c.x > 0 && c.z > 0 {
            refresher.refresh_chunk(c.offset(-1, 0, -1));
        }

        // Edits at the world floor cannot change anything below themselves
        if pos.y > 0 && c.y > 0 {
            refresher.refresh_chunk(c.offset(0, -1, 0));
            if c.x > 0 {
                refresher.refresh_chunk(c.offset(-1, -1, 0));
            }
            if c.z > 0 {
                refresher.refresh_chunk(c.offset(0, -1, -1));
            }
            if c.x > 0 && c.z > 0 {
                refresher.refresh_chunk(c.offset(-1, -1, -1));
            }
        }

        c = c.offset(-1, -1, -1);
        if c.x < 0 || c.y < 0 || c.z < 0 {
            break;
        }
    }
}
