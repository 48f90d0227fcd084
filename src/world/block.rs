use bit_vec::BitVec;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Identifier of a block type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockId(pub u16);

impl BlockId {
    pub const AIR: BlockId = BlockId(0);
}

/// Registry of block types and their light-blocking flags
pub struct BlockRegistry {
    blocks_light: BitVec,
    name_to_id: HashMap<String, BlockId>,
    next_id: u16,
}

impl BlockRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            blocks_light: BitVec::new(),
            name_to_id: HashMap::new(),
            next_id: 0,
        };
        registry.register("air", false);
        registry
    }

    /// Register a new block type with its light-blocking flag
    pub fn register(&mut self, name: &str, blocks_light: bool) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id = self
            .next_id
            .checked_add(1)
            .expect("block id space exhausted");
        self.blocks_light.push(blocks_light);
        self.name_to_id.insert(name.to_string(), id);
        log::debug!(
            "registered block '{}' as {:?} (blocks light: {})",
            name,
            id,
            blocks_light
        );
        id
    }

    /// Whether the block type obstructs the angled light. Unregistered ids
    /// pass light, same as an unset table slot.
    pub fn blocks_light(&self, id: BlockId) -> bool {
        self.blocks_light.get(id.0 as usize).unwrap_or(false)
    }

    /// Get a block id by name
    pub fn get_id(&self, name: &str) -> Option<BlockId> {
        self.name_to_id.get(name).copied()
    }
}

impl Default for BlockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_air_passes_light() {
        let registry = BlockRegistry::new();
        assert!(!registry.blocks_light(BlockId::AIR));
        assert_eq!(registry.get_id("air"), Some(BlockId::AIR));
    }

    #[test]
    fn test_register_blocking_block() {
        let mut registry = BlockRegistry::new();
        let stone = registry.register("stone", true);
        let water = registry.register("water", false);
        assert!(registry.blocks_light(stone));
        assert!(!registry.blocks_light(water));
        assert_eq!(registry.get_id("stone"), Some(stone));
    }

    #[test]
    fn test_unregistered_id_passes_light() {
        let registry = BlockRegistry::new();
        assert!(!registry.blocks_light(BlockId(999)));
    }
}
