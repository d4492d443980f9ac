//! The view into the level the engine may reach back into.

use crate::object::{Block, BlockEntity, BlockPosition};

/// Read-only access to the world a translation runs against.
///
/// Implementations must answer consistently for the duration of one
/// translation call. The engine itself holds no world state, so a shared
/// implementation may serve concurrent translations.
pub trait World {
    /// Returns the block entity at the given location, if any.
    fn tile_entity_at(&self, position: BlockPosition) -> Option<BlockEntity>;

    /// Returns the block and block entity at the given location.
    ///
    /// Used for multiblock neighbor lookups. The default implementation
    /// knows nothing and answers `(None, None)`; a backend must override it
    /// for multiblock mappings to take effect.
    fn block_and_entity_at(&self, position: BlockPosition) -> (Option<Block>, Option<BlockEntity>) {
        let _ = position;
        (None, None)
    }
}
