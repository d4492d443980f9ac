//! Entities and block entities, the objects that own an NBT data tree.

use getset::Getters;

use crate::nbt::Value;

use super::{BlockPosition, EntityPosition};

/// An object that exists freely in the world and owns its NBT root.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Entity {
    /// The namespace of the entity's identity.
    #[get = "pub"]
    namespace: String,
    /// The base name of the entity's identity.
    #[get = "pub"]
    base_name: String,
    position: EntityPosition,
    /// The root of the entity's NBT data, always a compound.
    #[get = "pub"]
    nbt: Value,
}

impl Entity {
    /// Creates an entity from its identity, position and NBT root.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        base_name: impl Into<String>,
        position: EntityPosition,
        nbt: Value,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            base_name: base_name.into(),
            position,
            nbt,
        }
    }

    /// Returns the entity's position.
    #[must_use]
    pub fn position(&self) -> EntityPosition {
        self.position
    }
}

/// The extra NBT data attached to a placed block, stored at a block-grid
/// position.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct BlockEntity {
    /// The namespace of the block entity's identity.
    #[get = "pub"]
    namespace: String,
    /// The base name of the block entity's identity.
    #[get = "pub"]
    base_name: String,
    position: BlockPosition,
    /// The root of the block entity's NBT data, always a compound.
    #[get = "pub"]
    nbt: Value,
}

impl BlockEntity {
    /// Creates a block entity from its identity, position and NBT root.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        base_name: impl Into<String>,
        position: BlockPosition,
        nbt: Value,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            base_name: base_name.into(),
            position,
            nbt,
        }
    }

    /// Returns the block entity's position.
    #[must_use]
    pub fn position(&self) -> BlockPosition {
        self.position
    }

    /// Returns mutable access to the block entity's NBT root.
    pub fn nbt_mut(&mut self) -> &mut Value {
        &mut self.nbt
    }
}
