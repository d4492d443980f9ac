//! The game objects the engine translates between: blocks, entities and the
//! block entities that carry extra NBT data for a placed block.

mod block;
#[doc(inline)]
pub use block::{Block, PropertyValue};

mod entity;
#[doc(inline)]
pub use entity::{BlockEntity, Entity};

use derive_more::From;
use enum_as_inner::EnumAsInner;
use strum_macros::{Display, EnumString};

/// Which of the two object forms an identity refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
#[allow(missing_docs)]
pub enum ObjectKind {
    Block,
    Entity,
}

/// A block-grid position in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[allow(missing_docs)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    /// Creates a position from its coordinates.
    #[must_use]
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Returns the position shifted by the given offsets.
    #[must_use]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

/// A free position in the world.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[allow(missing_docs)]
pub struct EntityPosition {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl EntityPosition {
    /// Creates a position from its coordinates.
    #[must_use]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Either of the two object forms a translation reads from or produces.
#[derive(Debug, Clone, PartialEq, From, EnumAsInner)]
#[allow(missing_docs)]
pub enum Object {
    Block(Block),
    Entity(Entity),
}

impl Object {
    /// Returns the `namespace:base_name` form of the object's identity.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self {
            Self::Block(block) => block.full_name(),
            Self::Entity(entity) => format!("{}:{}", entity.namespace(), entity.base_name()),
        }
    }
}
