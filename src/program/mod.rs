//! The program module contains the declarative mapping format: an ordered
//! sequence of typed instructions driving one translation.

mod instruction;
#[doc(inline)]
pub use instruction::{
    CarryNbt, Instruction, MapNbt, MultiblockCase, NbtWalk, NewNbt, PropertyLiteral,
};

use derive_more::{Deref, From};

/// An ordered sequence of instructions.
///
/// Programs are version-pair specific and read-only; they are produced by
/// the specification-loading layer, typically by parsing the JSON mapping
/// format with [`serde_json`].
#[derive(Debug, Clone, PartialEq, Default, Deref, From, serde::Deserialize)]
pub struct MappingProgram(Vec<Instruction>);

impl MappingProgram {
    /// Creates a program from its instructions.
    #[must_use]
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self(instructions)
    }

    /// The implicit fallback program that copies the current NBT position
    /// through unchanged.
    #[must_use]
    pub(crate) fn carry_through() -> Self {
        Self(vec![Instruction::CarryNbt(CarryNbt::default())])
    }
}
