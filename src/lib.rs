//! Translation engine for converting Minecraft world data between game versions.
//!
//! Given a [`Block`](object::Block) or [`Entity`](object::Entity) in one
//! version's format and the declarative mapping program for that object, the
//! engine computes the equivalent representation in another version's format.
//! It is intended to be called once per game object by an orchestration layer
//! that enumerates a world and owns persistence of the results.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod base;
pub mod nbt;
pub mod object;
pub mod program;
pub mod translate;
pub mod version;

mod util;

use base::Result;
use object::Object;
use program::MappingProgram;
use translate::{Translation, World};
use version::{Specification, SpecificationProvider};

/// Parses a mapping program from its JSON text.
///
/// # Errors
/// - If the text is not valid JSON or does not follow the mapping format.
pub fn parse_program(json: &str) -> Result<MappingProgram> {
    Ok(serde_json::from_str(json)?)
}

/// Parses an object specification from its JSON text.
///
/// # Errors
/// - If the text is not valid JSON or does not follow the specification format.
pub fn parse_specification(json: &str) -> Result<Specification> {
    Ok(serde_json::from_str(json)?)
}

/// Translates one object to the output version.
///
/// Convenience wrapper around [`translate::translate`] returning the
/// crate-level error type.
///
/// # Errors
/// - If the translation fails, see [`translate::TranslateError`].
pub fn translate<W, V>(
    world: &W,
    input: &Object,
    input_specification: &Specification,
    program: &MappingProgram,
    output_version: &V,
    location: Option<object::BlockPosition>,
    extra_input: Option<&object::BlockEntity>,
) -> Result<Translation>
where
    W: World,
    V: SpecificationProvider,
{
    Ok(translate::translate(
        world,
        input,
        input_specification,
        program,
        output_version,
        location,
        extra_input,
    )?)
}
