//! Errors that can occur during translation.

use crate::nbt::Kind;
use crate::object::ObjectKind;

/// Errors that can occur during translation.
///
/// Missing context (an absent NBT input or location) is never an error; it
/// is signaled through the accumulating state's `extra_needed` flag so the
/// caller can retry with more context.
#[allow(clippy::module_name_repetitions, missing_docs)]
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum TranslateError {
    #[error("an entity input already owns its NBT root, extra input must be absent")]
    ExtraInputWithEntity,
    #[error("the `{function}` instruction requires a block input")]
    BlockInputRequired { function: &'static str },
    #[error("invalid object identity `{0}`, expected `namespace:base_name`")]
    InvalidIdentifier(String),
    #[error("invalid canonical text in a mapping program: {0}")]
    SnbtError(#[from] crate::nbt::SnbtError),
    #[error("a value of kind `{from}` cannot be carried as kind `{to}`")]
    ImpossibleCast { from: Kind, to: Kind },
    #[error(transparent)]
    TemplateError(#[from] crate::version::TemplateError),
    #[error("the specification declares an NBT shape but no nbt_identifier")]
    MissingNbtIdentifier,
    #[error("no {kind} specification for `{namespace}:{base_name}` in the output version")]
    SpecificationNotFound {
        kind: ObjectKind,
        namespace: String,
        base_name: String,
    },
    #[error("the mapping program finished without resolving an output identity")]
    UnresolvedOutput,
    #[error("the current NBT position does not resolve against the input tree")]
    LostNbtPosition,
    #[error("carrying the tree root needs an explicit destination key")]
    MissingCarryKey,
}

/// The result of a translation operation.
#[allow(clippy::module_name_repetitions)]
pub type TranslateResult<T> = Result<T, TranslateError>;
