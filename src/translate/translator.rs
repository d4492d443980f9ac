//! The translation façade: orchestrates one conversion from input object to
//! output object.

use std::collections::BTreeMap;

use getset::Getters;

use crate::nbt::{apply_edits, Kind, NbtEdit, Value};
use crate::object::{
    Block, BlockEntity, BlockPosition, Entity, EntityPosition, Object, ObjectKind, PropertyValue,
};
use crate::program::MappingProgram;
use crate::version::{Specification, SpecificationProvider};

use super::error::{TranslateError, TranslateResult};
use super::interpreter::{Inputs, Interpreter};
use super::state::TranslationState;
use super::world::World;

/// The outcome of one translation.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Translation {
    /// The translated object.
    #[get = "pub"]
    output: Object,
    /// The block entity synthesized for a block output whose specification
    /// declares an NBT shape, with the accumulated edits applied.
    #[get = "pub"]
    extra_output: Option<BlockEntity>,
    /// Every NBT edit the program accumulated, for callers that materialize
    /// the output tree themselves.
    #[get = "pub"]
    pending_edits: Vec<NbtEdit>,
    extra_needed: bool,
    cacheable: bool,
}

impl Translation {
    /// Whether more context (a location, or NBT input) is needed for a full
    /// result; the caller may retry with it.
    #[must_use]
    pub fn extra_needed(&self) -> bool {
        self.extra_needed
    }

    /// Whether the result depended on nothing beyond the raw input, so an
    /// external cache may key it on the input alone.
    #[must_use]
    pub fn cacheable(&self) -> bool {
        self.cacheable
    }
}

/// Translates one object to the output version.
///
/// For a block input whose specification declares an NBT shape, the block
/// entity at `location` is read from the world, or synthesized from the
/// specification's defaults if the world has none there. `extra_input` can
/// supply that block entity directly when no location is known.
///
/// # Errors
/// - [`TranslateError::ExtraInputWithEntity`] if an entity input is
///   combined with `extra_input` (an entity already owns its NBT root).
/// - [`TranslateError::UnresolvedOutput`] if the program never resolves an
///   output identity.
/// - [`TranslateError::SpecificationNotFound`] if the output version lacks
///   the resolved object.
/// - Any error of [`Interpreter::interpret`].
#[tracing::instrument(level = "trace", skip_all, fields(input = %input.full_name()))]
pub fn translate<W, V>(
    world: &W,
    input: &Object,
    input_specification: &Specification,
    program: &MappingProgram,
    output_version: &V,
    location: Option<BlockPosition>,
    extra_input: Option<&BlockEntity>,
) -> TranslateResult<Translation>
where
    W: World,
    V: SpecificationProvider,
{
    let mut fetched: Option<BlockEntity> = None;
    let (block_input, nbt_input): (Option<&Block>, Option<&Value>) = match input {
        Object::Block(block) => {
            let effective = match location {
                Some(position) if input_specification.has_nbt() => {
                    fetched = world.tile_entity_at(position);
                    if fetched.is_none() {
                        // no block entity in the world, create one from the
                        // input specification (never written back)
                        fetched = Some(synthesize_block_entity(
                            input_specification,
                            BlockPosition::default(),
                        )?);
                    }
                    fetched.as_ref()
                }
                // a caller-supplied block entity is used as-is
                _ => extra_input,
            };
            (Some(block), effective.map(BlockEntity::nbt))
        }
        Object::Entity(entity) => {
            if extra_input.is_some() {
                return Err(TranslateError::ExtraInputWithEntity);
            }
            (None, Some(entity.nbt()))
        }
    };

    let mut state = TranslationState::new();
    Interpreter::new(world).interpret(
        Inputs {
            block: block_input,
            nbt: nbt_input,
            location,
        },
        program,
        None,
        &mut state,
    )?;

    materialize(output_version, state)
}

/// Turns the final accumulated state into concrete output objects.
fn materialize<V: SpecificationProvider>(
    output_version: &V,
    state: TranslationState,
) -> TranslateResult<Translation> {
    let (output_name, output_kind, properties, pending_edits, extra_needed, cacheable) =
        state.dissolve();
    let name = output_name.ok_or(TranslateError::UnresolvedOutput)?;
    let kind = output_kind.ok_or(TranslateError::UnresolvedOutput)?;
    let (namespace, base_name) = split_identifier(&name)?;
    let specification = output_version
        .specification(kind, namespace, base_name)
        .ok_or_else(|| TranslateError::SpecificationNotFound {
            kind,
            namespace: namespace.to_string(),
            base_name: base_name.to_string(),
        })?;

    let (output, extra_output) = match kind {
        ObjectKind::Block => {
            // seed from the output specification's defaults, then let the
            // program's accumulated properties win
            let mut merged: BTreeMap<String, PropertyValue> = specification
                .defaults()
                .iter()
                .map(|(key, value)| (key.clone(), PropertyValue::Text(value.clone())))
                .collect();
            merged.extend(properties);
            let block = Block::new(namespace, base_name, merged);

            let extra_output = if specification.has_nbt() {
                let mut block_entity =
                    synthesize_block_entity(&specification, BlockPosition::default())?;
                apply_edits(block_entity.nbt_mut(), &pending_edits);
                Some(block_entity)
            } else {
                None
            };
            (Object::Block(block), extra_output)
        }
        ObjectKind::Entity => {
            let mut nbt = specification
                .synthesize_nbt()?
                .unwrap_or_else(|| Kind::Compound.default_value());
            apply_edits(&mut nbt, &pending_edits);
            let entity = Entity::new(namespace, base_name, EntityPosition::default(), nbt);
            (Object::Entity(entity), None)
        }
    };

    Ok(Translation {
        output,
        extra_output,
        pending_edits,
        extra_needed,
        cacheable,
    })
}

/// Builds a block entity from a specification's NBT identity and templates.
///
/// The coordinates are left zeroed; placing the result is the caller's
/// responsibility, since no location may be known at this point.
fn synthesize_block_entity(
    specification: &Specification,
    position: BlockPosition,
) -> TranslateResult<BlockEntity> {
    let identifier = specification
        .nbt_identifier()
        .as_deref()
        .ok_or(TranslateError::MissingNbtIdentifier)?;
    let (namespace, base_name) = split_identifier(identifier)?;
    let nbt = specification
        .synthesize_nbt()?
        .unwrap_or_else(|| Kind::Compound.default_value());
    Ok(BlockEntity::new(namespace, base_name, position, nbt))
}

fn split_identifier(full: &str) -> TranslateResult<(&str, &str)> {
    full.split_once(':')
        .ok_or_else(|| TranslateError::InvalidIdentifier(full.to_string()))
}
