//! The mapping-program interpreter.

use crate::nbt::{resolve, Kind, NbtEdit, NbtPath, Value};
use crate::object::{Block, BlockEntity, BlockPosition, ObjectKind, PropertyValue};
use crate::program::{
    CarryNbt, Instruction, MapNbt, MappingProgram, MultiblockCase, NbtWalk, PropertyLiteral,
};

use super::error::{TranslateError, TranslateResult};
use super::state::TranslationState;
use super::world::World;

/// The per-call inputs a program is interpreted against.
///
/// Nested `multiblock` programs run against different inputs than the outer
/// program, so these travel alongside the instructions rather than living on
/// the interpreter.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inputs<'a> {
    /// The input block, for the property-driven instructions.
    pub block: Option<&'a Block>,
    /// The root of the input NBT tree, for the NBT-driven instructions.
    pub nbt: Option<&'a Value>,
    /// The input block's location, for neighbor lookups.
    pub location: Option<BlockPosition>,
}

/// An interpreter for mapping programs.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter<'w, W> {
    world: &'w W,
}

impl<'w, W: World> Interpreter<'w, W> {
    /// Creates a new interpreter over the given world view.
    #[must_use]
    pub fn new(world: &'w W) -> Self {
        Self { world }
    }

    /// Executes the program's instructions strictly in order against the
    /// given accumulating state.
    ///
    /// `nbt_path` is the current position of an enclosing NBT walk; it is
    /// [`None`] outside `map_input_nbt`.
    ///
    /// # Errors
    /// - [`TranslateError::BlockInputRequired`] if a property instruction
    ///   runs without a block input.
    /// - [`TranslateError::SnbtError`] if a program carries invalid
    ///   canonical text.
    /// - [`TranslateError::LostNbtPosition`] if the current walk position
    ///   does not resolve, which an enclosing walk must have ensured.
    #[tracing::instrument(level = "trace", skip_all, fields(instructions = program.len()))]
    pub fn interpret(
        &self,
        inputs: Inputs<'_>,
        program: &[Instruction],
        nbt_path: Option<&NbtPath>,
        state: &mut TranslationState,
    ) -> TranslateResult<()> {
        for instruction in program {
            self.apply(inputs, instruction, nbt_path, state)?;
        }
        Ok(())
    }

    fn apply(
        &self,
        inputs: Inputs<'_>,
        instruction: &Instruction,
        nbt_path: Option<&NbtPath>,
        state: &mut TranslationState,
    ) -> TranslateResult<()> {
        match instruction {
            Instruction::NewBlock(name) => state.set_output(name.clone(), ObjectKind::Block),
            Instruction::NewEntity(name) => state.set_output(name.clone(), ObjectKind::Entity),
            Instruction::NewProperties(options) => {
                for (key, literal) in options {
                    match literal {
                        PropertyLiteral::Text(text) => {
                            state.set_property(key.clone(), PropertyValue::Text(text.clone()));
                        }
                        PropertyLiteral::Tagged(tag, text) if tag == "snbt" => {
                            let value = Value::from_snbt(text)?;
                            state.set_property(key.clone(), PropertyValue::Nbt(value));
                        }
                        PropertyLiteral::Tagged(tag, _) => {
                            tracing::debug!("skipping property literal with unknown tag `{tag}`");
                        }
                    }
                }
            }
            Instruction::CarryProperties(options) => {
                let block = require_block(inputs, "carry_properties")?;
                for (key, accepted) in options {
                    if let Some(value) = block.property(key) {
                        let serialized = value.serialized();
                        if accepted.iter().any(|entry| entry.as_str() == serialized) {
                            state.set_property(key.clone(), value.clone());
                        }
                    }
                }
            }
            Instruction::MapProperties(options) => {
                let block = require_block(inputs, "map_properties")?;
                for (key, cases) in options {
                    if let Some(value) = block.property(key) {
                        if let Some(nested) = cases.get(value.serialized().as_ref()) {
                            self.interpret(inputs, nested, nbt_path, state)?;
                        }
                    }
                }
            }
            Instruction::Multiblock(cases) => self.multiblock(inputs, cases, nbt_path, state)?,
            Instruction::MapBlockName(options) => {
                let block = require_block(inputs, "map_block_name")?;
                if let Some(nested) = options.get(&block.full_name()) {
                    self.interpret(inputs, nested, nbt_path, state)?;
                }
            }
            Instruction::MapInputNbt(walk) => {
                state.mark_uncacheable();
                match inputs.nbt {
                    None => state.require_extra(),
                    Some(_) => {
                        let path = nbt_path.cloned().unwrap_or_else(NbtPath::root);
                        self.walk_nbt(inputs, walk, &path, state)?;
                    }
                }
            }
            Instruction::NewNbt(entries) => {
                for entry in entries {
                    let path = entry.path().clone().unwrap_or_else(|| {
                        nbt_path.map_or_else(Vec::new, |current| current.steps().clone())
                    });
                    let value = Value::from_snbt(entry.value())?;
                    state.push_edit(NbtEdit::new(
                        entry.outer_name().clone(),
                        entry.outer_type(),
                        path,
                        entry.key().clone(),
                        value,
                    ));
                }
            }
            Instruction::CarryNbt(options) => self.carry_nbt(inputs, options, nbt_path, state)?,
            Instruction::MapNbt(options) => self.map_nbt(inputs, options, nbt_path, state)?,
            Instruction::Unsupported(name) => {
                tracing::debug!("skipping unsupported mapping function `{name}`");
            }
        }
        Ok(())
    }

    fn multiblock(
        &self,
        inputs: Inputs<'_>,
        cases: &[MultiblockCase],
        nbt_path: Option<&NbtPath>,
        state: &mut TranslationState,
    ) -> TranslateResult<()> {
        state.mark_uncacheable();
        let Some(location) = inputs.location else {
            state.require_extra();
            return Ok(());
        };
        for case in cases {
            let [dx, dy, dz] = case.coords();
            let neighbor = location.offset(dx, dy, dz);
            let (block, block_entity) = self.world.block_and_entity_at(neighbor);
            let neighbor_inputs = Inputs {
                block: block.as_ref(),
                nbt: block_entity.as_ref().map(BlockEntity::nbt),
                location: Some(neighbor),
            };
            self.interpret(neighbor_inputs, case.functions(), nbt_path, state)?;
        }
        Ok(())
    }

    fn carry_nbt(
        &self,
        inputs: Inputs<'_>,
        options: &CarryNbt,
        nbt_path: Option<&NbtPath>,
        state: &mut TranslationState,
    ) -> TranslateResult<()> {
        state.mark_uncacheable();
        let Some(root) = inputs.nbt else {
            state.require_extra();
            return Ok(());
        };
        // only does anything within an NBT walk
        let Some(path) = nbt_path else {
            return Ok(());
        };
        let current = resolve(root, path).ok_or(TranslateError::LostNbtPosition)?;

        let (default_key, observed_kind) = match path.last_step() {
            Some(step) => (Some(step.key().clone()), step.kind()),
            None => (None, current.kind()),
        };
        let key = options
            .key()
            .clone()
            .or(default_key)
            .ok_or(TranslateError::MissingCarryKey)?;
        let kind = options.kind().unwrap_or(observed_kind);
        let value = current
            .cast_to(kind)
            .ok_or_else(|| TranslateError::ImpossibleCast {
                from: current.kind(),
                to: kind,
            })?;

        state.push_edit(NbtEdit::new(
            options.outer_name().clone().unwrap_or_default(),
            options.outer_type().unwrap_or(Kind::Compound),
            options
                .path()
                .clone()
                .unwrap_or_else(|| path.parent_steps().to_vec()),
            key,
            value,
        ));
        Ok(())
    }

    fn map_nbt(
        &self,
        inputs: Inputs<'_>,
        options: &MapNbt,
        nbt_path: Option<&NbtPath>,
        state: &mut TranslationState,
    ) -> TranslateResult<()> {
        state.mark_uncacheable();
        let Some(root) = inputs.nbt else {
            state.require_extra();
            return Ok(());
        };
        // only does anything within an NBT walk
        let Some(path) = nbt_path else {
            return Ok(());
        };
        if let Some(cases) = options.cases() {
            let current = resolve(root, path).ok_or(TranslateError::LostNbtPosition)?;
            if let Some(nested) = cases.get(&current.to_snbt()) {
                return self.interpret(inputs, nested, Some(path), state);
            }
        }
        if let Some(default) = options.default() {
            self.interpret(inputs, default, Some(path), state)?;
        }
        Ok(())
    }

    /// Mirrors the shape of the input tree at `path` against the walk node.
    ///
    /// The node's `functions` run first, with the walk fixed at the current
    /// position. Children then recurse into their matching nested nodes, or
    /// run the node's `nested_default` (a bare carry by default); a node
    /// whose runtime kind differs from its declared kind runs `self_default`
    /// instead of any structural branch.
    fn walk_nbt(
        &self,
        inputs: Inputs<'_>,
        walk: &NbtWalk,
        path: &NbtPath,
        state: &mut TranslationState,
    ) -> TranslateResult<()> {
        let root = inputs.nbt.ok_or(TranslateError::LostNbtPosition)?;
        let current = resolve(root, path).ok_or(TranslateError::LostNbtPosition)?;

        if let Some(functions) = walk.functions() {
            self.interpret(inputs, functions, Some(path), state)?;
        }

        if current.kind() != walk.kind() {
            let fallback = walk
                .self_default()
                .clone()
                .unwrap_or_else(MappingProgram::carry_through);
            return self.interpret(inputs, &fallback, Some(path), state);
        }

        match current.as_ref() {
            Value::Compound(entries) => {
                for (key, child) in entries {
                    let child_path = path.child(key.as_str(), child.kind());
                    match walk.keys().as_ref().and_then(|keys| keys.get(key)) {
                        Some(nested) => self.walk_nbt(inputs, nested, &child_path, state)?,
                        None => self.walk_fallback(inputs, walk, &child_path, state)?,
                    }
                }
            }
            Value::List(items) => {
                for (index, item) in items.iter().enumerate() {
                    let child_path = path.child(index, item.kind());
                    self.walk_index(inputs, walk, index, &child_path, state)?;
                }
            }
            Value::ByteArray(items) => {
                self.walk_array(inputs, walk, items.len(), Kind::Byte, path, state)?;
            }
            Value::IntArray(items) => {
                self.walk_array(inputs, walk, items.len(), Kind::Int, path, state)?;
            }
            Value::LongArray(items) => {
                self.walk_array(inputs, walk, items.len(), Kind::Long, path, state)?;
            }
            // remaining scalar kinds are leaves
            _ => {}
        }
        Ok(())
    }

    /// Index dispatch shared by the three array kinds; the extended path
    /// records the scalar element kind, not the container kind.
    fn walk_array(
        &self,
        inputs: Inputs<'_>,
        walk: &NbtWalk,
        len: usize,
        element_kind: Kind,
        path: &NbtPath,
        state: &mut TranslationState,
    ) -> TranslateResult<()> {
        for index in 0..len {
            let child_path = path.child(index, element_kind);
            self.walk_index(inputs, walk, index, &child_path, state)?;
        }
        Ok(())
    }

    fn walk_index(
        &self,
        inputs: Inputs<'_>,
        walk: &NbtWalk,
        index: usize,
        child_path: &NbtPath,
        state: &mut TranslationState,
    ) -> TranslateResult<()> {
        match walk
            .index()
            .as_ref()
            .and_then(|cases| cases.get(&index.to_string()))
        {
            Some(nested) => self.walk_nbt(inputs, nested, child_path, state),
            None => self.walk_fallback(inputs, walk, child_path, state),
        }
    }

    fn walk_fallback(
        &self,
        inputs: Inputs<'_>,
        walk: &NbtWalk,
        child_path: &NbtPath,
        state: &mut TranslationState,
    ) -> TranslateResult<()> {
        let fallback = walk
            .nested_default()
            .clone()
            .unwrap_or_else(MappingProgram::carry_through);
        self.interpret(inputs, &fallback, Some(child_path), state)
    }
}

fn require_block<'a>(inputs: Inputs<'a>, function: &'static str) -> TranslateResult<&'a Block> {
    inputs
        .block
        .ok_or(TranslateError::BlockInputRequired { function })
}
