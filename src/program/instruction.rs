//! The typed instructions of the mapping format.
//!
//! One JSON mapping instruction is an object `{"function": <name>,
//! "options": <shape depending on the name>}`. Deserialization goes through
//! a raw carrier so that each instruction's options are parsed into the
//! matching typed variant, and unknown function names are retained as
//! [`Instruction::Unsupported`] instead of failing the whole program.

use std::collections::BTreeMap;

use getset::Getters;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::nbt::{Kind, PathKey, PathStep};

use super::MappingProgram;

/// One instruction of a mapping program.
#[derive(Debug, Clone, PartialEq)]
pub enum Instruction {
    /// Sets the output identity to a block of the given `namespace:base_name`.
    NewBlock(String),
    /// Sets the output identity to an entity of the given `namespace:base_name`.
    NewEntity(String),
    /// Writes the given property values unconditionally.
    NewProperties(BTreeMap<String, PropertyLiteral>),
    /// Copies input properties through when their serialized form is accepted.
    CarryProperties(BTreeMap<String, Vec<String>>),
    /// Runs a nested program selected by an input property's serialized form.
    MapProperties(BTreeMap<String, BTreeMap<String, MappingProgram>>),
    /// Runs nested programs against neighboring blocks.
    Multiblock(Vec<MultiblockCase>),
    /// Runs a nested program selected by the input block's full name.
    MapBlockName(BTreeMap<String, MappingProgram>),
    /// Walks the input NBT tree against a mirrored specification tree.
    MapInputNbt(NbtWalk),
    /// Appends pending NBT writes, independent of any NBT input.
    NewNbt(Vec<NewNbt>),
    /// Copies the value at the current NBT position to a destination.
    CarryNbt(CarryNbt),
    /// Runs a nested program selected by the current NBT value's canonical text.
    MapNbt(MapNbt),
    /// An instruction this engine does not know; skipped when interpreted.
    Unsupported(String),
}

/// A literal property value in `new_properties` options: either a plain
/// string, or a tagged pair like `["snbt", "54b"]`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum PropertyLiteral {
    Text(String),
    Tagged(String, String),
}

/// One neighbor case of a `multiblock` instruction.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct MultiblockCase {
    coords: [i32; 3],
    /// The program to run against the neighbor.
    #[get = "pub"]
    functions: MappingProgram,
}

impl MultiblockCase {
    /// Returns the neighbor's offset from the input block.
    #[must_use]
    pub fn coords(&self) -> [i32; 3] {
        self.coords
    }
}

/// One node of the mirrored specification tree walked by `map_input_nbt`.
///
/// `keys` dispatches compound children, `index` dispatches list and array
/// elements (by decimal string). Children absent from the dispatch maps run
/// `nested_default`, and a node whose runtime kind differs from `type` runs
/// `self_default`; both fall back to a single bare `carry_nbt`.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct NbtWalk {
    #[serde(rename = "type")]
    kind: Kind,
    /// The program run at this node before any recursion.
    #[get = "pub"]
    #[serde(default)]
    functions: Option<MappingProgram>,
    /// The program run instead of recursion on a kind mismatch.
    #[get = "pub"]
    #[serde(default)]
    self_default: Option<MappingProgram>,
    /// Nested nodes for compound children, by key.
    #[get = "pub"]
    #[serde(default)]
    keys: Option<BTreeMap<String, NbtWalk>>,
    /// Nested nodes for list/array elements, by decimal index.
    #[get = "pub"]
    #[serde(default)]
    index: Option<BTreeMap<String, NbtWalk>>,
    /// The program run for children absent from `keys`/`index`.
    #[get = "pub"]
    #[serde(default)]
    nested_default: Option<MappingProgram>,
}

impl NbtWalk {
    /// Returns the kind this node expects the input value to have.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.kind
    }
}

/// One pending write described by a `new_nbt` instruction.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct NewNbt {
    /// The name of the outer tree the write targets.
    #[get = "pub"]
    #[serde(default)]
    outer_name: String,
    #[serde(default = "compound_kind")]
    outer_type: Kind,
    /// The declared path to the receiving container; when absent, the
    /// current walk position's path is used, or the root outside a walk.
    #[get = "pub"]
    #[serde(default)]
    path: Option<Vec<PathStep>>,
    /// The key or index the value is written under.
    #[get = "pub"]
    key: PathKey,
    /// The value to write, as canonical text.
    #[get = "pub"]
    value: String,
}

impl NewNbt {
    /// Returns the declared kind of the targeted outer tree's root.
    #[must_use]
    pub fn outer_type(&self) -> Kind {
        self.outer_type
    }
}

fn compound_kind() -> Kind {
    Kind::Compound
}

/// The options of a `carry_nbt` instruction; with none given, the value at
/// the current walk position is copied through unchanged.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Getters)]
pub struct CarryNbt {
    /// Redirected outer tree name.
    #[get = "pub"]
    #[serde(default)]
    outer_name: Option<String>,
    /// Redirected outer tree root kind.
    #[get = "pub"]
    #[serde(default)]
    outer_type: Option<Kind>,
    /// Redirected destination path; the current position's parent when absent.
    #[get = "pub"]
    #[serde(default)]
    path: Option<Vec<PathStep>>,
    /// Redirected destination key; the current position's key when absent.
    #[get = "pub"]
    #[serde(default)]
    key: Option<PathKey>,
    /// Redirected value kind; the observed kind when absent.
    #[get = "pub"]
    #[serde(default, rename = "type")]
    kind: Option<Kind>,
}

/// The options of a `map_nbt` instruction.
#[derive(Debug, Clone, PartialEq, Deserialize, Getters)]
pub struct MapNbt {
    /// Nested programs keyed by the current value's canonical text.
    #[get = "pub"]
    #[serde(default)]
    cases: Option<BTreeMap<String, MappingProgram>>,
    /// The program run when no case matches.
    #[get = "pub"]
    #[serde(default)]
    default: Option<MappingProgram>,
}

/// The raw `{"function", "options"}` carrier one instruction arrives as.
#[derive(Deserialize)]
struct RawInstruction {
    function: String,
    #[serde(default)]
    options: Option<serde_json::Value>,
}

/// Options that accept a single entry where a list of entries is meant.
#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> From<OneOrMany<T>> for Vec<T> {
    fn from(value: OneOrMany<T>) -> Self {
        match value {
            OneOrMany::One(entry) => vec![entry],
            OneOrMany::Many(entries) => entries,
        }
    }
}

impl<'de> Deserialize<'de> for Instruction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawInstruction::deserialize(deserializer)?;
        parse_instruction(raw).map_err(serde::de::Error::custom)
    }
}

fn parse_instruction(raw: RawInstruction) -> Result<Instruction, String> {
    let instruction = match raw.function.as_str() {
        "new_block" => Instruction::NewBlock(required(&raw, "new_block")?),
        "new_entity" => Instruction::NewEntity(required(&raw, "new_entity")?),
        "new_properties" => Instruction::NewProperties(required(&raw, "new_properties")?),
        "carry_properties" => Instruction::CarryProperties(required(&raw, "carry_properties")?),
        "map_properties" => Instruction::MapProperties(required(&raw, "map_properties")?),
        "multiblock" => Instruction::Multiblock(
            required::<OneOrMany<MultiblockCase>>(&raw, "multiblock")?.into(),
        ),
        "map_block_name" => Instruction::MapBlockName(required(&raw, "map_block_name")?),
        "map_input_nbt" => Instruction::MapInputNbt(required(&raw, "map_input_nbt")?),
        "new_nbt" => Instruction::NewNbt(required::<OneOrMany<NewNbt>>(&raw, "new_nbt")?.into()),
        "carry_nbt" => Instruction::CarryNbt(optional(&raw, "carry_nbt")?),
        "map_nbt" => Instruction::MapNbt(required(&raw, "map_nbt")?),
        _ => Instruction::Unsupported(raw.function.clone()),
    };
    Ok(instruction)
}

fn required<T: DeserializeOwned>(raw: &RawInstruction, function: &str) -> Result<T, String> {
    let options = raw
        .options
        .clone()
        .ok_or_else(|| format!("missing options for `{function}`"))?;
    serde_json::from_value(options)
        .map_err(|err| format!("invalid options for `{function}`: {err}"))
}

fn optional<T: DeserializeOwned + Default>(
    raw: &RawInstruction,
    function: &str,
) -> Result<T, String> {
    raw.options.clone().map_or_else(
        || Ok(T::default()),
        |options| {
            serde_json::from_value(options)
                .map_err(|err| format!("invalid options for `{function}`: {err}"))
        },
    )
}
