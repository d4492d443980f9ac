use std::collections::BTreeMap;

use mctranslate::nbt::{Kind, NbtPath, PathKey, Value};
use mctranslate::object::{Block, BlockEntity, BlockPosition, PropertyValue};
use mctranslate::program::MappingProgram;
use mctranslate::translate::{Inputs, Interpreter, TranslationState, World};

struct NullWorld;

impl World for NullWorld {
    fn tile_entity_at(&self, _position: BlockPosition) -> Option<BlockEntity> {
        None
    }
}

fn program(json: &str) -> MappingProgram {
    mctranslate::parse_program(json).expect("program should parse")
}

fn granite_block() -> Block {
    Block::new(
        "old",
        "stone",
        BTreeMap::from([("variant".to_string(), PropertyValue::from("granite"))]),
    )
}

fn run(
    inputs: Inputs<'_>,
    program: &MappingProgram,
    nbt_path: Option<&NbtPath>,
    state: &mut TranslationState,
) {
    Interpreter::new(&NullWorld)
        .interpret(inputs, program, nbt_path, state)
        .expect("interpretation should succeed");
}

#[test]
fn carry_properties_is_idempotent() {
    let block = granite_block();
    let inputs = Inputs {
        block: Some(&block),
        ..Inputs::default()
    };
    let carry = program(r#"[{"function": "carry_properties", "options": {"variant": ["granite", "diorite"], "absent": ["x"]}}]"#);

    let mut state = TranslationState::new();
    run(inputs, &carry, None, &mut state);
    let after_once = state.properties().clone();
    run(inputs, &carry, None, &mut state);

    assert_eq!(state.properties(), &after_once);
    assert_eq!(
        after_once,
        BTreeMap::from([("variant".to_string(), PropertyValue::from("granite"))])
    );
}

#[test]
fn carry_properties_rejects_unaccepted_values() {
    let block = granite_block();
    let inputs = Inputs {
        block: Some(&block),
        ..Inputs::default()
    };
    let carry = program(r#"[{"function": "carry_properties", "options": {"variant": ["diorite"]}}]"#);

    let mut state = TranslationState::new();
    run(inputs, &carry, None, &mut state);
    assert!(state.properties().is_empty());
}

#[test]
fn map_properties_runs_at_most_one_nested_program() {
    let block = granite_block();
    let inputs = Inputs {
        block: Some(&block),
        ..Inputs::default()
    };
    let map = program(
        r#"[{
            "function": "map_properties",
            "options": {
                "variant": {
                    "granite": [{"function": "new_properties", "options": {"matched": "granite"}}],
                    "diorite": [{"function": "new_properties", "options": {"matched": "diorite"}}]
                }
            }
        }]"#,
    );

    let mut state = TranslationState::new();
    run(inputs, &map, None, &mut state);
    assert_eq!(
        state.properties(),
        &BTreeMap::from([("matched".to_string(), PropertyValue::from("granite"))])
    );
}

#[test]
fn map_block_name_falls_through_on_absent_entry() {
    let block = granite_block();
    let inputs = Inputs {
        block: Some(&block),
        ..Inputs::default()
    };
    let map = program(
        r#"[{
            "function": "map_block_name",
            "options": {"other:block": [{"function": "new_block", "options": "new:other"}]}
        }]"#,
    );

    let mut state = TranslationState::new();
    run(inputs, &map, None, &mut state);
    assert_eq!(state.output_name(), None);
    assert!(state.cacheable());
    assert!(!state.extra_needed());
}

#[test]
fn new_nbt_appends_one_edit_per_entry_without_nbt_input() {
    let new_nbt = program(
        r#"[{
            "function": "new_nbt",
            "options": [
                {"key": "Base", "value": "11"},
                {"key": "Lock", "value": "\"combination\""},
                {"outer_name": "second", "outer_type": "list", "path": [], "key": 0, "value": "1b"}
            ]
        }]"#,
    );

    let mut state = TranslationState::new();
    run(Inputs::default(), &new_nbt, None, &mut state);

    let edits = state.nbt_edits();
    assert_eq!(edits.len(), 3);
    assert_eq!(edits[0].key(), &PathKey::from("Base"));
    assert_eq!(edits[0].value(), &Value::Int(11));
    assert_eq!(
        edits[1].value(),
        &Value::String("combination".to_string())
    );
    assert_eq!(edits[2].outer_name(), "second");
    assert_eq!(edits[2].outer_kind(), Kind::List);
    assert_eq!(edits[2].key(), &PathKey::from(0_usize));
    // appending edits needs no NBT input
    assert!(!state.extra_needed());
}

#[test]
fn multiblock_without_location_only_requests_extra_context() {
    let multiblock = program(
        r#"[{
            "function": "multiblock",
            "options": {"coords": [0, 1, 0], "functions": [{"function": "new_block", "options": "new:upper"}]}
        }]"#,
    );

    let mut state = TranslationState::new();
    run(Inputs::default(), &multiblock, None, &mut state);

    assert!(state.extra_needed());
    assert!(!state.cacheable());
    assert_eq!(state.output_name(), None);
    assert!(state.properties().is_empty());
    assert!(state.nbt_edits().is_empty());
}

struct NeighborWorld {
    neighbor: Block,
}

impl World for NeighborWorld {
    fn tile_entity_at(&self, _position: BlockPosition) -> Option<BlockEntity> {
        None
    }

    fn block_and_entity_at(&self, position: BlockPosition) -> (Option<Block>, Option<BlockEntity>) {
        if position == BlockPosition::new(4, 6, 5) {
            (Some(self.neighbor.clone()), None)
        } else {
            (None, None)
        }
    }
}

#[test]
fn multiblock_interprets_against_the_neighbor() {
    let world = NeighborWorld {
        neighbor: Block::new("old", "bed_head", BTreeMap::new()),
    };
    let multiblock = program(
        r#"[{
            "function": "multiblock",
            "options": [{
                "coords": [0, 1, 0],
                "functions": [{
                    "function": "map_block_name",
                    "options": {"old:bed_head": [{"function": "new_properties", "options": {"part": "head"}}]}
                }]
            }]
        }]"#,
    );

    let mut state = TranslationState::new();
    Interpreter::new(&world)
        .interpret(
            Inputs {
                location: Some(BlockPosition::new(4, 5, 5)),
                ..Inputs::default()
            },
            &multiblock,
            None,
            &mut state,
        )
        .expect("interpretation should succeed");

    assert_eq!(
        state.properties(),
        &BTreeMap::from([("part".to_string(), PropertyValue::from("head"))])
    );
    assert!(!state.extra_needed());
    assert!(!state.cacheable());
}

#[test]
fn map_input_nbt_without_nbt_input_only_requests_extra_context() {
    let map = program(r#"[{"function": "map_input_nbt", "options": {"type": "compound"}}]"#);

    let mut state = TranslationState::new();
    run(Inputs::default(), &map, None, &mut state);

    assert!(state.extra_needed());
    assert!(!state.cacheable());
    assert!(state.nbt_edits().is_empty());
}

#[test]
fn nbt_walk_dispatches_keys_and_carries_the_rest() {
    let root = Value::Compound(BTreeMap::from([
        ("a".to_string(), Value::Int(1)),
        ("b".to_string(), Value::String("x".to_string())),
    ]));
    let walk = program(
        r#"[{
            "function": "map_input_nbt",
            "options": {
                "type": "compound",
                "keys": {
                    "a": {
                        "type": "int",
                        "functions": [{"function": "new_properties", "options": {"p": "yes"}}]
                    }
                }
            }
        }]"#,
    );

    let mut state = TranslationState::new();
    run(
        Inputs {
            nbt: Some(&root),
            ..Inputs::default()
        },
        &walk,
        None,
        &mut state,
    );

    assert_eq!(
        state.properties().get("p"),
        Some(&PropertyValue::from("yes"))
    );
    // `b` is absent from `keys`, the default carry copies it unchanged
    let edits = state.nbt_edits();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].key(), &PathKey::from("b"));
    assert_eq!(edits[0].value(), &Value::String("x".to_string()));
    assert_eq!(edits[0].path(), &Vec::new());
    assert_eq!(edits[0].outer_kind(), Kind::Compound);
}

#[test]
fn nbt_walk_runs_self_default_on_kind_mismatch() {
    let root = Value::Compound(BTreeMap::from([(
        "CustomName".to_string(),
        Value::Int(7),
    )]));
    let walk = program(
        r#"[{
            "function": "map_input_nbt",
            "options": {
                "type": "compound",
                "keys": {
                    "CustomName": {
                        "type": "string",
                        "self_default": [{"function": "new_properties", "options": {"mismatched": "yes"}}]
                    }
                }
            }
        }]"#,
    );

    let mut state = TranslationState::new();
    run(
        Inputs {
            nbt: Some(&root),
            ..Inputs::default()
        },
        &walk,
        None,
        &mut state,
    );

    // the replacement program ran instead of any structural branch
    assert_eq!(
        state.properties().get("mismatched"),
        Some(&PropertyValue::from("yes"))
    );
    assert!(state.nbt_edits().is_empty());
}

#[test]
fn nbt_walk_extends_array_paths_with_the_element_kind() {
    let root = Value::Compound(BTreeMap::from([(
        "pattern".to_string(),
        Value::IntArray(vec![3, 4]),
    )]));
    let walk = program(
        r#"[{
            "function": "map_input_nbt",
            "options": {
                "type": "compound",
                "keys": {"pattern": {"type": "int_array"}}
            }
        }]"#,
    );

    let mut state = TranslationState::new();
    run(
        Inputs {
            nbt: Some(&root),
            ..Inputs::default()
        },
        &walk,
        None,
        &mut state,
    );

    let edits = state.nbt_edits();
    assert_eq!(edits.len(), 2);
    assert_eq!(edits[0].value(), &Value::Int(3));
    assert_eq!(edits[0].key(), &PathKey::from(0_usize));
    // the destination path records the array step, typed by element
    let step = &edits[0].path()[0];
    assert_eq!(step.key(), &PathKey::from("pattern"));
    assert_eq!(step.kind(), Kind::IntArray);
}

#[test]
fn map_nbt_runs_exactly_one_branch() {
    let root = Value::Compound(BTreeMap::from([("Power".to_string(), Value::Byte(1))]));
    let path = NbtPath::root().child("Power", Kind::Byte);
    let map = program(
        r#"[{
            "function": "map_nbt",
            "options": {
                "cases": {
                    "1b": [{"function": "new_properties", "options": {"powered": "true"}}],
                    "0b": [{"function": "new_properties", "options": {"powered": "false"}}]
                },
                "default": [{"function": "new_properties", "options": {"powered": "unknown"}}]
            }
        }]"#,
    );

    let mut state = TranslationState::new();
    run(
        Inputs {
            nbt: Some(&root),
            ..Inputs::default()
        },
        &map,
        Some(&path),
        &mut state,
    );
    assert_eq!(
        state.properties(),
        &BTreeMap::from([("powered".to_string(), PropertyValue::from("true"))])
    );

    // no case matches the value, only the default runs
    let other = Value::Compound(BTreeMap::from([("Power".to_string(), Value::Byte(5))]));
    let mut state = TranslationState::new();
    run(
        Inputs {
            nbt: Some(&other),
            ..Inputs::default()
        },
        &map,
        Some(&path),
        &mut state,
    );
    assert_eq!(
        state.properties(),
        &BTreeMap::from([("powered".to_string(), PropertyValue::from("unknown"))])
    );
}

#[test]
fn carry_nbt_redirects_the_destination() {
    let root = Value::Compound(BTreeMap::from([("BurnTime".to_string(), Value::Short(20))]));
    let path = NbtPath::root().child("BurnTime", Kind::Short);
    let carry = program(
        r#"[{
            "function": "carry_nbt",
            "options": {"key": "CookTime", "type": "int"}
        }]"#,
    );

    let mut state = TranslationState::new();
    run(
        Inputs {
            nbt: Some(&root),
            ..Inputs::default()
        },
        &carry,
        Some(&path),
        &mut state,
    );

    let edits = state.nbt_edits();
    assert_eq!(edits.len(), 1);
    assert_eq!(edits[0].key(), &PathKey::from("CookTime"));
    assert_eq!(edits[0].value(), &Value::Int(20));
    assert!(!state.cacheable());
}

#[test]
fn block_instructions_without_a_block_input_are_structural_failures() {
    let carry = program(r#"[{"function": "carry_properties", "options": {"variant": ["granite"]}}]"#);
    let mut state = TranslationState::new();
    let result = Interpreter::new(&NullWorld).interpret(Inputs::default(), &carry, None, &mut state);
    assert!(result.is_err());
}

#[test]
fn later_instructions_overwrite_earlier_output_identity() {
    let block = granite_block();
    let inputs = Inputs {
        block: Some(&block),
        ..Inputs::default()
    };
    let overwrite = program(
        r#"[
            {"function": "new_block", "options": "new:first"},
            {"function": "new_properties", "options": {"p": "1"}},
            {"function": "new_entity", "options": "new:second"},
            {"function": "new_properties", "options": {"p": "2"}}
        ]"#,
    );

    let mut state = TranslationState::new();
    run(inputs, &overwrite, None, &mut state);
    assert_eq!(state.output_name(), Some("new:second"));
    assert_eq!(
        state.properties().get("p"),
        Some(&PropertyValue::from("2"))
    );
}
