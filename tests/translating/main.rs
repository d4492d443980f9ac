use std::collections::BTreeMap;

use mctranslate::nbt::Value;
use mctranslate::object::{
    Block, BlockEntity, BlockPosition, Entity, EntityPosition, Object, ObjectKind, PropertyValue,
};
use mctranslate::program::MappingProgram;
use mctranslate::translate::{translate, TranslateError, World};
use mctranslate::version::{Specification, SpecificationProvider};

struct NullWorld;

impl World for NullWorld {
    fn tile_entity_at(&self, _position: BlockPosition) -> Option<BlockEntity> {
        None
    }
}

/// Serves the specifications of the fictional output version `new`.
struct NewVersion;

impl SpecificationProvider for NewVersion {
    fn specification(
        &self,
        kind: ObjectKind,
        namespace: &str,
        base_name: &str,
    ) -> Option<Specification> {
        let json = match (kind, namespace, base_name) {
            (ObjectKind::Block, "new", "granite") => r#"{"defaults": {"variant": "stone", "polished": "false"}}"#,
            (ObjectKind::Block, "new", "chest") => {
                r#"{
                    "defaults": {"facing": "north"},
                    "nbt_identifier": "new:chest",
                    "nbt": {
                        "Items": {"type": "list", "val": []},
                        "Lock": {"type": "string", "val": ""}
                    }
                }"#
            }
            (ObjectKind::Entity, "new", "pig") => {
                r#"{"nbt": {"Health": {"type": "float", "val": 10.0}}}"#
            }
            _ => return None,
        };
        mctranslate::parse_specification(json).ok()
    }
}

fn program(json: &str) -> MappingProgram {
    mctranslate::parse_program(json).expect("program should parse")
}

fn specification(json: &str) -> Specification {
    mctranslate::parse_specification(json).expect("specification should parse")
}

#[test]
fn translate_granite_block() {
    let input = Object::Block(Block::new(
        "old",
        "stone",
        BTreeMap::from([("variant".to_string(), PropertyValue::from("granite"))]),
    ));
    let translation = translate(
        &NullWorld,
        &input,
        &Specification::default(),
        &program(include_str!("./granite.json")),
        &NewVersion,
        None,
        None,
    )
    .expect("translation should succeed");

    let output = translation
        .output()
        .as_block()
        .expect("a block output was mapped");
    assert_eq!(output.full_name(), "new:granite");
    // the carried property wins over the output default, the untouched
    // default stays seeded
    assert_eq!(
        output.properties(),
        &BTreeMap::from([
            ("variant".to_string(), PropertyValue::from("granite")),
            ("polished".to_string(), PropertyValue::from("false")),
        ])
    );
    assert!(!translation.extra_needed());
    assert!(translation.cacheable());
    assert_eq!(translation.extra_output(), &None);
}

#[test]
fn translate_chest_carries_nbt_into_the_output_block_entity() {
    let input = Object::Block(Block::new("old", "chest", BTreeMap::new()));
    let input_specification = specification(
        r#"{
            "nbt_identifier": "old:chest",
            "nbt": {
                "Items": {"type": "list", "val": []},
                "Lock": {"type": "string", "val": ""}
            }
        }"#,
    );

    let stored = Value::from_snbt(r#"{Items:[{Slot:0b}], Lock:"secret", Junk:1b}"#)
        .expect("stored NBT should parse");
    let location = BlockPosition::new(2, 3, 4);

    struct ChestWorld {
        chest: BlockEntity,
    }
    impl World for ChestWorld {
        fn tile_entity_at(&self, position: BlockPosition) -> Option<BlockEntity> {
            (position == self.chest.position()).then(|| self.chest.clone())
        }
    }
    let world = ChestWorld {
        chest: BlockEntity::new("old", "chest", location, stored),
    };

    let translation = translate(
        &world,
        &input,
        &input_specification,
        &program(include_str!("./chest.json")),
        &NewVersion,
        Some(location),
        None,
    )
    .expect("translation should succeed");

    let output = translation
        .output()
        .as_block()
        .expect("a block output was mapped");
    assert_eq!(output.full_name(), "new:chest");

    // the walk read the stored block entity, so the result depends on more
    // than the raw block
    assert!(!translation.cacheable());
    assert!(!translation.extra_needed());

    let extra_output = translation
        .extra_output()
        .as_ref()
        .expect("the output specification declares an NBT shape");
    assert_eq!(extra_output.namespace(), "new");
    assert_eq!(extra_output.base_name(), "chest");
    // `Items` and `Lock` carried over the synthesized defaults, `Junk`
    // dropped by its walk entry
    assert_eq!(
        extra_output.nbt(),
        &Value::from_snbt(r#"{Items:[{Slot:0b}], Lock:"secret"}"#).expect("expected NBT"),
    );
}

#[test]
fn translate_synthesizes_missing_input_block_entities() {
    let input = Object::Block(Block::new("old", "chest", BTreeMap::new()));
    let input_specification = specification(
        r#"{
            "nbt_identifier": "old:chest",
            "nbt": {"Lock": {"type": "string", "val": "unset"}}
        }"#,
    );

    // nothing stored at the location, the walk sees the specification's
    // defaults instead
    let translation = translate(
        &NullWorld,
        &input,
        &input_specification,
        &program(include_str!("./chest.json")),
        &NewVersion,
        Some(BlockPosition::new(0, 0, 0)),
        None,
    )
    .expect("translation should succeed");

    let extra_output = translation
        .extra_output()
        .as_ref()
        .expect("the output specification declares an NBT shape");
    assert_eq!(
        extra_output.nbt(),
        &Value::from_snbt(r#"{Items:[], Lock:"unset"}"#).expect("expected NBT"),
    );
}

#[test]
fn translate_entity_applies_edits_to_the_synthesized_output() {
    let nbt = Value::from_snbt(r#"{Health:3.5f, Saddle:1b}"#).expect("input NBT should parse");
    let input = Object::Entity(Entity::new(
        "old",
        "pig",
        EntityPosition::new(0.5, 64.0, 0.5),
        nbt,
    ));
    let pig = program(
        r#"[
            {"function": "new_entity", "options": "new:pig"},
            {"function": "map_input_nbt", "options": {"type": "compound"}}
        ]"#,
    );

    let translation = translate(
        &NullWorld,
        &input,
        &Specification::default(),
        &pig,
        &NewVersion,
        None,
        None,
    )
    .expect("translation should succeed");

    let output = translation
        .output()
        .as_entity()
        .expect("an entity output was mapped");
    assert_eq!(output.namespace(), "new");
    assert_eq!(output.base_name(), "pig");
    // everything carried through over the specification default
    assert_eq!(
        output.nbt(),
        &Value::from_snbt(r#"{Health:3.5f, Saddle:1b}"#).expect("expected NBT"),
    );
    assert!(!translation.cacheable());
}

#[test]
fn translate_rejects_entity_input_with_extra_input() {
    let input = Object::Entity(Entity::new(
        "old",
        "pig",
        EntityPosition::default(),
        Value::Compound(BTreeMap::new()),
    ));
    let extra = BlockEntity::new(
        "old",
        "chest",
        BlockPosition::default(),
        Value::Compound(BTreeMap::new()),
    );

    let result = translate(
        &NullWorld,
        &input,
        &Specification::default(),
        &MappingProgram::default(),
        &NewVersion,
        None,
        Some(&extra),
    );
    assert_eq!(result, Err(TranslateError::ExtraInputWithEntity));
}

#[test]
fn translate_signals_missing_context_and_keeps_the_partial_output() {
    let input = Object::Block(Block::new("old", "chest", BTreeMap::new()));
    let input_specification = specification(
        r#"{
            "nbt_identifier": "old:chest",
            "nbt": {"Lock": {"type": "string", "val": ""}}
        }"#,
    );

    // no location and no extra input: the walk cannot run, the earlier
    // instructions still resolve the output
    let translation = translate(
        &NullWorld,
        &input,
        &input_specification,
        &program(include_str!("./chest.json")),
        &NewVersion,
        None,
        None,
    )
    .expect("translation should succeed");

    assert!(translation.extra_needed());
    assert!(!translation.cacheable());
    assert_eq!(translation.output().full_name(), "new:chest");
}

#[test]
fn translate_without_a_resolved_output_is_a_failure() {
    let input = Object::Block(Block::new("old", "chest", BTreeMap::new()));
    let only_walk = program(r#"[{"function": "map_input_nbt", "options": {"type": "compound"}}]"#);

    let result = translate(
        &NullWorld,
        &input,
        &Specification::default(),
        &only_walk,
        &NewVersion,
        None,
        None,
    );
    assert_eq!(result, Err(TranslateError::UnresolvedOutput));
}

#[test]
fn translate_fails_on_unknown_output_specifications() {
    let input = Object::Block(Block::new("old", "stone", BTreeMap::new()));
    let unknown = program(r#"[{"function": "new_block", "options": "new:unmapped"}]"#);

    let result = translate(
        &NullWorld,
        &input,
        &Specification::default(),
        &unknown,
        &NewVersion,
        None,
        None,
    );
    assert!(matches!(
        result,
        Err(TranslateError::SpecificationNotFound { .. })
    ));
}
