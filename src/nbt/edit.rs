//! Pending writes into an output NBT tree.

use getset::Getters;

use super::path::{PathKey, PathStep};
use super::value::{Kind, Value};

/// A single pending write: place `value` under `key` inside the container
/// reached by `path`, all within the outer tree named `outer_name`.
///
/// Edits are accumulated by the interpreter in instruction order and applied
/// to a freshly synthesized output tree afterwards.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct NbtEdit {
    /// The name of the outer tree the edit targets.
    #[get = "pub"]
    outer_name: String,
    /// The kind of the targeted outer tree's root.
    outer_kind: Kind,
    /// The steps to the container that receives the write.
    #[get = "pub"]
    path: Vec<PathStep>,
    /// The key or index the value is written under.
    #[get = "pub"]
    key: PathKey,
    /// The value to write.
    #[get = "pub"]
    value: Value,
}

impl NbtEdit {
    /// Creates an edit from its parts.
    #[must_use]
    pub fn new(
        outer_name: impl Into<String>,
        outer_kind: Kind,
        path: Vec<PathStep>,
        key: PathKey,
        value: Value,
    ) -> Self {
        Self {
            outer_name: outer_name.into(),
            outer_kind,
            path,
            key,
            value,
        }
    }

    /// Returns the kind of the targeted outer tree's root.
    #[must_use]
    pub fn outer_kind(&self) -> Kind {
        self.outer_kind
    }
}

/// Applies the edits whose outer kind matches `root` in order.
///
/// Containers named along an edit's path are created when missing, and an
/// existing value of the wrong kind is replaced by an empty container of the
/// declared kind, so later edits win over both synthesized defaults and
/// earlier edits. A list index more than one past the end cannot be reached
/// (the missing siblings are unknowable) and skips the edit.
pub fn apply_edits(root: &mut Value, edits: &[NbtEdit]) {
    for edit in edits {
        if edit.outer_kind() == root.kind() {
            apply(root, edit);
        }
    }
}

fn apply(root: &mut Value, edit: &NbtEdit) {
    let mut current = root;
    for step in edit.path() {
        match descend(current, step) {
            Some(next) => current = next,
            None => return,
        }
    }
    match (edit.key(), current) {
        (PathKey::Key(key), Value::Compound(entries)) => {
            entries.insert(key.clone(), edit.value().clone());
        }
        (PathKey::Index(index), Value::List(items)) => {
            if *index < items.len() {
                items[*index] = edit.value().clone();
            } else if *index == items.len() {
                items.push(edit.value().clone());
            }
        }
        (PathKey::Index(index), Value::ByteArray(items)) => {
            if let Value::Byte(element) = edit.value() {
                write_element(items, *index, *element);
            }
        }
        (PathKey::Index(index), Value::IntArray(items)) => {
            if let Value::Int(element) = edit.value() {
                write_element(items, *index, *element);
            }
        }
        (PathKey::Index(index), Value::LongArray(items)) => {
            if let Value::Long(element) = edit.value() {
                write_element(items, *index, *element);
            }
        }
        _ => {}
    }
}

fn descend<'t>(current: &'t mut Value, step: &PathStep) -> Option<&'t mut Value> {
    match step.key() {
        PathKey::Key(key) => {
            if !current.is_compound() {
                *current = Kind::Compound.default_value();
            }
            let Value::Compound(entries) = current else {
                unreachable!()
            };
            let entry = entries
                .entry(key.clone())
                .or_insert_with(|| step.kind().default_value());
            if entry.kind() != step.kind() {
                *entry = step.kind().default_value();
            }
            Some(entry)
        }
        PathKey::Index(index) => {
            if !current.is_list() {
                *current = Kind::List.default_value();
            }
            let Value::List(items) = current else {
                unreachable!()
            };
            if *index > items.len() {
                return None;
            }
            if *index == items.len() {
                items.push(step.kind().default_value());
            }
            let entry = &mut items[*index];
            if entry.kind() != step.kind() {
                *entry = step.kind().default_value();
            }
            Some(entry)
        }
    }
}

fn write_element<T: Copy>(items: &mut Vec<T>, index: usize, element: T) {
    if index < items.len() {
        items[index] = element;
    } else if index == items.len() {
        items.push(element);
    }
}
