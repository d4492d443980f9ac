//! Typed path addressing into NBT trees.

use std::borrow::Cow;
use std::fmt::Display;

use getset::Getters;

use super::value::{Kind, Value};

/// A single addressing key: a compound key or a list/array index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
#[allow(missing_docs)]
pub enum PathKey {
    Index(usize),
    Key(String),
}

impl Display for PathKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Index(index) => write!(f, "{index}"),
            Self::Key(key) => write!(f, "{key}"),
        }
    }
}

impl From<&str> for PathKey {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<usize> for PathKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

/// One step of a path: the key to follow and the kind declared (or observed)
/// at the value it leads to.
///
/// The mapping format writes a step as a two-element array, `["Items", "list"]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct PathStep(pub PathKey, pub Kind);

impl PathStep {
    /// Returns the addressing key of the step.
    #[must_use]
    pub fn key(&self) -> &PathKey {
        &self.0
    }

    /// Returns the kind declared at the step.
    #[must_use]
    pub fn kind(&self) -> Kind {
        self.1
    }
}

/// A position inside an outer NBT tree: which tree, the kind of its root and
/// the steps from the root to the position.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct NbtPath {
    /// The name of the outer tree the path addresses into.
    #[get = "pub"]
    outer_name: String,
    /// The kind of the outer tree's root.
    outer_kind: Kind,
    /// The steps from the root to the addressed position.
    #[get = "pub"]
    steps: Vec<PathStep>,
}

impl NbtPath {
    /// Creates a path from its parts.
    #[must_use]
    pub fn new(outer_name: impl Into<String>, outer_kind: Kind, steps: Vec<PathStep>) -> Self {
        Self {
            outer_name: outer_name.into(),
            outer_kind,
            steps,
        }
    }

    /// The root of the unnamed outer compound.
    #[must_use]
    pub fn root() -> Self {
        Self::new("", Kind::Compound, Vec::new())
    }

    /// Returns the kind of the outer tree's root.
    #[must_use]
    pub fn outer_kind(&self) -> Kind {
        self.outer_kind
    }

    /// Returns the path extended by one step.
    #[must_use]
    pub fn child(&self, key: impl Into<PathKey>, kind: Kind) -> Self {
        let mut steps = self.steps.clone();
        steps.push(PathStep(key.into(), kind));
        Self::new(self.outer_name.clone(), self.outer_kind, steps)
    }

    /// Returns the steps up to, but excluding, the final one.
    #[must_use]
    pub fn parent_steps(&self) -> &[PathStep] {
        match self.steps.split_last() {
            Some((_, parent)) => parent,
            None => &[],
        }
    }

    /// Returns the final step, if the path has any.
    #[must_use]
    pub fn last_step(&self) -> Option<&PathStep> {
        self.steps.last()
    }
}

/// Resolves a path against the root of its outer tree.
///
/// Returns [`None`] if the root's kind differs from the declared outer kind,
/// and otherwise follows the steps in order: a key step only enters a
/// compound that contains it, an index step only enters a list or array it
/// is in bounds for. Any mismatch resolves the whole path to [`None`] with
/// no partial result. Indexing an array yields the scalar element.
#[must_use]
pub fn resolve<'v>(root: &'v Value, path: &NbtPath) -> Option<Cow<'v, Value>> {
    if root.kind() != path.outer_kind() {
        return None;
    }
    let mut current = root;
    let steps = path.steps();
    for (depth, step) in steps.iter().enumerate() {
        let is_last = depth + 1 == steps.len();
        match (step.key(), current) {
            (PathKey::Key(key), Value::Compound(entries)) => current = entries.get(key)?,
            (PathKey::Index(index), Value::List(items)) => current = items.get(*index)?,
            (PathKey::Index(index), Value::ByteArray(items)) => {
                let element = Value::Byte(*items.get(*index)?);
                return is_last.then_some(Cow::Owned(element));
            }
            (PathKey::Index(index), Value::IntArray(items)) => {
                let element = Value::Int(*items.get(*index)?);
                return is_last.then_some(Cow::Owned(element));
            }
            (PathKey::Index(index), Value::LongArray(items)) => {
                let element = Value::Long(*items.get(*index)?);
                return is_last.then_some(Cow::Owned(element));
            }
            _ => return None,
        }
    }
    Some(Cow::Borrowed(current))
}
