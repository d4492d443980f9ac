//! Object specifications and the synthesis of default NBT from them.

use std::collections::BTreeMap;

use getset::Getters;
use serde::Deserialize;

use crate::nbt::{Kind, Value};

/// An error that occurred while synthesizing NBT from a specification
/// template. A malformed template is a configuration defect of the
/// specification files, not a recoverable condition.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum TemplateError {
    /// The template's `val` does not have the shape its `type` requires.
    #[error("template value for kind `{kind}` has the wrong shape")]
    WrongShape {
        /// The declared kind of the template node.
        kind: Kind,
    },
}

/// The part of a version's object specification the engine consumes.
///
/// All fields are optional; an absent field simply does not drive its
/// branch of the translation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Getters)]
pub struct Specification {
    /// Default property values of the object.
    #[get = "pub"]
    #[serde(default)]
    defaults: BTreeMap<String, String>,
    /// The `namespace:base_name` identity of the object's block entity.
    #[get = "pub"]
    #[serde(default)]
    nbt_identifier: Option<String>,
    /// Templates for the object's default NBT, keyed by root compound key.
    #[get = "pub"]
    #[serde(default)]
    nbt: Option<BTreeMap<String, NbtTemplate>>,
}

impl Specification {
    /// Creates a specification from its parts.
    #[must_use]
    pub fn new(
        defaults: BTreeMap<String, String>,
        nbt_identifier: Option<String>,
        nbt: Option<BTreeMap<String, NbtTemplate>>,
    ) -> Self {
        Self {
            defaults,
            nbt_identifier,
            nbt,
        }
    }

    /// Whether the specification declares an NBT shape for the object.
    #[must_use]
    pub fn has_nbt(&self) -> bool {
        self.nbt.is_some()
    }

    /// Builds the object's default NBT root from the declared templates.
    ///
    /// Returns [`None`] when the specification declares no NBT shape.
    ///
    /// # Errors
    /// - [`TemplateError::WrongShape`] if a template value does not match
    ///   its declared kind.
    pub fn synthesize_nbt(&self) -> Result<Option<Value>, TemplateError> {
        match &self.nbt {
            None => Ok(None),
            Some(templates) => {
                let mut entries = BTreeMap::new();
                for (key, template) in templates {
                    entries.insert(key.clone(), template.build()?);
                }
                Ok(Some(Value::Compound(entries)))
            }
        }
    }
}

/// One node of a specification's default-NBT template: a declared kind and
/// a kind-shaped default value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NbtTemplate {
    #[serde(rename = "type")]
    kind: Kind,
    #[serde(default)]
    val: serde_json::Value,
}

impl NbtTemplate {
    /// Creates a template from its declared kind and raw value.
    #[must_use]
    pub fn new(kind: Kind, val: serde_json::Value) -> Self {
        Self { kind, val }
    }

    /// Builds the NBT value the template describes.
    ///
    /// # Errors
    /// - [`TemplateError::WrongShape`] if `val` does not match the declared
    ///   kind.
    #[allow(clippy::cast_possible_truncation)]
    pub fn build(&self) -> Result<Value, TemplateError> {
        let wrong_shape = || TemplateError::WrongShape { kind: self.kind };
        let value = match self.kind {
            Kind::Compound => {
                let children: BTreeMap<String, Self> =
                    serde_json::from_value(self.val.clone()).map_err(|_| wrong_shape())?;
                let mut entries = BTreeMap::new();
                for (key, template) in children {
                    entries.insert(key, template.build()?);
                }
                Value::Compound(entries)
            }
            Kind::List => {
                let children: Vec<Self> =
                    serde_json::from_value(self.val.clone()).map_err(|_| wrong_shape())?;
                let mut items = Vec::with_capacity(children.len());
                for template in children {
                    items.push(template.build()?);
                }
                Value::List(items)
            }
            Kind::ByteArray => {
                let elements: Vec<i64> =
                    serde_json::from_value(self.val.clone()).map_err(|_| wrong_shape())?;
                Value::ByteArray(elements.iter().map(|v| *v as i8).collect())
            }
            Kind::IntArray => {
                let elements: Vec<i64> =
                    serde_json::from_value(self.val.clone()).map_err(|_| wrong_shape())?;
                Value::IntArray(elements.iter().map(|v| *v as i32).collect())
            }
            Kind::LongArray => {
                let elements: Vec<i64> =
                    serde_json::from_value(self.val.clone()).map_err(|_| wrong_shape())?;
                Value::LongArray(elements)
            }
            Kind::String => Value::String(
                self.val
                    .as_str()
                    .map(str::to_string)
                    .ok_or_else(wrong_shape)?,
            ),
            Kind::Byte => Value::Byte(self.integer().ok_or_else(wrong_shape)? as i8),
            Kind::Short => Value::Short(self.integer().ok_or_else(wrong_shape)? as i16),
            Kind::Int => Value::Int(self.integer().ok_or_else(wrong_shape)? as i32),
            Kind::Long => Value::Long(self.integer().ok_or_else(wrong_shape)?),
            Kind::Float => Value::Float(self.val.as_f64().ok_or_else(wrong_shape)? as f32),
            Kind::Double => Value::Double(self.val.as_f64().ok_or_else(wrong_shape)?),
        };
        Ok(value)
    }

    fn integer(&self) -> Option<i64> {
        self.val.as_i64()
    }
}
