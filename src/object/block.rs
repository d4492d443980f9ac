//! Blocks and their property values.

use std::borrow::Cow;
use std::collections::BTreeMap;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use getset::Getters;

use crate::nbt::Value;

/// The value of one block property: either a plain string or an NBT value.
#[derive(Debug, Clone, PartialEq, From, EnumAsInner)]
#[allow(missing_docs)]
pub enum PropertyValue {
    Text(String),
    Nbt(Value),
}

impl PropertyValue {
    /// Returns the serialized form used to match property values in mapping
    /// programs: a string as-is, an NBT value as its canonical text.
    #[must_use]
    pub fn serialized(&self) -> Cow<str> {
        match self {
            Self::Text(text) => Cow::Borrowed(text),
            Self::Nbt(value) => Cow::Owned(value.to_snbt()),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// A placed object identified by `namespace:base_name` plus a flat map of
/// named properties.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct Block {
    /// The namespace of the block's identity.
    #[get = "pub"]
    namespace: String,
    /// The base name of the block's identity.
    #[get = "pub"]
    base_name: String,
    /// The block's properties.
    #[get = "pub"]
    properties: BTreeMap<String, PropertyValue>,
}

impl Block {
    /// Creates a block from its identity and properties.
    #[must_use]
    pub fn new(
        namespace: impl Into<String>,
        base_name: impl Into<String>,
        properties: BTreeMap<String, PropertyValue>,
    ) -> Self {
        Self {
            namespace: namespace.into(),
            base_name: base_name.into(),
            properties,
        }
    }

    /// Returns the `namespace:base_name` form of the block's identity.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}:{}", self.namespace, self.base_name)
    }

    /// Returns the value of the given property, if the block has it.
    #[must_use]
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}
