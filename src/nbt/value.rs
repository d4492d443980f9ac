//! The tagged NBT value model.

use std::collections::BTreeMap;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use strum_macros::{Display, EnumString};

/// Is an enumeration of the twelve kinds of NBT value.
///
/// The [`std::fmt::Display`] and [`std::str::FromStr`] implementations are mutually
/// inverse maps between the kinds and their lowercase-underscore names
/// (`byte`, `int_array`, ...), which is the form the mapping format and the
/// specification format name them in.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    serde::Serialize,
    serde::Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum Kind {
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    ByteArray,
    String,
    List,
    Compound,
    IntArray,
    LongArray,
}

impl Kind {
    /// Returns the kind of the elements for the three array kinds.
    #[must_use]
    pub fn element(self) -> Option<Self> {
        match self {
            Self::ByteArray => Some(Self::Byte),
            Self::IntArray => Some(Self::Int),
            Self::LongArray => Some(Self::Long),
            _ => None,
        }
    }

    /// Returns an empty/zeroed value of this kind.
    #[must_use]
    pub fn default_value(self) -> Value {
        match self {
            Self::Byte => Value::Byte(0),
            Self::Short => Value::Short(0),
            Self::Int => Value::Int(0),
            Self::Long => Value::Long(0),
            Self::Float => Value::Float(0.0),
            Self::Double => Value::Double(0.0),
            Self::ByteArray => Value::ByteArray(Vec::new()),
            Self::String => Value::String(String::new()),
            Self::List => Value::List(Vec::new()),
            Self::Compound => Value::Compound(BTreeMap::new()),
            Self::IntArray => Value::IntArray(Vec::new()),
            Self::LongArray => Value::LongArray(Vec::new()),
        }
    }
}

/// Is an NBT value of any kind.
///
/// Inputs to the engine are only ever read from; outputs are freshly built.
#[derive(Debug, Clone, PartialEq, From, EnumAsInner)]
#[allow(missing_docs)]
pub enum Value {
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    ByteArray(Vec<i8>),
    String(String),
    List(Vec<Value>),
    Compound(BTreeMap<String, Value>),
    IntArray(Vec<i32>),
    LongArray(Vec<i64>),
}

impl Value {
    /// Returns the [`Kind`] of the value.
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            Self::Byte(_) => Kind::Byte,
            Self::Short(_) => Kind::Short,
            Self::Int(_) => Kind::Int,
            Self::Long(_) => Kind::Long,
            Self::Float(_) => Kind::Float,
            Self::Double(_) => Kind::Double,
            Self::ByteArray(_) => Kind::ByteArray,
            Self::String(_) => Kind::String,
            Self::List(_) => Kind::List,
            Self::Compound(_) => Kind::Compound,
            Self::IntArray(_) => Kind::IntArray,
            Self::LongArray(_) => Kind::LongArray,
        }
    }

    /// Re-types the value as the given kind.
    ///
    /// Numeric scalars convert into any other numeric kind, every kind
    /// converts into itself. Any other combination returns [`None`].
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn cast_to(&self, kind: Kind) -> Option<Self> {
        if self.kind() == kind {
            return Some(self.clone());
        }
        let numeric = match self {
            Self::Byte(v) => f64::from(*v),
            Self::Short(v) => f64::from(*v),
            Self::Int(v) => f64::from(*v),
            Self::Long(v) => *v as f64,
            Self::Float(v) => f64::from(*v),
            Self::Double(v) => *v,
            _ => return None,
        };
        match kind {
            Kind::Byte => Some(Self::Byte(numeric as i8)),
            Kind::Short => Some(Self::Short(numeric as i16)),
            Kind::Int => Some(Self::Int(numeric as i32)),
            Kind::Long => Some(Self::Long(numeric as i64)),
            Kind::Float => Some(Self::Float(numeric as f32)),
            Kind::Double => Some(Self::Double(numeric)),
            _ => None,
        }
    }
}
