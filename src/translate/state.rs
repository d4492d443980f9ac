//! The accumulating result a mapping program threads through its
//! instructions.

use std::collections::BTreeMap;

use getset::Getters;

use crate::nbt::NbtEdit;
use crate::object::{ObjectKind, PropertyValue};

/// The running result of one translation.
///
/// Created fresh per top-level call and threaded through every nested
/// program; later instructions may overwrite the output identity and
/// property values set by earlier ones, and always append further edits.
/// Once set, the output identity is never cleared again.
#[derive(Debug, Clone, PartialEq, Getters)]
pub struct TranslationState {
    output_name: Option<String>,
    output_kind: Option<ObjectKind>,
    /// The properties accumulated for the output object.
    #[get = "pub"]
    properties: BTreeMap<String, PropertyValue>,
    /// The pending NBT writes accumulated for the output object.
    #[get = "pub"]
    nbt_edits: Vec<NbtEdit>,
    extra_needed: bool,
    cacheable: bool,
}

impl Default for TranslationState {
    fn default() -> Self {
        Self {
            output_name: None,
            output_kind: None,
            properties: BTreeMap::new(),
            nbt_edits: Vec::new(),
            extra_needed: false,
            // cacheable until proven otherwise
            cacheable: true,
        }
    }
}

impl TranslationState {
    /// Creates a fresh state: unset identity, no accumulation, no extra
    /// context needed, cacheable.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the output identity's `namespace:base_name`, if resolved.
    #[must_use]
    pub fn output_name(&self) -> Option<&str> {
        self.output_name.as_deref()
    }

    /// Returns the output identity's kind, if resolved.
    #[must_use]
    pub fn output_kind(&self) -> Option<ObjectKind> {
        self.output_kind
    }

    /// Whether more context than the raw input is needed for a full result.
    #[must_use]
    pub fn extra_needed(&self) -> bool {
        self.extra_needed
    }

    /// Whether the result depended on nothing beyond the raw input.
    #[must_use]
    pub fn cacheable(&self) -> bool {
        self.cacheable
    }

    /// Sets (or overwrites) the output identity.
    pub fn set_output(&mut self, name: impl Into<String>, kind: ObjectKind) {
        self.output_name = Some(name.into());
        self.output_kind = Some(kind);
    }

    /// Sets (or overwrites) one output property.
    pub fn set_property(&mut self, key: impl Into<String>, value: PropertyValue) {
        self.properties.insert(key.into(), value);
    }

    /// Appends one pending NBT write.
    pub fn push_edit(&mut self, edit: NbtEdit) {
        self.nbt_edits.push(edit);
    }

    /// Flags that more context is needed for a full result.
    pub fn require_extra(&mut self) {
        self.extra_needed = true;
    }

    /// Flags that the result depended on context beyond the raw input.
    pub fn mark_uncacheable(&mut self) {
        self.cacheable = false;
    }

    /// Dissolves the state into its components.
    #[must_use]
    #[allow(clippy::type_complexity)]
    pub fn dissolve(
        self,
    ) -> (
        Option<String>,
        Option<ObjectKind>,
        BTreeMap<String, PropertyValue>,
        Vec<NbtEdit>,
        bool,
        bool,
    ) {
        (
            self.output_name,
            self.output_kind,
            self.properties,
            self.nbt_edits,
            self.extra_needed,
            self.cacheable,
        )
    }
}
