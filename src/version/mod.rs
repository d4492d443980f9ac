//! The version module contains the per-version object specifications the
//! engine consumes and the seam to the layer that loads them.

mod specification;
#[doc(inline)]
pub use specification::{NbtTemplate, Specification, TemplateError};

use crate::object::ObjectKind;

/// Access to one game version's object specifications.
///
/// Implemented by the specification-loading layer; the engine only ever
/// looks specifications up, it never loads or caches them itself.
pub trait SpecificationProvider {
    /// Returns the specification for the named object, or [`None`] if this
    /// version does not know the object.
    fn specification(
        &self,
        kind: ObjectKind,
        namespace: &str,
        base_name: &str,
    ) -> Option<Specification>;
}
