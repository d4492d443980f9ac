//! The nbt module contains the tagged value model, the canonical-text codec
//! and the typed path addressing used by the translation engine.

mod value;
#[doc(inline)]
pub use value::{Kind, Value};

mod snbt;
#[doc(inline)]
pub use snbt::Error as SnbtError;

mod path;
#[doc(inline)]
pub use path::{resolve, NbtPath, PathKey, PathStep};

mod edit;
#[doc(inline)]
pub use edit::{apply_edits, NbtEdit};
