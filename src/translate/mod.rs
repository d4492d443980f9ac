//! The translate module is responsible for executing a mapping program
//! against one input object and materializing the output object.

mod error;
#[doc(inline)]
#[allow(clippy::module_name_repetitions)]
pub use error::{TranslateError, TranslateResult};

mod state;
#[doc(inline)]
pub use state::TranslationState;

mod world;
#[doc(inline)]
pub use world::World;

mod interpreter;
#[doc(inline)]
pub use interpreter::{Inputs, Interpreter};

mod translator;
#[doc(inline)]
pub use translator::{translate, Translation};
