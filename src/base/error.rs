/// An error that occurred while working with the translation engine.
#[allow(missing_docs)]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("An error occurred while parsing a JSON document: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error(transparent)]
    SnbtError(#[from] crate::nbt::SnbtError),
    #[error(transparent)]
    TranslateError(#[from] crate::translate::TranslateError),
    #[error("An error occurred: {0}")]
    Other(&'static str),
}

/// A specialized [`Result`] type for this crate.
pub type Result<T> = std::result::Result<T, Error>;
