//! Error types for sqlf

use thiserror::Error;

/// Result type alias for sqlf rendering
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while rendering a statement.
///
/// Configuration calls never fail; every structural check happens when the
/// statement is rendered.
#[derive(Debug, Error)]
pub enum Error {
    /// The amount of insert values is not a multiple of the amount of fields.
    #[error("the amount of values ({values}) is not compatible with the amount of fields ({fields})")]
    MismatchFieldsAndValuesCount { fields: usize, values: usize },

    /// The update `SET` list does not hold field and value pairs.
    #[error("invalid field and value pair count: {0}")]
    InvalidFieldValuePairCount(usize),

    /// A raw byte fragment did not produce valid UTF-8.
    #[error("rendered sql is not valid utf-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// Unknown placeholder format name
    #[error("unknown placeholder format: {0}")]
    InvalidPlaceholderFormat(String),

    /// Failure raised by a user fragment.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Create an error from any user fragment
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }
}
