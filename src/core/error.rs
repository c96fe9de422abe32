//! Error types for core module
//!
//! Provides custom error types for configuration: the page URL a board is
//! instantiated from, and the values in its query string.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Page URL could not be parsed
    #[error("Invalid board URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// A query parameter held something unusable
    #[error("Invalid value '{value}' for '{name}'")]
    InvalidParameter { name: String, value: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
