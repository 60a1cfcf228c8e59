//! Domain error types

use thiserror::Error;

/// Domain-level errors raised while building requests or reading responses.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request body could not be encoded.
    #[error("invalid body: {0}")]
    InvalidBody(String),

    /// The named cookie is absent from the response.
    #[error("cannot find cookie with the name '{name}' in the response")]
    MissingCookie {
        /// Name of the cookie that was looked up.
        name: String,
    },

    /// The named header is absent from the response.
    #[error("cannot find header with the name '{name}' in the response")]
    MissingHeader {
        /// Name of the header that was looked up.
        name: String,
    },

    /// The response body could not be decoded as JSON.
    #[error("response is not in JSON format; response text is '{body}'")]
    NotJson {
        /// Raw response text, embedded for diagnosis.
        body: String,
    },

    /// The response JSON has no such top-level key.
    #[error("response JSON does not have key '{key}'")]
    MissingJsonKey {
        /// The key that was looked up.
        key: String,
    },
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
