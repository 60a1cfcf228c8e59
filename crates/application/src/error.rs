//! Application error types

use sonda_domain::DomainError;
use thiserror::Error;

/// Harness-level errors.
///
/// Every variant is fatal to the current test case; the harness performs no
/// local recovery, no retry and no partial-state cleanup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// A response accessor failed; the domain message carries the context.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An HTTP request failed at the transport level.
    #[error("request failed: {0}")]
    Http(String),

    /// The response status code did not match the expectation.
    #[error("unexpected status code: expected {expected}, got {actual}; response body is '{body}'")]
    UnexpectedStatus {
        /// Expected status code.
        expected: u16,
        /// Observed status code.
        actual: u16,
        /// Raw response body, embedded for diagnosis.
        body: String,
    },

    /// A JSON value did not match the expectation.
    #[error("{context}: expected {expected}, got {actual}")]
    JsonMismatch {
        /// Caller-supplied context for the mismatch.
        context: String,
        /// Expected JSON value.
        expected: serde_json::Value,
        /// Observed JSON value.
        actual: serde_json::Value,
    },

    /// The response JSON contains a key expected to be absent.
    #[error("response JSON unexpectedly contains key '{key}'")]
    UnexpectedJsonKey {
        /// The key that should have been absent.
        key: String,
    },

    /// The service returned a user id the harness cannot interpret.
    #[error("cannot interpret {value} as a user id")]
    InvalidUserId {
        /// The offending JSON value, rendered for diagnosis.
        value: String,
    },

    /// The harness configuration is invalid.
    #[error("invalid configuration: {0}")]
    Config(String),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
