//! Response specification type
//!
//! The single explicit response abstraction used throughout the harness:
//! status code, case-insensitive header lookup, cookie lookup, raw body
//! text, and an on-demand JSON decode with a distinct error kind.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{DomainError, DomainResult};

/// HTTP status code with semantic helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCode(pub u16);

impl StatusCode {
    /// Creates a new `StatusCode`.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Returns the numeric status code.
    #[must_use]
    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if this is a 2xx success status.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.0 >= 200 && self.0 < 300
    }

    /// Returns true if this is a 4xx client error status.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.0 >= 400 && self.0 < 500
    }

    /// Returns true if this is a 5xx server error status.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.0 >= 500 && self.0 < 600
    }

    /// Returns the canonical reason phrase for common status codes.
    #[must_use]
    pub const fn reason_phrase(&self) -> &'static str {
        match self.0 {
            200 => "OK",
            201 => "Created",
            204 => "No Content",
            301 => "Moved Permanently",
            302 => "Found",
            400 => "Bad Request",
            401 => "Unauthorized",
            403 => "Forbidden",
            404 => "Not Found",
            405 => "Method Not Allowed",
            409 => "Conflict",
            422 => "Unprocessable Entity",
            429 => "Too Many Requests",
            500 => "Internal Server Error",
            502 => "Bad Gateway",
            503 => "Service Unavailable",
            504 => "Gateway Timeout",
            _ => "Unknown",
        }
    }
}

impl std::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.0, self.reason_phrase())
    }
}

impl From<u16> for StatusCode {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

/// HTTP response specification.
///
/// Contains everything received from one HTTP call. Owned solely by the
/// caller of the client; never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseSpec {
    /// HTTP status code.
    pub status: u16,
    /// Status text (e.g., "OK", "Not Found").
    pub status_text: String,
    /// Response headers as a map.
    pub headers: HashMap<String, String>,
    /// Response cookies, parsed from `Set-Cookie` headers.
    pub cookies: HashMap<String, String>,
    /// Response body as string.
    pub body: String,
    /// Response body as raw bytes (for binary responses).
    pub body_bytes: Vec<u8>,
    /// Response round-trip time.
    pub duration: Duration,
    /// Content-Type header value (extracted for convenience).
    pub content_type: Option<String>,
}

impl ResponseSpec {
    /// Creates a new `ResponseSpec` from raw response data.
    #[must_use]
    pub fn new(
        status: impl Into<StatusCode>,
        headers: HashMap<String, String>,
        cookies: HashMap<String, String>,
        body: Vec<u8>,
        duration: Duration,
    ) -> Self {
        let status_code = status.into();
        let content_type = headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .map(|(_, v)| v.clone());

        let body_string = String::from_utf8(body.clone())
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());

        Self {
            status: status_code.as_u16(),
            status_text: status_code.reason_phrase().to_string(),
            headers,
            cookies,
            body: body_string,
            body_bytes: body,
            duration,
            content_type,
        }
    }

    /// Returns the status as a `StatusCode` struct.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        StatusCode::new(self.status)
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// Returns true if the status code indicates a client error (4xx).
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status >= 400 && self.status < 500
    }

    /// Returns true if the content type indicates JSON.
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.content_type
            .as_ref()
            .is_some_and(|ct| ct.contains("application/json") || ct.contains("+json"))
    }

    /// Looks up a header value by name (case-insensitive).
    #[must_use]
    pub fn find_header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns a header value, failing descriptively if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingHeader`] when no header with the given
    /// name (compared case-insensitively) is present.
    pub fn header(&self, name: &str) -> DomainResult<&str> {
        self.find_header(name).ok_or_else(|| DomainError::MissingHeader {
            name: name.to_string(),
        })
    }

    /// Returns a cookie value, failing descriptively if it is absent.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::MissingCookie`] when the response carried no
    /// cookie with the given name.
    pub fn cookie(&self, name: &str) -> DomainResult<&str> {
        self.cookies
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| DomainError::MissingCookie {
                name: name.to_string(),
            })
    }

    /// Decodes the body as JSON.
    ///
    /// Decoding is on demand and idempotent: repeated calls on the same
    /// response yield equal values.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotJson`] embedding the raw response text when
    /// the body is not well-formed JSON.
    pub fn json(&self) -> DomainResult<serde_json::Value> {
        serde_json::from_str(&self.body).map_err(|_| DomainError::NotJson {
            body: self.body.clone(),
        })
    }

    /// Returns the value of a top-level JSON key.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NotJson`] when the body is not JSON, or
    /// [`DomainError::MissingJsonKey`] when the key is absent.
    pub fn json_value(&self, name: &str) -> DomainResult<serde_json::Value> {
        let decoded = self.json()?;
        decoded
            .get(name)
            .cloned()
            .ok_or_else(|| DomainError::MissingJsonKey {
                key: name.to_string(),
            })
    }
}

impl Default for ResponseSpec {
    fn default() -> Self {
        Self {
            status: 0,
            status_text: String::new(),
            headers: HashMap::new(),
            cookies: HashMap::new(),
            body: String::new(),
            body_bytes: Vec::new(),
            duration: Duration::ZERO,
            content_type: None,
        }
    }
}
