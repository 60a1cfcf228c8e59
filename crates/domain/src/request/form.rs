//! Form-encoded request bodies.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// An `application/x-www-form-urlencoded` request body.
///
/// Fields keep their insertion order, matching how the service echoes
/// validation errors for the first offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct FormBody {
    pairs: Vec<(String, String)>,
}

impl FormBody {
    /// Creates an empty form body.
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Adds a field to the form.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.pairs.push((name.into(), value.into()));
        self
    }

    /// Removes every field with the given name.
    #[must_use]
    pub fn without(mut self, name: &str) -> Self {
        self.pairs.retain(|(field, _)| field != name);
        self
    }

    /// Returns the form fields in order.
    #[must_use]
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    /// Returns true if the form has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Encodes the form as `application/x-www-form-urlencoded` text.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidBody`] when encoding fails.
    pub fn encode(&self) -> DomainResult<String> {
        serde_urlencoded::to_string(&self.pairs)
            .map_err(|e| DomainError::InvalidBody(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_encode_preserves_order() {
        let form = FormBody::new().field("email", "a@example.com").field("password", "123");
        assert_eq!(form.encode().unwrap(), "email=a%40example.com&password=123");
    }

    #[test]
    fn test_without_removes_field() {
        let form = FormBody::new()
            .field("username", "someone")
            .field("email", "a@example.com")
            .without("email");
        assert_eq!(form.encode().unwrap(), "username=someone");
    }

    #[test]
    fn test_empty_form() {
        let form = FormBody::new();
        assert!(form.is_empty());
        assert_eq!(form.encode().unwrap(), "");
    }
}
