//! Response checks.
//!
//! Pure, side-effect-free comparisons against a response. Every failure
//! message embeds the actual observed value (and the raw body where it
//! helps), so a mismatch can be diagnosed without re-running the test.
//! All JSON checks go through [`ResponseSpec::json`], so a malformed body
//! always fails with the descriptive not-JSON error.

use serde_json::Value;
use sonda_domain::ResponseSpec;

use crate::error::{ApplicationError, ApplicationResult};

/// Checks that the response has the expected status code.
///
/// # Errors
///
/// Returns [`ApplicationError::UnexpectedStatus`] with the expected code,
/// the actual code and the raw body text.
pub fn expect_status(response: &ResponseSpec, expected: u16) -> ApplicationResult<()> {
    if response.status == expected {
        Ok(())
    } else {
        Err(ApplicationError::UnexpectedStatus {
            expected,
            actual: response.status,
            body: response.body.clone(),
        })
    }
}

/// Checks that the JSON body has the given top-level key.
///
/// # Errors
///
/// Fails when the body is not JSON or the key is absent.
pub fn expect_json_key(response: &ResponseSpec, key: &str) -> ApplicationResult<()> {
    response.json_value(key)?;
    Ok(())
}

/// Checks that the JSON body does not have the given top-level key.
///
/// # Errors
///
/// Fails when the body is not JSON or the key is present.
pub fn expect_json_lacks_key(response: &ResponseSpec, key: &str) -> ApplicationResult<()> {
    let decoded = response.json()?;
    if decoded.get(key).is_some() {
        return Err(ApplicationError::UnexpectedJsonKey {
            key: key.to_string(),
        });
    }
    Ok(())
}

/// Checks that the JSON body has every one of the given top-level keys.
///
/// # Errors
///
/// Fails on the first absent key.
pub fn expect_json_keys(response: &ResponseSpec, keys: &[&str]) -> ApplicationResult<()> {
    for key in keys {
        expect_json_key(response, key)?;
    }
    Ok(())
}

/// Checks that a top-level JSON key holds the expected value.
///
/// Equality is native JSON equality; there is no type coercion.
///
/// # Errors
///
/// Fails when the body is not JSON, the key is absent, or the value
/// differs; the mismatch carries the caller-supplied context plus both
/// values.
pub fn expect_json_value(
    response: &ResponseSpec,
    key: &str,
    expected: &Value,
    context: &str,
) -> ApplicationResult<()> {
    let actual = response.json_value(key)?;
    if actual == *expected {
        Ok(())
    } else {
        Err(ApplicationError::JsonMismatch {
            context: context.to_string(),
            expected: expected.clone(),
            actual,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn response(status: u16, body: &str) -> ResponseSpec {
        ResponseSpec::new(
            status,
            HashMap::new(),
            HashMap::new(),
            body.as_bytes().to_vec(),
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_expect_status_match() {
        assert!(expect_status(&response(200, "{}"), 200).is_ok());
    }

    #[test]
    fn test_expect_status_mismatch_embeds_body() {
        let err = expect_status(&response(400, "Invalid email format"), 200).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unexpected status code: expected 200, got 400; response body is 'Invalid email format'"
        );
    }

    #[test]
    fn test_expect_json_key() {
        let resp = response(200, r#"{"id": 5}"#);
        assert!(expect_json_key(&resp, "id").is_ok());
        let err = expect_json_key(&resp, "user_id").unwrap_err();
        assert_eq!(err.to_string(), "response JSON does not have key 'user_id'");
    }

    #[test]
    fn test_expect_json_lacks_key() {
        let resp = response(200, r#"{"username": "someone"}"#);
        assert!(expect_json_lacks_key(&resp, "email").is_ok());
        let err = expect_json_lacks_key(&resp, "username").unwrap_err();
        assert_eq!(
            err.to_string(),
            "response JSON unexpectedly contains key 'username'"
        );
    }

    #[test]
    fn test_expect_json_keys_reports_first_missing() {
        let resp = response(200, r#"{"username": "someone", "email": "a@b.c"}"#);
        assert!(expect_json_keys(&resp, &["username", "email"]).is_ok());
        let err = expect_json_keys(&resp, &["username", "firstName"]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "response JSON does not have key 'firstName'"
        );
    }

    #[test]
    fn test_expect_json_value_no_coercion() {
        let resp = response(200, r#"{"user_id": 42}"#);
        assert!(expect_json_value(&resp, "user_id", &json!(42), "ids differ").is_ok());
        let err = expect_json_value(&resp, "user_id", &json!("42"), "ids differ").unwrap_err();
        assert_eq!(err.to_string(), "ids differ: expected \"42\", got 42");
    }

    #[test]
    fn test_json_checks_fail_descriptively_on_malformed_body() {
        let resp = response(200, "User not found");
        let err = expect_json_key(&resp, "id").unwrap_err();
        assert_eq!(
            err.to_string(),
            "response is not in JSON format; response text is 'User not found'"
        );
    }
}
