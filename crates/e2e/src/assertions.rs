//! Panicking assertion facade.
//!
//! The fail-loud form the suites use: each helper delegates to the response
//! checks and panics with the check's diagnostic message, aborting the test
//! immediately.

#![allow(clippy::panic)]

use serde_json::Value;
use sonda_application::checks;
use sonda_domain::ResponseSpec;

/// Asserts the response status code, with the raw body in the failure.
#[track_caller]
pub fn assert_status(response: &ResponseSpec, expected: u16) {
    if let Err(e) = checks::expect_status(response, expected) {
        panic!("{e}");
    }
}

/// Asserts that the JSON body has the given top-level key.
#[track_caller]
pub fn assert_json_has_key(response: &ResponseSpec, key: &str) {
    if let Err(e) = checks::expect_json_key(response, key) {
        panic!("{e}");
    }
}

/// Asserts that the JSON body does not have the given top-level key.
#[track_caller]
pub fn assert_json_lacks_key(response: &ResponseSpec, key: &str) {
    if let Err(e) = checks::expect_json_lacks_key(response, key) {
        panic!("{e}");
    }
}

/// Asserts that the JSON body has every one of the given top-level keys.
#[track_caller]
pub fn assert_json_has_keys(response: &ResponseSpec, keys: &[&str]) {
    if let Err(e) = checks::expect_json_keys(response, keys) {
        panic!("{e}");
    }
}

/// Asserts that a top-level JSON key holds the expected value.
///
/// `context` is included in the failure alongside the actual value.
#[track_caller]
pub fn assert_json_value(response: &ResponseSpec, key: &str, expected: &Value, context: &str) {
    if let Err(e) = checks::expect_json_value(response, key, expected, context) {
        panic!("{e}");
    }
}

/// Asserts exact raw-body equality.
#[track_caller]
pub fn assert_body(response: &ResponseSpec, expected: &str) {
    if response.body != expected {
        panic!(
            "unexpected response body: expected '{expected}', got '{}'",
            response.body
        );
    }
}
