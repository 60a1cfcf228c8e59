//! HTTP Client port

use std::future::Future;

use sonda_domain::{RequestSpec, ResponseSpec};

use crate::ApplicationResult;

/// Port for executing HTTP requests against the service under test.
///
/// This trait abstracts the HTTP client implementation, allowing fixtures
/// and tests to be independent of specific HTTP libraries. One network call
/// per invocation: no retries, no caching, no response-code validation.
/// Implementations return whatever the service sends, whatever the status.
pub trait ApiClient: Send + Sync {
    /// Executes an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns an error when the request cannot be built or fails at the
    /// transport level. Non-2xx responses are not errors.
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = ApplicationResult<ResponseSpec>> + Send;
}
