//! HTTP client implementation using reqwest.
//!
//! This adapter implements the `ApiClient` port. It prepends the configured
//! base URL, sends exactly one network call per invocation, and returns
//! whatever the service sends; only transport failures become errors.

use std::collections::HashMap;
use std::future::Future;
use std::time::Instant;

use reqwest::{Client, Method, Url};
use sonda_application::ports::ApiClient;
use sonda_application::{ApplicationError, ApplicationResult};
use sonda_domain::{Cookie, HttpMethod, RequestSpec, ResponseSpec};

use crate::config::ServiceConfig;

/// HTTP client for the service under test.
///
/// Wraps `reqwest::Client` behind the application port. No retries, no
/// caching, no response-code validation.
#[derive(Debug, Clone)]
pub struct ReqwestApiClient {
    client: Client,
    config: ServiceConfig,
}

impl ReqwestApiClient {
    /// Creates a client for the configured service.
    ///
    /// # Errors
    ///
    /// Returns [`ApplicationError::Http`] when the underlying client cannot
    /// be constructed.
    pub fn new(config: ServiceConfig) -> ApplicationResult<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ApplicationError::Http(e.to_string()))?;
        Ok(Self { client, config })
    }

    /// Returns the configuration the client was built with.
    #[must_use]
    pub const fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Joins a service-relative path onto the base URL.
    fn request_url(&self, path: &str) -> ApplicationResult<Url> {
        self.config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApplicationError::Http(format!("invalid request path '{path}': {e}")))
    }

    /// Converts the domain method to the reqwest method.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }
}

impl ApiClient for ReqwestApiClient {
    fn execute(
        &self,
        request: &RequestSpec,
    ) -> impl Future<Output = ApplicationResult<ResponseSpec>> + Send {
        let request = request.clone();
        async move {
            let url = self.request_url(&request.path)?;

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), url.clone())
                .timeout(self.config.timeout);

            for header in &request.headers {
                builder = builder.header(&header.name, &header.value);
            }

            if let Some(cookie_header) = request.cookie_header() {
                builder = builder.header(reqwest::header::COOKIE, cookie_header);
            }

            if request.method.has_body() {
                if let Some(form) = &request.form {
                    builder = builder
                        .header(
                            reqwest::header::CONTENT_TYPE,
                            "application/x-www-form-urlencoded",
                        )
                        .body(form.encode()?);
                }
            }

            tracing::debug!(method = %request.method, url = %url, "sending request");
            let start = Instant::now();

            let response = builder
                .send()
                .await
                .map_err(|e| ApplicationError::Http(e.to_string()))?;

            let duration = start.elapsed();
            let status = response.status().as_u16();

            let headers: HashMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
                .collect();

            let cookies: HashMap<String, String> = response
                .headers()
                .get_all(reqwest::header::SET_COOKIE)
                .iter()
                .filter_map(|v| v.to_str().ok())
                .filter_map(Cookie::parse)
                .map(|cookie| (cookie.name, cookie.value))
                .collect();

            let body = response
                .bytes()
                .await
                .map_err(|e| ApplicationError::Http(format!("failed to read body: {e}")))?
                .to_vec();

            tracing::debug!(status, ?duration, "received response");

            Ok(ResponseSpec::new(status, headers, cookies, body, duration))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn client() -> ReqwestApiClient {
        let config = ServiceConfig::new("https://service.example.com/api").unwrap();
        ReqwestApiClient::new(config).unwrap()
    }

    #[test]
    fn test_to_reqwest_method() {
        assert_eq!(ReqwestApiClient::to_reqwest_method(HttpMethod::Get), Method::GET);
        assert_eq!(ReqwestApiClient::to_reqwest_method(HttpMethod::Post), Method::POST);
        assert_eq!(ReqwestApiClient::to_reqwest_method(HttpMethod::Put), Method::PUT);
        assert_eq!(
            ReqwestApiClient::to_reqwest_method(HttpMethod::Delete),
            Method::DELETE
        );
    }

    #[test]
    fn test_request_url_joins_under_base_path() {
        let client = client();
        assert_eq!(
            client.request_url("/user/login").unwrap().as_str(),
            "https://service.example.com/api/user/login"
        );
        assert_eq!(
            client.request_url("user/auth").unwrap().as_str(),
            "https://service.example.com/api/user/auth"
        );
        assert_eq!(
            client.request_url("/user/").unwrap().as_str(),
            "https://service.example.com/api/user/"
        );
    }

    #[test]
    fn test_client_creation() {
        let config = ServiceConfig::new("https://service.example.com").unwrap();
        assert!(ReqwestApiClient::new(config).is_ok());
    }
}
