//! Request specification type

use serde::{Deserialize, Serialize};

use crate::account::{AUTH_COOKIE, AuthSession, CSRF_TOKEN_HEADER};
use crate::cookie::Cookie;
use crate::request::{FormBody, Header, HttpMethod};

/// HTTP request specification.
///
/// `path` is relative to the configured base URL of the service under test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: HttpMethod,
    /// Service-relative path (e.g., "/user/login").
    pub path: String,
    /// Request headers.
    pub headers: Vec<Header>,
    /// Request cookies, rendered into a single `Cookie` header.
    pub cookies: Vec<Cookie>,
    /// Optional form-encoded body, sent for methods that carry one.
    pub form: Option<FormBody>,
}

impl RequestSpec {
    /// Creates a request with the given method and path.
    #[must_use]
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            cookies: Vec::new(),
            form: None,
        }
    }

    /// Creates a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// Creates a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// Creates a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    /// Creates a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    /// Adds a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// Adds a cookie.
    #[must_use]
    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push(Cookie::new(name, value));
        self
    }

    /// Sets the form body.
    #[must_use]
    pub fn with_form(mut self, form: FormBody) -> Self {
        self.form = Some(form);
        self
    }

    /// Attaches the session's CSRF token header and session cookie.
    ///
    /// This is the one place the "echo both back" convention lives: every
    /// authenticated call presents the `x-csrf-token` header together with
    /// the `auth_sid` cookie obtained at login.
    #[must_use]
    pub fn with_auth(self, session: &AuthSession) -> Self {
        self.with_header(CSRF_TOKEN_HEADER, &session.token)
            .with_cookie(AUTH_COOKIE, &session.auth_sid)
    }

    /// Renders the request cookies into a `Cookie` header value.
    ///
    /// Returns `None` when the request carries no cookies.
    #[must_use]
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        let rendered: Vec<String> = self.cookies.iter().map(Cookie::pair).collect();
        Some(rendered.join("; "))
    }
}
