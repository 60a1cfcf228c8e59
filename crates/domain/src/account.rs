//! Account data exchanged with the user service.

use serde::{Deserialize, Serialize};

use crate::request::FormBody;

/// Header carrying the CSRF token on authenticated calls.
pub const CSRF_TOKEN_HEADER: &str = "x-csrf-token";

/// Cookie carrying the session id on authenticated calls.
pub const AUTH_COOKIE: &str = "auth_sid";

/// Registration form for a new user.
///
/// Built fresh per call, immutable once submitted; the wire names for the
/// name fields are `firstName` and `lastName`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationData {
    /// Account password.
    pub password: String,
    /// Account username.
    pub username: String,
    /// Given name (wire name `firstName`).
    pub first_name: String,
    /// Family name (wire name `lastName`).
    pub last_name: String,
    /// Account email, unique per account on the service side.
    pub email: String,
}

impl RegistrationData {
    /// Renders the registration data as its wire form.
    #[must_use]
    pub fn form(&self) -> FormBody {
        FormBody::new()
            .field("password", &self.password)
            .field("username", &self.username)
            .field("firstName", &self.first_name)
            .field("lastName", &self.last_name)
            .field("email", &self.email)
    }

    /// Returns the login credentials for this registration.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

/// Login form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl Credentials {
    /// Creates credentials from an email/password pair.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Renders the credentials as the login wire form.
    #[must_use]
    pub fn form(&self) -> FormBody {
        FormBody::new().field("email", &self.email).field("password", &self.password)
    }
}

/// Credentials and identifiers produced by a successful registration plus
/// login exchange.
///
/// `auth_sid` and `token` are opaque; their only contract is that both are
/// echoed back on subsequent authenticated calls, and only for the user they
/// were issued to. Lifetime is the test case that created the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
    /// Server-assigned user id.
    pub user_id: u64,
    /// Session cookie value from login.
    pub auth_sid: String,
    /// CSRF token header value from login.
    pub token: String,
}
