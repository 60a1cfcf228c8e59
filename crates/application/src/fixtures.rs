//! Registration and authentication fixtures.
//!
//! Compose the client port with the response checks to produce disposable
//! accounts and ready authenticated sessions for test cases. Any failed
//! check aborts the fixture immediately; half-created accounts are left
//! behind, consistent with the disposable account model.

use rand::distr::{Alphanumeric, SampleString};
use serde_json::Value;
use sonda_domain::{
    AUTH_COOKIE, AuthSession, CSRF_TOKEN_HEADER, Credentials, RegistrationData, RequestSpec,
};
use uuid::Uuid;

use crate::checks;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::ApiClient;

/// Registration endpoint path.
pub const REGISTER_PATH: &str = "/user/";

/// Login endpoint path.
pub const LOGIN_PATH: &str = "/user/login";

/// Session-check endpoint path.
pub const AUTH_CHECK_PATH: &str = "/user/auth";

const EMAIL_PREFIX: &str = "learnqa";
const EMAIL_DOMAIN: &str = "example.com";
const DEFAULT_PASSWORD: &str = "123";
const DEFAULT_NAME: &str = "learnqa";

/// Generates a practically unique email for a disposable account.
///
/// The local part combines the fixed prefix with a random token, so two
/// calls never collide regardless of call rate.
#[must_use]
pub fn unique_email() -> String {
    format!("{EMAIL_PREFIX}{}@{EMAIL_DOMAIN}", Uuid::now_v7().simple())
}

/// Builds registration data with a generated unique email.
#[must_use]
pub fn registration_data() -> RegistrationData {
    registration_data_with_email(unique_email())
}

/// Builds registration data with the given email and fixed profile values.
#[must_use]
pub fn registration_data_with_email(email: impl Into<String>) -> RegistrationData {
    RegistrationData {
        password: DEFAULT_PASSWORD.to_string(),
        username: DEFAULT_NAME.to_string(),
        first_name: DEFAULT_NAME.to_string(),
        last_name: DEFAULT_NAME.to_string(),
        email: email.into(),
    }
}

/// Generates a random alphanumeric string of the given length.
#[must_use]
pub fn random_string(len: usize) -> String {
    Alphanumeric.sample_string(&mut rand::rng(), len)
}

/// Registers a new user and returns the server-assigned id.
///
/// # Errors
///
/// Fails when the request fails, the status is not 200, or the body has no
/// interpretable `id`.
pub async fn register_user<C: ApiClient>(
    client: &C,
    data: &RegistrationData,
) -> ApplicationResult<u64> {
    let request = RequestSpec::post(REGISTER_PATH).with_form(data.form());
    let response = client.execute(&request).await?;
    checks::expect_status(&response, 200)?;
    user_id_from(&response.json_value("id")?)
}

/// Logs in and returns the session bundle for the credentials.
///
/// # Errors
///
/// Fails when the request fails, the status is not 200, or the response is
/// missing the CSRF token header, the session cookie, or the `user_id`.
pub async fn login<C: ApiClient>(
    client: &C,
    credentials: &Credentials,
) -> ApplicationResult<AuthSession> {
    let request = RequestSpec::post(LOGIN_PATH).with_form(credentials.form());
    let response = client.execute(&request).await?;
    checks::expect_status(&response, 200)?;
    let token = response.header(CSRF_TOKEN_HEADER)?.to_string();
    let auth_sid = response.cookie(AUTH_COOKIE)?.to_string();
    let user_id = user_id_from(&response.json_value("user_id")?)?;
    Ok(AuthSession {
        email: credentials.email.clone(),
        password: credentials.password.clone(),
        user_id,
        auth_sid,
        token,
    })
}

/// Registers a fresh user and logs in as them.
///
/// The returned session's `user_id` is the id assigned at registration.
///
/// # Errors
///
/// Fails on the first failed step; no cleanup is attempted for a
/// half-created account.
pub async fn create_user_and_auth<C: ApiClient>(client: &C) -> ApplicationResult<AuthSession> {
    let data = registration_data();
    register_user(client, &data).await?;
    login(client, &data.credentials()).await
}

/// Interprets a JSON value as a user id.
///
/// The service publishes numeric ids; the string form is tolerated since
/// the contract only requires the value to round-trip into `/user/{id}`
/// paths.
fn user_id_from(value: &Value) -> ApplicationResult<u64> {
    let parsed = match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| ApplicationError::InvalidUserId {
        value: value.to_string(),
    })
}
