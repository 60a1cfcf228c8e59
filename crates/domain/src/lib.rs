//! Sonda Domain - Core harness types
//!
//! This crate defines the domain model for the Sonda API test harness.
//! All types here are pure Rust with no I/O dependencies.

pub mod account;
pub mod cookie;
pub mod error;
pub mod request;
pub mod response;

pub use account::{AUTH_COOKIE, AuthSession, CSRF_TOKEN_HEADER, Credentials, RegistrationData};
pub use cookie::Cookie;
pub use error::{DomainError, DomainResult};
pub use request::{FormBody, Header, HttpMethod, RequestSpec};
pub use response::{ResponseSpec, StatusCode};
