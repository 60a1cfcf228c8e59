//! Sonda Infrastructure - Adapters and configuration
//!
//! This crate provides the concrete HTTP client behind the port defined in
//! the application layer, plus the environment-driven configuration for the
//! service under test.

pub mod adapters;
pub mod config;

pub use adapters::ReqwestApiClient;
pub use config::ServiceConfig;
