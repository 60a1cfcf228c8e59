//! Sonda E2E - Test support and suites
//!
//! The assertion facade, the test context, and an embedded stub of the
//! user-management service. The end-to-end suites live under `tests/`.
//! Setting `SONDA_BASE_URL` points the suites at a live deployment;
//! otherwise they run against the stub.

pub mod assertions;
pub mod context;
pub mod stub;

pub use context::TestContext;
