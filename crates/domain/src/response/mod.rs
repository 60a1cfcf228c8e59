//! HTTP response model and accessors.

mod spec;

pub use spec::{ResponseSpec, StatusCode};
