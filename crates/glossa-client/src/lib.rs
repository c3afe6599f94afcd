//! HTTP client for the Glossa annotation backend.

mod http;

pub use http::{ApiClient, ApiError};
