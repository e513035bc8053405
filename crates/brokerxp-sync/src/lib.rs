//! Backend access: read-only REST client for skills, activities, requirements and header stats.

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "http")]
pub use http::{ApiClient, ApiError};
