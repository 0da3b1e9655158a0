//! HTTP client module with status classification and bounded timeouts.

mod client;
mod error;

pub use client::{HttpClient, REQUEST_TIMEOUT};
pub use error::{FetchError, check_status, classify_status};
