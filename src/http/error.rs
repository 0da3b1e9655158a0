//! Classification of HTTP failures into a typed status taxonomy.

use reqwest::StatusCode;

/// HTTP error statuses, classified.
///
/// Carried inside `anyhow::Error` and recovered by downcast where a caller
/// needs to tell an error *response* (the endpoint answered, unfavorably)
/// from a transport failure (the endpoint never answered).
#[derive(Debug)]
pub enum FetchError {
    /// Resource not found (HTTP 404)
    NotFound(String),
    /// Rate limit exceeded (HTTP 403 with rate limit message or 429)
    RateLimitExceeded(String),
    /// Authentication failed (HTTP 401)
    AuthenticationFailed(String),
    /// Forbidden access (HTTP 403 non-rate-limit)
    Forbidden(String),
    /// Any other error status
    Status(u16),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::NotFound(msg) => {
                write!(f, "Not found: {}", msg)
            }
            FetchError::RateLimitExceeded(msg) => {
                write!(f, "Rate limit exceeded: {}. Try again later.", msg)
            }
            FetchError::AuthenticationFailed(msg) => {
                write!(f, "Authentication failed: {}", msg)
            }
            FetchError::Forbidden(msg) => {
                write!(f, "Access forbidden: {}", msg)
            }
            FetchError::Status(code) => {
                write!(f, "HTTP {} error", code)
            }
        }
    }
}

impl std::error::Error for FetchError {}

/// Classifies an error response by status.
/// Returns `None` for errors without a status (transport failures).
pub fn classify_status(error: &reqwest::Error) -> Option<FetchError> {
    let status = error.status()?;

    let classified = match status {
        StatusCode::NOT_FOUND => {
            FetchError::NotFound("The requested resource was not found".to_string())
        }
        StatusCode::UNAUTHORIZED => {
            FetchError::AuthenticationFailed("Invalid or missing authentication".to_string())
        }
        StatusCode::FORBIDDEN => {
            let msg = error.to_string();
            if msg.contains("rate limit") || msg.contains("API rate limit") {
                FetchError::RateLimitExceeded("GitHub API rate limit exceeded".to_string())
            } else {
                FetchError::Forbidden("Access to this resource is forbidden".to_string())
            }
        }
        StatusCode::TOO_MANY_REQUESTS => {
            FetchError::RateLimitExceeded("Too many requests".to_string())
        }
        s => FetchError::Status(s.as_u16()),
    };

    Some(classified)
}

/// Converts an error from `error_for_status()` into the typed taxonomy,
/// passing transport failures through unchanged.
pub fn check_status(error: reqwest::Error) -> anyhow::Error {
    match classify_status(&error) {
        Some(fetch_error) => anyhow::Error::from(fetch_error),
        None => anyhow::Error::from(error),
    }
}
