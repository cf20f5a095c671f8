//! Remote endpoint module for Adage.
//!
//! The remote endpoint is an opaque data source: a read operation returns
//! a JSON array of arbitrary objects (only a `title` string field is
//! consumed), and a write operation accepts a JSON body whose response is
//! never parsed beyond success/failure.

pub mod client;

pub use client::{RemoteClient, RemoteRecord};

/// Default remote endpoint URL (a placeholder data service).
pub const DEFAULT_REMOTE_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Custom error type for remote operations.
///
/// Callers treat every variant the same way during sync: as "no server
/// data" for this cycle.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// HTTP request error (network failure, timeout, malformed body).
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Server returned a non-success status.
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_display_server_error() {
        let err = RemoteError::ServerError {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("unavailable"));
    }

    #[test]
    fn test_default_remote_url() {
        assert!(DEFAULT_REMOTE_URL.starts_with("https://"));
    }
}
