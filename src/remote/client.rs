//! HTTP client for the remote quote endpoint.
//!
//! Provides the `RemoteClient` used by the sync reconciler: a bounded
//! batch fetch and a best-effort write-back. The endpoint is treated as an
//! opaque data source; there is no authentication and no schema contract
//! beyond "array of objects, some of which have a `title`".

use reqwest::blocking::Client;
use serde::Deserialize;

use super::{RemoteError, DEFAULT_REMOTE_URL};
use crate::storage::Quote;

/// One record as returned by the remote endpoint.
///
/// Only the `title` field is consumed; everything else is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteRecord {
    /// Title-like text, mapped to the local quote text.
    #[serde(default)]
    pub title: Option<String>,
}

/// Client for the remote endpoint used during sync.
pub struct RemoteClient {
    /// HTTP client instance.
    client: Client,
    /// Full URL of the remote resource.
    url: String,
}

impl RemoteClient {
    /// Creates a new client against the default placeholder endpoint.
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            url: DEFAULT_REMOTE_URL.to_string(),
        }
    }

    /// Creates a new client with a custom endpoint URL.
    pub fn with_url(url: &str) -> Self {
        Self {
            client: Client::new(),
            url: url.trim_end_matches('/').to_string(),
        }
    }

    /// Returns the configured endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches a bounded batch of remote records.
    ///
    /// Any failure mode — network error, non-success status, body that is
    /// not a JSON array of objects — is surfaced as a `RemoteError`, which
    /// the reconciler treats as "no server data" for this cycle.
    pub fn fetch(&self, limit: usize) -> Result<Vec<RemoteRecord>, RemoteError> {
        let response = self.client.get(&self.url).send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RemoteError::ServerError { status, message });
        }

        let records: Vec<RemoteRecord> = response.json()?;
        Ok(records.into_iter().take(limit).collect())
    }

    /// Pushes the collection to the remote endpoint.
    ///
    /// Fire-and-forget write-back: the response body is not parsed, only
    /// HTTP success/failure matters. Callers log failures and move on.
    pub fn push(&self, quotes: &[Quote]) -> Result<(), RemoteError> {
        let response = self.client.post(&self.url).json(&quotes).send()?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response
                .text()
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(RemoteError::ServerError { status, message });
        }

        Ok(())
    }
}

impl Default for RemoteClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_client_new() {
        let client = RemoteClient::new();
        assert_eq!(client.url(), DEFAULT_REMOTE_URL);
    }

    #[test]
    fn test_remote_client_with_url_trims_trailing_slash() {
        let client = RemoteClient::with_url("https://example.com/quotes/");
        assert_eq!(client.url(), "https://example.com/quotes");
    }

    #[test]
    fn test_remote_record_deserialize_extra_fields() {
        let json = r#"{"userId": 1, "id": 7, "title": "some text", "body": "ignored"}"#;
        let record: RemoteRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.title.as_deref(), Some("some text"));
    }

    #[test]
    fn test_remote_record_deserialize_missing_title() {
        let record: RemoteRecord = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert!(record.title.is_none());
    }

    #[test]
    fn test_remote_batch_deserialize() {
        let json = r#"[{"title": "a"}, {"title": "b"}, {"id": 1}]"#;
        let records: Vec<RemoteRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(records.len(), 3);
        assert!(records[2].title.is_none());
    }
}
