//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API/Search
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.

use std::time::Duration;

use super::{adapter, dto};
use crate::lookup::domain::{ProviderError, TrackRecord};

/// MusicBrainz API client
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
}

/// User agent string - MusicBrainz requires this
const USER_AGENT: &str = concat!(
    "TuneGrab/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/tunegrab)"
);

/// Candidates requested per search; relevance ranking puts the likely match
/// near the top so a handful is enough.
const SEARCH_LIMIT: u8 = 5;

impl MusicBrainzClient {
    /// Create a new client with the given per-request timeout
    pub fn new(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://musicbrainz.org/ws/2".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut client = Self::new(Duration::from_secs(10));
        client.base_url = base_url.into();
        client
    }

    /// Search recordings by free-text query and return the best candidate
    pub async fn search(&self, query: &str) -> Result<TrackRecord, ProviderError> {
        let response = self.send_search_request(query).await?;
        adapter::best_record(response).ok_or(ProviderError::NoMatch)
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(&self, query: &str) -> Result<dto::SearchResponse, ProviderError> {
        let url = format!(
            "{}/recording?query={}&fmt=json&limit={}",
            self.base_url,
            urlencoding::encode(query),
            SEARCH_LIMIT
        );

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();

        if !status.is_success() {
            // Try to parse the structured error body
            if let Ok(error) = response.json::<dto::ApiError>().await {
                return Err(ProviderError::Unavailable(error.error));
            }
            return Err(ProviderError::Unavailable(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("malformed response: {e}")))
    }
}

/// Classify a reqwest transport failure
fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Unavailable(e.to_string())
    }
}
