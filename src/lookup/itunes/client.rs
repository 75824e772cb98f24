//! iTunes Search API HTTP client
//!
//! Handles communication with the iTunes Search API.
//! See: https://developer.apple.com/library/archive/documentation/AudioVideo/Conceptual/iTuneSearchAPI/

use std::time::Duration;

use super::{adapter, dto};
use crate::lookup::domain::{ProviderError, TrackRecord};

/// iTunes Search API client
pub struct ItunesClient {
    http_client: reqwest::Client,
    base_url: String,
}

const USER_AGENT: &str = concat!(
    "TuneGrab/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/tunegrab)"
);

/// Candidates requested per search
const SEARCH_LIMIT: u8 = 5;

impl ItunesClient {
    /// Create a new client with the given per-request timeout
    pub fn new(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://itunes.apple.com".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut client = Self::new(Duration::from_secs(10));
        client.base_url = base_url.into();
        client
    }

    /// Search the catalog and return the best-matching candidate
    pub async fn search(&self, query: &str) -> Result<TrackRecord, ProviderError> {
        let response = self.send_search_request(query).await?;
        adapter::best_record(query, response).ok_or(ProviderError::NoMatch)
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(&self, query: &str) -> Result<dto::SearchResponse, ProviderError> {
        let url = format!(
            "{}/search?term={}&media=music&entity=song&limit={}",
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
            return Err(ProviderError::Unavailable(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        // The API labels the body text/javascript; parse it as JSON regardless
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
