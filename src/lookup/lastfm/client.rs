//! Last.fm HTTP client
//!
//! Handles communication with the Last.fm web service.
//! See: https://www.last.fm/api/show/track.search
//!
//! All requests need an API key. The client holds an optional key and
//! reports itself unavailable when none was configured, so the caller can
//! simply fall through to nothing.

use std::time::Duration;

use super::{adapter, dto};
use crate::lookup::domain::{ProviderError, TrackRecord};

/// Last.fm API client
pub struct LastFmClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

const USER_AGENT: &str = concat!(
    "TuneGrab/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/tunegrab)"
);

/// Candidates requested per search
const SEARCH_LIMIT: u8 = 5;

impl LastFmClient {
    /// Create a new client. Pass `None` for the key to get a client that
    /// always reports `Unavailable`.
    pub fn new(api_key: Option<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            base_url: "https://ws.audioscrobbler.com".to_string(),
            api_key,
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        let mut client = Self::new(api_key, Duration::from_secs(10));
        client.base_url = base_url.into();
        client
    }

    /// Search tracks and return the most-listened candidate
    pub async fn search(&self, query: &str) -> Result<TrackRecord, ProviderError> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(ProviderError::Unavailable(
                "API key not configured".to_string(),
            ));
        };

        let response = self.send_search_request(api_key, query).await?;
        adapter::best_record(response).ok_or(ProviderError::NoMatch)
    }

    /// Send the HTTP request and parse the response
    async fn send_search_request(
        &self,
        api_key: &str,
        query: &str,
    ) -> Result<dto::SearchResponse, ProviderError> {
        let url = format!(
            "{}/2.0/?method=track.search&track={}&api_key={}&format=json&limit={}",
            self.base_url,
            urlencoding::encode(query),
            api_key,
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
            // Failures usually still carry the in-band error payload
            if let Ok(body) = response.json::<dto::SearchResponse>().await {
                if let Some(err) = api_error(&body) {
                    return Err(err);
                }
            }
            return Err(ProviderError::Unavailable(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            )));
        }

        let body = response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| ProviderError::Unavailable(format!("malformed response: {e}")))?;

        // Error payloads can arrive with HTTP 200
        if let Some(err) = api_error(&body) {
            return Err(err);
        }
        Ok(body)
    }
}

/// Extract the in-band error, if the payload carries one
fn api_error(body: &dto::SearchResponse) -> Option<ProviderError> {
    let code = body.error?;
    Some(ProviderError::Unavailable(
        body.message
            .clone()
            .unwrap_or_else(|| format!("API error {code}")),
    ))
}

/// Classify a reqwest transport failure
fn transport_error(e: reqwest::Error) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Unavailable(e.to_string())
    }
}
