//! Artwork download
//!
//! Fetches cover images from whatever URL the winning provider supplied
//! (Cover Art Archive, Apple's CDN, or Last.fm's image host). Artwork is
//! strictly best-effort: every failure degrades to `None` and the pipeline
//! carries on without a cover.

use std::time::Duration;

const USER_AGENT: &str = concat!(
    "TuneGrab/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/tunegrab)"
);

/// Downloaded cover image
#[derive(Debug, Clone)]
pub struct Artwork {
    /// Image data (JPEG or PNG)
    pub data: Vec<u8>,
    /// MIME type (image/jpeg or image/png)
    pub mime_type: String,
    /// Source URL
    pub url: String,
}

/// Artwork downloader
pub struct ArtworkClient {
    http_client: reqwest::Client,
}

impl ArtworkClient {
    /// Create a new client with the given per-request timeout
    pub fn new(timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self { http_client }
    }

    /// Fetch artwork if a URL is known.
    ///
    /// `None` in means `None` out without touching the network. Download
    /// failures are logged and also produce `None`.
    pub async fn fetch_optional(&self, url: Option<&str>) -> Option<Artwork> {
        let url = url?;

        match self.download_image(url).await {
            Ok(artwork) => Some(artwork),
            Err(reason) => {
                tracing::debug!("Artwork fetch failed for {}: {}", url, reason);
                None
            }
        }
    }

    /// Download an image from a URL. Errors are log reasons only; callers
    /// never see them.
    async fn download_image(&self, url: &str) -> Result<Artwork, String> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!(
                "HTTP {}: {}",
                status,
                status.canonical_reason().unwrap_or("Unknown")
            ));
        }

        let mime_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        // A CDN error page with HTTP 200 is not artwork
        if !mime_type.starts_with("image/") {
            return Err(format!("unexpected content type: {mime_type}"));
        }

        let data = response
            .bytes()
            .await
            .map_err(|e| e.to_string())?
            .to_vec();

        if data.is_empty() {
            return Err("empty image body".to_string());
        }

        Ok(Artwork {
            data,
            mime_type,
            url: url.to_string(),
        })
    }
}
