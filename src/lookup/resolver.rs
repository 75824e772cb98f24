//! Tag resolution - orchestrates the provider chain
//!
//! This is the high-level API for turning a raw video title into tags:
//! 1. Clean the title into a search query
//! 2. Walk the providers in fixed priority order
//! 3. Adopt the first usable record wholesale (no merging across sources)
//! 4. Degrade to the cleaned title when every provider strikes out
//!
//! Resolution never fails; the worst case is a result carrying only the
//! cleaned title and the video ID.

use std::time::Duration;

use crate::lookup::artwork::{Artwork, ArtworkClient};
use crate::lookup::domain::{ProviderError, ResolvedTags};
use crate::lookup::itunes::ItunesClient;
use crate::lookup::lastfm::LastFmClient;
use crate::lookup::musicbrainz::MusicBrainzClient;
use crate::lookup::normalize::clean_title;
use crate::lookup::traits::MetadataProvider;

/// Configuration for the lookup pipeline
pub struct LookupConfig {
    /// Per-request timeout for provider and artwork calls
    pub timeout: Duration,
    /// Last.fm API key; without one that provider reports unavailable
    pub lastfm_api_key: Option<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            lastfm_api_key: None,
        }
    }
}

/// Resolves tags for downloaded audio by walking the provider chain
pub struct Resolver {
    providers: Vec<Box<dyn MetadataProvider>>,
    artwork: ArtworkClient,
}

impl Resolver {
    /// Create a resolver with the real provider chain: the open database
    /// first, then the commercial catalog, then the community fallback.
    pub fn new(config: LookupConfig) -> Self {
        let providers: Vec<Box<dyn MetadataProvider>> = vec![
            Box::new(MusicBrainzClient::new(config.timeout)),
            Box::new(ItunesClient::new(config.timeout)),
            Box::new(LastFmClient::new(config.lastfm_api_key, config.timeout)),
        ];

        Self {
            providers,
            artwork: ArtworkClient::new(config.timeout),
        }
    }

    /// Create a resolver over an arbitrary provider chain
    #[cfg(test)]
    pub fn with_providers(providers: Vec<Box<dyn MetadataProvider>>) -> Self {
        Self {
            providers,
            artwork: ArtworkClient::new(Duration::from_secs(5)),
        }
    }

    /// Resolve tags for a video title.
    ///
    /// The first provider that returns a usable record wins and supplies
    /// every field, including gaps. Later providers are not consulted to
    /// fill those gaps, which keeps results internally consistent.
    pub async fn resolve(&self, raw_title: &str, video_id: &str) -> ResolvedTags {
        let query = clean_title(raw_title);

        for provider in &self.providers {
            match provider.search(&query).await {
                Ok(record) if record.is_usable() => {
                    tracing::info!("Matched \"{}\" via {}", query, provider.kind());
                    return ResolvedTags::from_record(record, video_id);
                }
                Ok(_) => {
                    // A record with neither title nor artist tags nothing
                    tracing::debug!("{} returned an unusable record", provider.kind());
                }
                Err(ProviderError::NoMatch) => {
                    tracing::debug!("{} had no match for \"{}\"", provider.kind(), query);
                }
                Err(e) => {
                    tracing::debug!("{} failed: {}", provider.kind(), e);
                }
            }
        }

        tracing::warn!(
            "No provider matched \"{}\"; tagging with cleaned title only",
            query
        );
        ResolvedTags::degraded(query, video_id)
    }

    /// Fetch artwork for a resolved result, if it carries an artwork URL
    pub async fn fetch_artwork(&self, tags: &ResolvedTags) -> Option<Artwork> {
        self.artwork
            .fetch_optional(tags.artwork_url.as_deref())
            .await
    }
}
