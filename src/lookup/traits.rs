//! Trait definitions for metadata providers.
//!
//! The provider set is closed: every source sits behind the same trait so
//! the resolver can walk them in a fixed order without caring which service
//! answers. Production code uses the real client implementations, while
//! tests can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use tunegrab::lookup::traits::MetadataProvider;
//!
//! // In production code:
//! async fn first_usable(providers: &[Box<dyn MetadataProvider>], query: &str) {
//!     for provider in providers {
//!         let record = provider.search(query).await;
//!     }
//! }
//!
//! // In tests:
//! struct MockProvider { ... }
//! impl MetadataProvider for MockProvider { ... }
//! ```

use async_trait::async_trait;

use super::domain::{ProviderError, ProviderKind, TrackRecord};

/// Trait for free-text track metadata lookup.
///
/// Implement this trait to create mock implementations for testing.
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Which provider this is, for logs and the resolved source field.
    fn kind(&self) -> ProviderKind;

    /// Search for the best-matching track record for a query.
    async fn search(&self, query: &str) -> Result<TrackRecord, ProviderError>;
}

// Implement the trait for real clients

#[async_trait]
impl MetadataProvider for super::musicbrainz::MusicBrainzClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::MusicBrainz
    }

    async fn search(&self, query: &str) -> Result<TrackRecord, ProviderError> {
        self.search(query).await
    }
}

#[async_trait]
impl MetadataProvider for super::itunes::ItunesClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Itunes
    }

    async fn search(&self, query: &str) -> Result<TrackRecord, ProviderError> {
        self.search(query).await
    }
}

#[async_trait]
impl MetadataProvider for super::lastfm::LastFmClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::LastFm
    }

    async fn search(&self, query: &str) -> Result<TrackRecord, ProviderError> {
        self.search(query).await
    }
}
