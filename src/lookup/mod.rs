//! Metadata lookup module - resolves tags for downloaded audio from external services.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`musicbrainz/dto.rs`, `itunes/dto.rs`, `lastfm/dto.rs`) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models and pick the best candidate
//! - **Clients** - HTTP clients for external APIs
//! - **Normalize** - Strips noise annotations from video titles
//! - **Resolver** - High-level orchestration of the provider chain
//!
//! This decoupling means:
//! 1. API changes don't ripple through our codebase
//! 2. We can test API contracts independently
//! 3. We can swap providers without changing business logic
//!
//! # Usage
//!
//! ```ignore
//! use lookup::{Resolver, LookupConfig};
//!
//! let resolver = Resolver::new(LookupConfig::default());
//!
//! // Resolve tags for a downloaded video
//! let tags = resolver.resolve("Rick Astley - Never Gonna Give You Up (Official Video)", "dQw4w9WgXcQ").await;
//! println!("Title: {:?}, Artist: {:?}", tags.title, tags.artist);
//! ```

pub mod domain;
pub mod normalize;
pub mod traits;
pub mod musicbrainz;
pub mod itunes;
pub mod lastfm;
pub mod artwork;
pub mod resolver;

pub use artwork::{Artwork, ArtworkClient};
pub use domain::{ProviderError, ProviderKind, ResolvedTags, TrackRecord};
pub use normalize::clean_title;
pub use resolver::{LookupConfig, Resolver};
