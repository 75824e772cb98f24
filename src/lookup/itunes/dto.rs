//! iTunes Search API Data Transfer Objects
//!
//! These types match EXACTLY what the iTunes Search API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the itunes module - convert to domain types.
//!
//! API Reference: https://developer.apple.com/library/archive/documentation/AudioVideo/Conceptual/iTuneSearchAPI/
//!
//! Every field is optional in practice: the API freely omits keys per result.

use serde::{Deserialize, Serialize};

/// Search response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Number of results in this response
    pub result_count: Option<u32>,
    /// Matched tracks
    #[serde(default)]
    pub results: Vec<Track>,
}

/// A single track result
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    /// Track title
    pub track_name: Option<String>,
    /// Artist name
    pub artist_name: Option<String>,
    /// Album title
    pub collection_name: Option<String>,
    /// Genre (e.g., "Pop", "Rock")
    pub primary_genre_name: Option<String>,
    /// ISO-8601 release timestamp (e.g., "1987-11-12T08:00:00Z")
    pub release_date: Option<String>,
    /// 100x100 artwork thumbnail URL
    pub artwork_url_100: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================
