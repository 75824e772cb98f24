//! Last.fm API Data Transfer Objects
//!
//! These types match EXACTLY what the Last.fm API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the lastfm module - convert to domain types.
//!
//! API Reference: https://www.last.fm/api/show/track.search
//!
//! The JSON is converted from XML server-side, which shows: numbers arrive
//! as strings and image URLs live under a "#text" key. Errors are reported
//! in-band as {"error": <code>, "message": "..."}, sometimes with HTTP 200.

use serde::{Deserialize, Serialize};

/// Track search response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Search results (absent on error responses)
    pub results: Option<Results>,
    /// In-band error code (e.g., 10 = invalid API key)
    pub error: Option<i32>,
    /// Human-readable error message
    pub message: Option<String>,
}

/// Search results wrapper
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Results {
    /// Matched tracks wrapper
    #[serde(rename = "trackmatches")]
    pub track_matches: Option<TrackMatches>,
}

/// Matched tracks list
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackMatches {
    /// Matched tracks, best relevance first
    #[serde(default)]
    pub track: Vec<Track>,
}

/// A single track match
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    /// Track title
    pub name: Option<String>,
    /// Artist name (plain string in search results)
    pub artist: Option<String>,
    /// Listener count as a decimal string
    pub listeners: Option<String>,
    /// MusicBrainz recording ID, often empty
    pub mbid: Option<String>,
    /// Artwork renditions, smallest first
    #[serde(default)]
    pub image: Vec<Image>,
}

/// One artwork rendition
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    /// Image URL, frequently an empty string
    #[serde(rename = "#text")]
    pub url: String,
    /// Rendition name (small, medium, large, extralarge)
    pub size: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    /// Test parsing a search response with one match
    #[test]
    fn test_parse_search_match() {
        let json = r##"{
            "results": {
                "opensearch:totalResults": "212353",
                "trackmatches": {
                    "track": [{
                        "name": "Never Gonna Give You Up",
                        "artist": "Rick Astley",
                        "url": "https://www.last.fm/music/Rick+Astley/_/Never+Gonna+Give+You+Up",
                        "streamable": "0",
                        "listeners": "2153795",
                        "image": [
                            {"#text": "https://lastfm.freetls.fastly.net/i/u/34s/cover.png", "size": "small"},
                            {"#text": "https://lastfm.freetls.fastly.net/i/u/300x300/cover.png", "size": "extralarge"}
                        ],
                        "mbid": "8f3471b5-7e6a-48da-86a9-c1c07a0f47ae"
                    }]
                }
            }
        }"##;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse search match");

        assert!(response.error.is_none());
        let tracks = &response
            .results
            .as_ref()
            .unwrap()
            .track_matches
            .as_ref()
            .unwrap()
            .track;
        assert_eq!(tracks.len(), 1);
        assert_eq!(tracks[0].name.as_deref(), Some("Never Gonna Give You Up"));
        assert_eq!(tracks[0].artist.as_deref(), Some("Rick Astley"));
        assert_eq!(tracks[0].listeners.as_deref(), Some("2153795"));
        assert_eq!(tracks[0].image[1].size.as_deref(), Some("extralarge"));
    }

    /// Test parsing an empty result set
    #[test]
    fn test_parse_empty_matches() {
        let json = r#"{
            "results": {
                "trackmatches": {
                    "track": []
                }
            }
        }"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse empty matches");

        let tracks = &response
            .results
            .unwrap()
            .track_matches
            .unwrap()
            .track;
        assert!(tracks.is_empty());
    }

    /// Test parsing an in-band error payload
    #[test]
    fn test_parse_error_payload() {
        let json = r#"{
            "error": 10,
            "message": "Invalid API key - You must be granted a valid key by last.fm"
        }"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse error payload");

        assert_eq!(response.error, Some(10));
        assert!(response.message.unwrap().contains("Invalid API key"));
        assert!(response.results.is_none());
    }

    /// Test parsing empty-string image URLs
    #[test]
    fn test_parse_blank_images() {
        let json = r##"{
            "results": {
                "trackmatches": {
                    "track": [{
                        "name": "Obscure Song",
                        "artist": "Unknown Band",
                        "image": [
                            {"#text": "", "size": "small"},
                            {"#text": "", "size": "extralarge"}
                        ]
                    }]
                }
            }
        }"##;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse blank images");

        let track = &response.results.unwrap().track_matches.unwrap().track[0];
        assert_eq!(track.image.len(), 2);
        assert!(track.image.iter().all(|i| i.url.is_empty()));
    }
}
