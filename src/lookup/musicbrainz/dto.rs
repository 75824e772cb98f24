//! MusicBrainz search API Data Transfer Objects
//!
//! These types match EXACTLY what the MusicBrainz API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the musicbrainz module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API/Search
//!
//! We use the /recording search endpoint with a free-text query built from
//! the cleaned video title.

use serde::{Deserialize, Serialize};

/// Recording search response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchResponse {
    /// Total number of matches on the server (we only fetch a few)
    pub count: Option<u64>,
    /// Matched recordings, best relevance first
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

/// Recording as returned by the search endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Recording {
    /// MusicBrainz recording ID
    pub id: String,
    /// Track title
    pub title: String,
    /// Search relevance score (0-100)
    pub score: Option<u32>,
    /// Duration in milliseconds
    pub length: Option<u64>,
    /// Artist credits
    #[serde(default)]
    pub artist_credit: Vec<ArtistCredit>,
    /// Releases this recording appears on
    #[serde(default)]
    pub releases: Vec<Release>,
    /// Community tags with vote counts
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Artist credit (can be multiple for collaborations)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArtistCredit {
    /// The artist
    pub artist: Artist,
    /// How this artist is credited (may differ from official name)
    pub name: Option<String>,
    /// Join phrase (e.g., " & ", " feat. ")
    pub joinphrase: Option<String>,
}

/// Artist info
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Artist {
    /// MusicBrainz artist ID
    pub id: String,
    /// Official artist name
    pub name: String,
    /// Sort name (e.g., "Astley, Rick")
    pub sort_name: Option<String>,
}

/// Release (album/single/EP)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Release {
    /// MusicBrainz release ID (also the Cover Art Archive key)
    pub id: String,
    /// Release title
    pub title: String,
    /// Release status (Official, Bootleg, etc.)
    pub status: Option<String>,
    /// Release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub date: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Release group (groups same album across editions)
    pub release_group: Option<ReleaseGroup>,
}

/// Release group as embedded in search results
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseGroup {
    /// MusicBrainz release group ID
    pub id: String,
    /// Primary type (Album, Single, EP, etc.)
    pub primary_type: Option<String>,
}

/// Community tag with vote count
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tag {
    /// Net votes for this tag
    pub count: i64,
    /// Tag name, lowercase (e.g., "synth-pop")
    pub name: String,
}

/// Error response from MusicBrainz API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    /// Test parsing a minimal search response
    #[test]
    fn test_parse_empty_search() {
        let json = r#"{
            "created": "2024-01-01T00:00:00.000Z",
            "count": 0,
            "offset": 0,
            "recordings": []
        }"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse empty search");

        assert_eq!(response.count, Some(0));
        assert!(response.recordings.is_empty());
    }

    /// Test parsing a search hit with artist credits and a release
    #[test]
    fn test_parse_search_hit() {
        let json = r#"{
            "count": 342,
            "recordings": [{
                "id": "8f3471b5-7e6a-48da-86a9-c1c07a0f47ae",
                "score": 100,
                "title": "Never Gonna Give You Up",
                "length": 215000,
                "artist-credit": [{
                    "joinphrase": "",
                    "name": "Rick Astley",
                    "artist": {
                        "id": "db92a151-1ac2-438b-bc43-b82e149ddd50",
                        "name": "Rick Astley",
                        "sort-name": "Astley, Rick"
                    }
                }],
                "releases": [{
                    "id": "bf9e91ea-8029-4a04-a26a-224e00a83e2c",
                    "title": "Whenever You Need Somebody",
                    "status": "Official",
                    "date": "1987-11-12",
                    "country": "GB",
                    "release-group": {
                        "id": "57c7f9d4-0b25-3ae2-8a04-ec9eab1da0a7",
                        "primary-type": "Album"
                    }
                }]
            }]
        }"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse search hit");

        assert_eq!(response.recordings.len(), 1);
        let recording = &response.recordings[0];
        assert_eq!(recording.title, "Never Gonna Give You Up");
        assert_eq!(recording.score, Some(100));
        assert_eq!(recording.artist_credit[0].artist.name, "Rick Astley");

        let release = &recording.releases[0];
        assert_eq!(release.status, Some("Official".to_string()));
        assert_eq!(release.date, Some("1987-11-12".to_string()));
        let rg = release.release_group.as_ref().unwrap();
        assert_eq!(rg.primary_type, Some("Album".to_string()));
    }

    /// Test parsing collaboration (multiple artist credits)
    #[test]
    fn test_parse_collaboration() {
        let json = r#"{
            "recordings": [{
                "id": "rec-collab",
                "title": "Under Pressure",
                "artist-credit": [
                    {
                        "artist": {"id": "queen-id", "name": "Queen"},
                        "joinphrase": " & "
                    },
                    {
                        "artist": {"id": "bowie-id", "name": "David Bowie"},
                        "joinphrase": ""
                    }
                ]
            }]
        }"#;

        let response: SearchResponse =
            serde_json::from_str(json).expect("Should parse collaboration");

        let credits = &response.recordings[0].artist_credit;
        assert_eq!(credits.len(), 2);
        assert_eq!(credits[0].artist.name, "Queen");
        assert_eq!(credits[0].joinphrase, Some(" & ".to_string()));
        assert_eq!(credits[1].artist.name, "David Bowie");
    }

    /// Test parsing community tags
    #[test]
    fn test_parse_tags() {
        let json = r#"{
            "recordings": [{
                "id": "rec-tagged",
                "title": "Tagged Song",
                "tags": [
                    {"count": 7, "name": "synth-pop"},
                    {"count": 2, "name": "dance"}
                ]
            }]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("Should parse tags");

        let tags = &response.recordings[0].tags;
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "synth-pop");
        assert_eq!(tags[0].count, 7);
    }

    /// Test parsing error response
    #[test]
    fn test_parse_error_response() {
        let json = r#"{
            "error": "Invalid query syntax",
            "help": "For usage, please see: https://musicbrainz.org/doc/MusicBrainz_API"
        }"#;

        let error: ApiError = serde_json::from_str(json).expect("Should parse error");
        assert_eq!(error.error, "Invalid query syntax");
        assert!(error.help.is_some());
    }
}
