//! Adapter layer: Convert Last.fm DTOs to domain records
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if Last.fm changes their response format,
//! only this file and dto.rs need to change.

use super::dto;
use crate::lookup::domain::{ProviderKind, TrackRecord};

/// Pick the best track from a search response and convert it
pub fn best_record(response: dto::SearchResponse) -> Option<TrackRecord> {
    let tracks = response
        .results
        .as_ref()
        .and_then(|r| r.track_matches.as_ref())
        .map(|m| m.track.as_slice())
        .unwrap_or(&[]);

    pick_track(tracks).map(to_record)
}

/// Most-listened candidate wins; first-wins on ties so the ordering stays
/// deterministic.
fn pick_track(tracks: &[dto::Track]) -> Option<&dto::Track> {
    let mut best: Option<(&dto::Track, u64)> = None;

    for track in tracks {
        let count = listeners(track);
        if best.map_or(true, |(_, c)| count > c) {
            best = Some((track, count));
        }
    }

    best.map(|(track, _)| track)
}

/// Listener counts arrive as decimal strings; anything unparseable counts
/// as zero.
fn listeners(track: &dto::Track) -> u64 {
    track
        .listeners
        .as_deref()
        .and_then(|l| l.parse().ok())
        .unwrap_or(0)
}

/// Convert a single track to a domain record.
/// Track search carries no album, year, or genre.
fn to_record(track: &dto::Track) -> TrackRecord {
    TrackRecord {
        title: track.name.clone().filter(|s| !s.is_empty()),
        artist: track.artist.clone().filter(|s| !s.is_empty()),
        album: None,
        year: None,
        genre: None,
        artwork_url: pick_image(&track.image),
        source: ProviderKind::LastFm,
    }
}

/// Prefer the extralarge rendition; otherwise the largest non-blank URL.
/// Renditions are listed smallest first, and blank URLs are common.
fn pick_image(images: &[dto::Image]) -> Option<String> {
    images
        .iter()
        .find(|i| i.size.as_deref() == Some("extralarge") && !i.url.is_empty())
        .or_else(|| images.iter().rev().find(|i| !i.url.is_empty()))
        .map(|i| i.url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_track(artist: &str, title: &str, listeners: &str) -> dto::Track {
        dto::Track {
            name: Some(title.to_string()),
            artist: Some(artist.to_string()),
            listeners: Some(listeners.to_string()),
            mbid: None,
            image: vec![],
        }
    }

    fn response_of(tracks: Vec<dto::Track>) -> dto::SearchResponse {
        dto::SearchResponse {
            results: Some(dto::Results {
                track_matches: Some(dto::TrackMatches { track: tracks }),
            }),
            error: None,
            message: None,
        }
    }

    #[test]
    fn test_empty_response_yields_nothing() {
        assert!(best_record(response_of(vec![])).is_none());
    }

    #[test]
    fn test_missing_results_wrapper_yields_nothing() {
        let response = dto::SearchResponse {
            results: None,
            error: None,
            message: None,
        };

        assert!(best_record(response).is_none());
    }

    #[test]
    fn test_most_listened_wins() {
        let tracks = vec![
            make_track("Cover Band", "Never Gonna Give You Up", "1042"),
            make_track("Rick Astley", "Never Gonna Give You Up", "2153795"),
        ];

        let record = best_record(response_of(tracks)).unwrap();

        assert_eq!(record.artist.as_deref(), Some("Rick Astley"));
        assert_eq!(record.source, ProviderKind::LastFm);
    }

    #[test]
    fn test_tie_keeps_earlier_candidate() {
        let tracks = vec![
            make_track("First Band", "Song", "500"),
            make_track("Second Band", "Song", "500"),
        ];

        let record = best_record(response_of(tracks)).unwrap();

        assert_eq!(record.artist.as_deref(), Some("First Band"));
    }

    #[test]
    fn test_unparseable_listeners_count_as_zero() {
        let tracks = vec![
            make_track("Broken Count", "Song", "not-a-number"),
            make_track("Real Count", "Song", "12"),
        ];

        let record = best_record(response_of(tracks)).unwrap();

        assert_eq!(record.artist.as_deref(), Some("Real Count"));
    }

    #[test]
    fn test_no_album_year_or_genre() {
        let record = best_record(response_of(vec![make_track("A", "B", "1")])).unwrap();

        assert!(record.album.is_none());
        assert!(record.year.is_none());
        assert!(record.genre.is_none());
    }

    #[test]
    fn test_prefers_extralarge_image() {
        let mut track = make_track("Rick Astley", "Song", "10");
        track.image = vec![
            dto::Image {
                url: "https://img/small.png".to_string(),
                size: Some("small".to_string()),
            },
            dto::Image {
                url: "https://img/xl.png".to_string(),
                size: Some("extralarge".to_string()),
            },
        ];

        let record = best_record(response_of(vec![track])).unwrap();

        assert_eq!(record.artwork_url.as_deref(), Some("https://img/xl.png"));
    }

    #[test]
    fn test_blank_extralarge_falls_back_to_largest() {
        let mut track = make_track("Rick Astley", "Song", "10");
        track.image = vec![
            dto::Image {
                url: "https://img/small.png".to_string(),
                size: Some("small".to_string()),
            },
            dto::Image {
                url: "https://img/large.png".to_string(),
                size: Some("large".to_string()),
            },
            dto::Image {
                url: String::new(),
                size: Some("extralarge".to_string()),
            },
        ];

        let record = best_record(response_of(vec![track])).unwrap();

        assert_eq!(record.artwork_url.as_deref(), Some("https://img/large.png"));
    }

    #[test]
    fn test_all_blank_images_yield_no_artwork() {
        let mut track = make_track("Rick Astley", "Song", "10");
        track.image = vec![dto::Image {
            url: String::new(),
            size: Some("small".to_string()),
        }];

        let record = best_record(response_of(vec![track])).unwrap();

        assert!(record.artwork_url.is_none());
    }
}
