//! Adapter layer: Convert iTunes DTOs to domain records
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if Apple changes their response format,
//! only this file and dto.rs need to change.
//!
//! iTunes free-text search is loose, so candidates are scored against the
//! query by word overlap before one is accepted.

use std::collections::HashSet;

use super::dto;
use crate::lookup::domain::{ProviderKind, TrackRecord};

/// Minimum fraction of query words a candidate must share to be accepted
/// on score alone.
const MIN_WORD_OVERLAP: f64 = 0.3;

/// Pick the best track from a search response and convert it
pub fn best_record(query: &str, response: dto::SearchResponse) -> Option<TrackRecord> {
    pick_track(query, &response.results).map(to_record)
}

/// Highest word-overlap score wins, compilations excluded. When nothing
/// clears the threshold, fall back to the first non-compilation result,
/// then to the first result outright.
fn pick_track<'a>(query: &str, tracks: &'a [dto::Track]) -> Option<&'a dto::Track> {
    let mut best: Option<(&dto::Track, f64)> = None;

    for track in tracks {
        if is_various_artists(track) {
            continue;
        }
        let score = word_overlap(query, track);
        if score < MIN_WORD_OVERLAP {
            continue;
        }
        // Strictly greater keeps the earlier candidate on ties
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((track, score));
        }
    }

    best.map(|(track, _)| track)
        .or_else(|| tracks.iter().find(|t| !is_various_artists(t)))
        .or_else(|| tracks.first())
}

/// Fraction of query words appearing in "artist title" of the candidate
fn word_overlap(query: &str, track: &dto::Track) -> f64 {
    let query_lower = query.to_lowercase();
    let query_words: HashSet<&str> = query_lower.split_whitespace().collect();
    if query_words.is_empty() {
        return 0.0;
    }

    let candidate = format!(
        "{} {}",
        track.artist_name.as_deref().unwrap_or(""),
        track.track_name.as_deref().unwrap_or("")
    )
    .to_lowercase();
    let candidate_words: HashSet<&str> = candidate.split_whitespace().collect();

    let shared = query_words.intersection(&candidate_words).count();
    shared as f64 / query_words.len() as f64
}

fn is_various_artists(track: &dto::Track) -> bool {
    track
        .artist_name
        .as_deref()
        .map(|artist| artist.to_lowercase().contains("various artists"))
        .unwrap_or(false)
}

/// Convert a single track to a domain record
fn to_record(track: &dto::Track) -> TrackRecord {
    TrackRecord {
        title: track.track_name.clone(),
        artist: track.artist_name.clone(),
        album: track.collection_name.clone(),
        year: track.release_date.as_deref().and_then(parse_year),
        genre: track.primary_genre_name.clone(),
        artwork_url: track.artwork_url_100.as_deref().map(upscale_artwork_url),
        source: ProviderKind::Itunes,
    }
}

/// Release dates look like "1987-11-12T08:00:00Z"
fn parse_year(date: &str) -> Option<i32> {
    date.split('-').next().and_then(|y| y.parse().ok())
}

/// The search API only hands out 100px thumbnails, but the CDN serves any
/// size encoded in the filename.
fn upscale_artwork_url(url: &str) -> String {
    url.replace("100x100bb", "600x600bb")
}
