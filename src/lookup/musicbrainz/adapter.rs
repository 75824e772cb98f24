//! Adapter layer: Convert MusicBrainz DTOs to domain records
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if MusicBrainz changes their response format,
//! only this file and dto.rs need to change.

use super::dto;
use crate::lookup::domain::{ProviderKind, TrackRecord};

/// Cover Art Archive is keyed by MusicBrainz release ID; the front-500
/// endpoint redirects to a 500px rendition of the front cover.
const COVER_ART_BASE: &str = "https://coverartarchive.org/release";

/// Pick the best recording from a search response and convert it
pub fn best_record(response: dto::SearchResponse) -> Option<TrackRecord> {
    pick_recording(&response.recordings).map(to_record)
}

/// Results arrive in relevance order, so earlier is better. Compilation
/// placeholders ("Various Artists") are skipped when a real credit exists,
/// since they produce useless artist tags.
fn pick_recording(recordings: &[dto::Recording]) -> Option<&dto::Recording> {
    recordings
        .iter()
        .find(|r| !is_various_artists(&r.artist_credit))
        .or_else(|| recordings.first())
}

fn is_various_artists(credits: &[dto::ArtistCredit]) -> bool {
    build_artist_string(credits)
        .map(|artist| artist.eq_ignore_ascii_case("various artists"))
        .unwrap_or(false)
}

/// Convert a single recording to a domain record
fn to_record(recording: &dto::Recording) -> TrackRecord {
    let release = pick_release(&recording.releases);

    // Parse year from date (YYYY, YYYY-MM, or YYYY-MM-DD)
    let year = release
        .and_then(|r| r.date.as_ref())
        .and_then(|d| d.split('-').next())
        .and_then(|y| y.parse().ok());

    TrackRecord {
        title: Some(recording.title.clone()),
        artist: build_artist_string(&recording.artist_credit),
        album: release.map(|r| r.title.clone()),
        year,
        genre: top_genre(&recording.tags),
        artwork_url: release.map(|r| format!("{}/{}/front-500", COVER_ART_BASE, r.id)),
        source: ProviderKind::MusicBrainz,
    }
}

/// Build a combined artist string from artist credits
fn build_artist_string(credits: &[dto::ArtistCredit]) -> Option<String> {
    if credits.is_empty() {
        return None;
    }

    let mut combined = String::new();
    for credit in credits {
        // Credited name can differ from the canonical artist name
        combined.push_str(credit.name.as_deref().unwrap_or(&credit.artist.name));
        if let Some(join) = credit.joinphrase.as_deref() {
            combined.push_str(join);
        }
    }
    Some(combined)
}

/// Pick the release used for album, year, and artwork.
/// Prefer official album releases over singles/bootlegs.
fn pick_release(releases: &[dto::Release]) -> Option<&dto::Release> {
    releases
        .iter()
        .find(|r| {
            r.status.as_deref() == Some("Official")
                && r.release_group
                    .as_ref()
                    .and_then(|rg| rg.primary_type.as_deref())
                    == Some("Album")
        })
        .or_else(|| {
            // Fall back to any official release
            releases
                .iter()
                .find(|r| r.status.as_deref() == Some("Official"))
        })
        .or_else(|| releases.first())
}

/// Most-voted community tag, capitalized for display
fn top_genre(tags: &[dto::Tag]) -> Option<String> {
    let mut voted: Vec<_> = tags.iter().filter(|t| t.count > 0).collect();
    voted.sort_by(|a, b| b.count.cmp(&a.count));

    voted.first().map(|t| capitalize_words(&t.name))
}

fn capitalize_words(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_recording(id: &str, title: &str) -> dto::Recording {
        dto::Recording {
            id: id.to_string(),
            title: title.to_string(),
            score: Some(100),
            length: None,
            artist_credit: vec![],
            releases: vec![],
            tags: vec![],
        }
    }

    fn make_credit(name: &str, join: Option<&str>) -> dto::ArtistCredit {
        dto::ArtistCredit {
            artist: dto::Artist {
                id: format!("{}-id", name.to_lowercase()),
                name: name.to_string(),
                sort_name: None,
            },
            name: Some(name.to_string()),
            joinphrase: join.map(String::from),
        }
    }

    fn make_release(id: &str, title: &str, status: Option<&str>, primary_type: Option<&str>) -> dto::Release {
        dto::Release {
            id: id.to_string(),
            title: title.to_string(),
            status: status.map(String::from),
            date: None,
            country: None,
            release_group: primary_type.map(|pt| dto::ReleaseGroup {
                id: format!("rg-{}", id),
                primary_type: Some(pt.to_string()),
            }),
        }
    }

    fn response_of(recordings: Vec<dto::Recording>) -> dto::SearchResponse {
        dto::SearchResponse {
            count: Some(recordings.len() as u64),
            recordings,
        }
    }

    #[test]
    fn test_empty_response_yields_nothing() {
        assert!(best_record(response_of(vec![])).is_none());
    }

    #[test]
    fn test_minimal_recording_converts() {
        let record = best_record(response_of(vec![make_recording("rec-1", "Test Song")]))
            .expect("should produce a record");

        assert_eq!(record.title.as_deref(), Some("Test Song"));
        assert_eq!(record.source, ProviderKind::MusicBrainz);
        assert!(record.artist.is_none());
        assert!(record.album.is_none());
    }

    #[test]
    fn test_skips_various_artists_when_real_credit_follows() {
        let mut compilation = make_recording("rec-va", "Song");
        compilation.artist_credit = vec![make_credit("Various Artists", None)];

        let mut real = make_recording("rec-real", "Song");
        real.artist_credit = vec![make_credit("Rick Astley", None)];

        let record = best_record(response_of(vec![compilation, real])).unwrap();

        assert_eq!(record.artist.as_deref(), Some("Rick Astley"));
    }

    #[test]
    fn test_falls_back_to_various_artists_when_alone() {
        let mut compilation = make_recording("rec-va", "Song");
        compilation.artist_credit = vec![make_credit("Various Artists", None)];

        let record = best_record(response_of(vec![compilation])).unwrap();

        assert_eq!(record.artist.as_deref(), Some("Various Artists"));
    }

    #[test]
    fn test_build_collaboration_artist() {
        let credits = vec![
            make_credit("Queen", Some(" & ")),
            make_credit("David Bowie", None),
        ];

        assert_eq!(
            build_artist_string(&credits),
            Some("Queen & David Bowie".to_string())
        );
    }

    #[test]
    fn test_prefer_official_album_release() {
        let mut recording = make_recording("rec-1", "Song");
        recording.releases = vec![
            make_release("single", "The Single", Some("Official"), Some("Single")),
            make_release("album", "The Album", Some("Official"), Some("Album")),
        ];

        let record = to_record(&recording);

        assert_eq!(record.album.as_deref(), Some("The Album"));
        assert_eq!(
            record.artwork_url.as_deref(),
            Some("https://coverartarchive.org/release/album/front-500")
        );
    }

    #[test]
    fn test_official_beats_bootleg() {
        let mut recording = make_recording("rec-1", "Song");
        recording.releases = vec![
            make_release("boot", "Bootleg Tape", Some("Bootleg"), None),
            make_release("off", "Proper Release", Some("Official"), None),
        ];

        let record = to_record(&recording);

        assert_eq!(record.album.as_deref(), Some("Proper Release"));
    }

    #[test]
    fn test_year_parsed_from_full_date() {
        let mut recording = make_recording("rec-1", "Song");
        let mut release = make_release("rel", "Album", Some("Official"), Some("Album"));
        release.date = Some("1987-11-12".to_string());
        recording.releases = vec![release];

        assert_eq!(to_record(&recording).year, Some(1987));
    }

    #[test]
    fn test_year_parsed_from_bare_year() {
        let mut recording = make_recording("rec-1", "Song");
        let mut release = make_release("rel", "Album", None, None);
        release.date = Some("1987".to_string());
        recording.releases = vec![release];

        assert_eq!(to_record(&recording).year, Some(1987));
    }

    #[test]
    fn test_top_genre_by_votes_capitalized() {
        let mut recording = make_recording("rec-1", "Song");
        recording.tags = vec![
            dto::Tag {
                count: 2,
                name: "dance".to_string(),
            },
            dto::Tag {
                count: 7,
                name: "synth pop".to_string(),
            },
        ];

        assert_eq!(to_record(&recording).genre.as_deref(), Some("Synth Pop"));
    }

    #[test]
    fn test_downvoted_tags_ignored() {
        let mut recording = make_recording("rec-1", "Song");
        recording.tags = vec![dto::Tag {
            count: -3,
            name: "spam".to_string(),
        }];

        assert!(to_record(&recording).genre.is_none());
    }
}
