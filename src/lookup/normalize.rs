//! Title cleanup before metadata lookup.
//!
//! Video titles carry annotations that ruin text search ("(Official Video)",
//! "[HD]", channel branding like "ArtistVEVO"). Everything from the first
//! such marker onward is cut, since uploaders append them after the real
//! title.

/// Markers that start the noise tail of a title. Matched case-insensitively;
/// the match position and everything after it are discarded.
const NOISE_MARKERS: &[&str] = &[
    "(official video)",
    "(official music video)",
    "(official audio)",
    "(lyric video)",
    "(live)",
    "(hd)",
    "(4k)",
    "[official video]",
    "[official music video]",
    "[official audio]",
    "[lyric video]",
    "[hd]",
    "[4k]",
];

/// Channel branding that clings to the end of a title, sometimes without a
/// separating space ("ArtistVEVO", "Artist - Topic").
const CHANNEL_SUFFIXES: &[&str] = &["- topic", "vevo"];

/// Strip noise annotations from a raw video title, producing the query text
/// used for provider lookups.
///
/// Pure and deterministic, and idempotent: cleaning an already-clean title
/// returns it unchanged.
pub fn clean_title(raw: &str) -> String {
    // Collapse whitespace first so marker matching is stable regardless of
    // the uploader's spacing.
    let mut text = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    // Cut at the earliest noise marker. Markers are pure ASCII, so the
    // ASCII-lowercased copy has identical byte offsets.
    loop {
        let lower = text.to_ascii_lowercase();
        let Some(cut) = NOISE_MARKERS.iter().filter_map(|m| lower.find(m)).min() else {
            break;
        };
        text.truncate(cut);
    }

    // Peel channel suffixes until the end of the title is clean.
    loop {
        text.truncate(text.trim_end().len());
        let lower = text.to_ascii_lowercase();
        let Some(suffix) = CHANNEL_SUFFIXES.iter().find(|s| lower.ends_with(*s)) else {
            break;
        };
        text.truncate(text.len() - suffix.len());
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_title_unchanged() {
        assert_eq!(clean_title("Never Gonna Give You Up"), "Never Gonna Give You Up");
    }

    #[test]
    fn test_strips_official_video_and_quality_tail() {
        assert_eq!(
            clean_title("Rick Astley - Never Gonna Give You Up (Official Video) [HD]"),
            "Rick Astley - Never Gonna Give You Up"
        );
    }

    #[test]
    fn test_marker_match_is_case_insensitive() {
        assert_eq!(clean_title("Song (OFFICIAL VIDEO)"), "Song");
        assert_eq!(clean_title("Song [Official Audio]"), "Song");
    }

    #[test]
    fn test_earliest_marker_wins() {
        assert_eq!(clean_title("Song (Live) at Wembley (HD)"), "Song");
        assert_eq!(clean_title("Song (HD) then (Live)"), "Song");
    }

    #[test]
    fn test_strips_topic_suffix() {
        assert_eq!(clean_title("Daft Punk - Topic"), "Daft Punk");
    }

    #[test]
    fn test_strips_vevo_without_space() {
        assert_eq!(clean_title("TaylorSwiftVEVO"), "TaylorSwift");
    }

    #[test]
    fn test_strips_stacked_suffixes() {
        assert_eq!(clean_title("Artist VEVO - Topic"), "Artist");
    }

    #[test]
    fn test_collapses_whitespace() {
        assert_eq!(clean_title("  Artist   -  Song  "), "Artist - Song");
    }

    #[test]
    fn test_marker_with_irregular_spacing() {
        assert_eq!(clean_title("Song (Official  Video)"), "Song");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(clean_title(""), "");
    }

    #[test]
    fn test_unicode_title_preserved() {
        assert_eq!(clean_title("گوگوش - مرداب (Official Video)"), "گوگوش - مرداب");
    }
}
