//! Internal domain models for metadata resolution.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All provider responses get converted into these types via adapters.

/// One candidate metadata record returned by a provider.
///
/// Every provider-sourced field is optional; a record is only a usable
/// candidate when it carries at least a title or an artist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackRecord {
    /// Track title
    pub title: Option<String>,
    /// Artist name (combined credit for collaborations)
    pub artist: Option<String>,
    /// Album title
    pub album: Option<String>,
    /// Release year
    pub year: Option<i32>,
    /// Genre name
    pub genre: Option<String>,
    /// URL of the best artwork variant the provider offers
    pub artwork_url: Option<String>,
    /// Which provider produced this record
    pub source: ProviderKind,
}

impl TrackRecord {
    /// An empty record attributed to a provider, for building up in adapters.
    pub fn empty(source: ProviderKind) -> Self {
        Self {
            title: None,
            artist: None,
            album: None,
            year: None,
            genre: None,
            artwork_url: None,
            source,
        }
    }

    /// A record is usable when it identifies the track at all.
    pub fn is_usable(&self) -> bool {
        self.title.is_some() || self.artist.is_some()
    }
}

/// The final tags chosen for one conversion job.
///
/// Built exactly once per job by the resolver, consumed by the tag writer.
/// `video_id` is passed through from the download, never provider-sourced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTags {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub album: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub artwork_url: Option<String>,
    /// Provider that won the lookup; `None` when resolution degraded
    pub source: Option<ProviderKind>,
    /// Source video identifier, stored in a comment frame
    pub video_id: String,
}

impl ResolvedTags {
    /// Adopt an accepted provider record wholesale.
    pub fn from_record(record: TrackRecord, video_id: &str) -> Self {
        Self {
            title: record.title,
            artist: record.artist,
            album: record.album,
            year: record.year,
            genre: record.genre,
            artwork_url: record.artwork_url,
            source: Some(record.source),
            video_id: video_id.to_string(),
        }
    }

    /// Minimal result when every provider failed: the cleaned query becomes
    /// the title and everything else stays absent.
    pub fn degraded(clean_title: String, video_id: &str) -> Self {
        Self {
            title: Some(clean_title),
            artist: None,
            album: None,
            year: None,
            genre: None,
            artwork_url: None,
            source: None,
            video_id: video_id.to_string(),
        }
    }

    /// Fill in the artist from a fallback (e.g. the video uploader) when no
    /// provider supplied one. A present artist is never overwritten.
    pub fn or_artist(mut self, fallback: Option<&str>) -> Self {
        if self.artist.is_none() {
            self.artist = fallback.map(str::to_string);
        }
        self
    }

    /// Swap a "Various Artists" compilation credit for a fallback (the video
    /// uploader). Adapters already prefer real credits during selection, but
    /// a compilation can still win when it is the only candidate, and that
    /// credit is useless for sorting a music library.
    pub fn replace_various_artists(mut self, fallback: Option<&str>) -> Self {
        let is_va = |s: &str| s.eq_ignore_ascii_case("various artists");

        if self.artist.as_deref().is_some_and(is_va) {
            if let Some(fallback) = fallback.filter(|f| !is_va(f)) {
                self.artist = Some(fallback.to_string());
            }
        }
        self
    }
}

/// The fixed set of metadata providers, in no particular order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    MusicBrainz,
    Itunes,
    LastFm,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ProviderKind::MusicBrainz => "MusicBrainz",
            ProviderKind::Itunes => "iTunes",
            ProviderKind::LastFm => "Last.fm",
        };
        f.write_str(name)
    }
}

/// Failure modes shared by every provider. All of them are non-fatal and
/// drive fallback to the next provider in the chain.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("request timed out")]
    Timeout,

    #[error("no usable match found")]
    NoMatch,

    #[error("service unavailable: {0}")]
    Unavailable(String),
}
