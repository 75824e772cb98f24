//! Audio file tag writing.
//!
//! Uses the lofty crate for format-independent metadata access. Downloaded
//! files arrive with whatever tags the downloader embedded (source URL,
//! description text), so the existing tag is cleared before the resolved
//! fields are written.
//!
//! Tagging failures are warnings at the pipeline level: the audio is
//! already on disk and a missing tag is not worth losing the download over.

use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, Tag, TagExt};
use thiserror::Error;

use crate::lookup::{Artwork, ResolvedTags};

/// Errors from tag writing
#[derive(Debug, Error)]
pub enum TagError {
    /// The file is not a container lofty can write tags into
    #[error("unsupported container format: {0}")]
    UnsupportedContainer(PathBuf),

    /// The file could not be read or rewritten
    #[error("failed to write tags to {path}: {message}")]
    Io { path: PathBuf, message: String },
}

/// Genre written when no provider supplied one
const DEFAULT_GENRE: &str = "Unknown";

/// Encoder note embedded alongside the tags
const ENCODER: &str = concat!("TuneGrab ", env!("CARGO_PKG_VERSION"));

/// Comment linking a file back to its source video
pub fn reference_comment(video_id: &str) -> String {
    format!("YouTube: {video_id}")
}

/// Write resolved tags (and optional artwork) to an audio file.
///
/// The existing tag is cleared first so stale downloader metadata does not
/// linger. Album artist mirrors the artist, and the comment records the
/// source video ID even in the degraded no-match case.
pub fn apply_tags(
    path: &Path,
    tags: &ResolvedTags,
    artwork: Option<&Artwork>,
) -> Result<(), TagError> {
    let mut tagged_file = Probe::open(path)
        .map_err(|e| classify(path, e))?
        .read()
        .map_err(|e| classify(path, e))?;

    let tag_type = tagged_file.primary_tag_type();

    // Get or create the tag
    let tag = if let Some(tag) = tagged_file.tag_mut(tag_type) {
        tag
    } else {
        tagged_file.insert_tag(Tag::new(tag_type));
        tagged_file.tag_mut(tag_type).expect("Just inserted tag")
    };

    populate_tag(tag, tags, artwork);

    tag.save_to_path(path, WriteOptions::default())
        .map_err(|e| classify(path, e))?;

    Ok(())
}

/// Replace a tag's contents with the resolved fields. Frames the container
/// format cannot represent are dropped on save; that is the format's
/// limitation, not ours.
fn populate_tag(tag: &mut Tag, tags: &ResolvedTags, artwork: Option<&Artwork>) {
    tag.clear();

    if let Some(ref title) = tags.title {
        tag.set_title(title.clone());
    }

    if let Some(ref artist) = tags.artist {
        tag.set_artist(artist.clone());
        // No release-level credit available, so mirror the track artist
        tag.insert_text(ItemKey::AlbumArtist, artist.clone());
    }

    if let Some(ref album) = tags.album {
        tag.set_album(album.clone());
    }

    if let Some(year) = tags.year {
        tag.set_year(year as u32);
    }

    tag.set_genre(
        tags.genre
            .clone()
            .unwrap_or_else(|| DEFAULT_GENRE.to_string()),
    );

    // Files tagged outside the download flow may have no source video at
    // all; an empty reference comment helps nobody.
    if !tags.video_id.is_empty() {
        tag.set_comment(reference_comment(&tags.video_id));
    }
    tag.insert_text(ItemKey::EncoderSoftware, ENCODER.to_string());

    if let Some(artwork) = artwork {
        tag.push_picture(Picture::new_unchecked(
            PictureType::CoverFront,
            Some(mime_from_str(&artwork.mime_type)),
            None,
            artwork.data.clone(),
        ));
    }
}

/// Map a MIME string (possibly with parameters) to lofty's picture type
fn mime_from_str(mime: &str) -> MimeType {
    let essence = mime.split(';').next().unwrap_or("").trim();
    match essence {
        "image/bmp" => MimeType::Bmp,
        "image/gif" => MimeType::Gif,
        "image/jpeg" => MimeType::Jpeg,
        "image/png" => MimeType::Png,
        "image/tiff" => MimeType::Tiff,
        other => MimeType::Unknown(other.to_string()),
    }
}

/// Distinguish "not an audio container" from plain I/O trouble
fn classify(path: &Path, error: lofty::error::LoftyError) -> TagError {
    match error.kind() {
        lofty::error::ErrorKind::UnknownFormat => {
            TagError::UnsupportedContainer(path.to_path_buf())
        }
        _ => TagError::Io {
            path: path.to_path_buf(),
            message: error.to_string(),
        },
    }
}
