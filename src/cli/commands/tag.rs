//! The tag command: resolve metadata for an existing file and write it.

use std::path::Path;

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::tagger;

use super::{build_resolver, print_resolved};

/// Resolve and tag one audio file already on disk.
///
/// The raw title comes from `--title` or the file stem; files produced by
/// the fetch command carry a trailing `[videoId]` in the stem, which is
/// split back out and recorded in the comment frame.
pub fn cmd_tag(
    rt: &Runtime,
    config: &Config,
    path: &Path,
    title: Option<&str>,
    skip_artwork: bool,
) -> anyhow::Result<()> {
    if !path.is_file() {
        anyhow::bail!("no such file: {}", path.display());
    }

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let (stem_title, stem_id) = split_stem(stem);

    let raw_title = title.unwrap_or(stem_title);
    if raw_title.is_empty() {
        anyhow::bail!("could not derive a title from {}; pass --title", path.display());
    }
    let video_id = stem_id.unwrap_or_default();

    let resolver = build_resolver(config);
    let (tags, artwork) = rt.block_on(async {
        let tags = resolver.resolve(raw_title, video_id).await;
        let artwork = if skip_artwork {
            None
        } else {
            resolver.fetch_artwork(&tags).await
        };
        (tags, artwork)
    });

    print_resolved(&tags);
    println!();

    tagger::apply_tags(path, &tags, artwork.as_ref())?;
    let cover = if artwork.is_some() { " with cover art" } else { "" };
    println!("✓ Wrote tags{} to {}", cover, path.display());

    Ok(())
}

/// Split the downloader's `Title [videoId]` stem convention back apart.
/// A stem without a trailing bracket group passes through whole.
fn split_stem(stem: &str) -> (&str, Option<&str>) {
    let trimmed = stem.trim_end();
    if let Some(rest) = trimmed.strip_suffix(']') {
        if let Some(open) = rest.rfind('[') {
            let id = rest[open + 1..].trim();
            let title = rest[..open].trim_end();
            if !id.is_empty() && !title.is_empty() {
                return (title, Some(id));
            }
        }
    }
    (trimmed, None)
}
