//! The fetch command: download, resolve, tag.

use std::path::Path;

use anyhow::Context;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::download::{self, DownloadOptions, DownloadedAudio};
use crate::lookup::Resolver;
use crate::tagger;

use super::{build_resolver, tagging_skipped};

/// Download one URL (or the batch list) and tag each resulting MP3.
#[allow(clippy::too_many_arguments)]
pub fn cmd_fetch(
    rt: &Runtime,
    config: &Config,
    url: Option<&str>,
    outdir: Option<&Path>,
    bitrate: Option<u32>,
    allow_playlist: bool,
    skip_tag: bool,
    list_file: &Path,
) -> anyhow::Result<()> {
    if !download::is_ytdlp_available() {
        eprintln!("Error: yt-dlp not found.");
        eprintln!("Install it:");
        eprintln!("  Windows: winget install yt-dlp");
        eprintln!("  macOS:   brew install yt-dlp");
        eprintln!("  Linux:   pip install yt-dlp");
        anyhow::bail!("yt-dlp is required");
    }
    if !download::is_ffmpeg_available() {
        eprintln!("Error: ffmpeg not found (needed for MP3 conversion).");
        eprintln!("Install it from https://ffmpeg.org/download.html or your package manager.");
        anyhow::bail!("ffmpeg is required");
    }

    let options = DownloadOptions {
        directory: outdir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| config.download.directory()),
        bitrate: bitrate.unwrap_or(config.download.bitrate),
        timeout: config.network.download_timeout(),
        allow_playlist,
    };

    std::fs::create_dir_all(&options.directory)
        .with_context(|| format!("creating output directory {:?}", options.directory))?;

    let urls: Vec<String> = match url {
        Some(u) => vec![download::normalize_url(u, allow_playlist)],
        None => download::read_url_list(list_file)
            .with_context(|| format!("reading batch list {:?}", list_file))?
            .iter()
            .map(|u| download::normalize_url(u, allow_playlist))
            .collect(),
    };
    if urls.is_empty() {
        anyhow::bail!("no URLs to download in {:?}", list_file);
    }

    // Tagging is best-effort and can be switched off wholesale; without it
    // no resolver (and no provider traffic) exists at all.
    let resolver = if tagging_skipped(skip_tag, config) {
        println!("Tagging disabled; files will keep whatever tags the download left");
        None
    } else {
        Some(build_resolver(config))
    };

    let mut failures: Vec<String> = Vec::new();

    rt.block_on(async {
        for (i, url) in urls.iter().enumerate() {
            println!("\n[{}/{}] {}", i + 1, urls.len(), url);
            match fetch_one(url, &options, resolver.as_ref()).await {
                Ok(()) => println!("✓ Done"),
                Err(e) => {
                    eprintln!("✗ Failed: {e:#}");
                    failures.push(url.clone());
                }
            }
        }
    });

    if failures.is_empty() {
        println!("\nAll done. Files saved to: {}", options.directory.display());
        Ok(())
    } else {
        eprintln!("\nSome downloads failed:");
        for url in &failures {
            eprintln!(" - {url}");
        }
        anyhow::bail!("{} of {} downloads failed", failures.len(), urls.len());
    }
}

/// One URL: download (possibly several files for a playlist), then resolve
/// and tag each. Tagging trouble is reported but never fails the job; the
/// audio on disk is the deliverable.
async fn fetch_one(
    url: &str,
    options: &DownloadOptions,
    resolver: Option<&Resolver>,
) -> anyhow::Result<()> {
    let downloads = download::fetch_audio(url, options).await?;

    for audio in &downloads {
        println!("  {}", audio.path.display());
        if let Some(resolver) = resolver {
            resolve_and_tag(resolver, audio).await;
        }
    }

    Ok(())
}

async fn resolve_and_tag(resolver: &Resolver, audio: &DownloadedAudio) {
    let tags = resolver
        .resolve(&audio.title, &audio.video_id)
        .await
        .or_artist(audio.uploader.as_deref())
        .replace_various_artists(audio.uploader.as_deref());
    let artwork = resolver.fetch_artwork(&tags).await;

    match tagger::apply_tags(&audio.path, &tags, artwork.as_ref()) {
        Ok(()) => {
            let label = match (&tags.artist, &tags.title) {
                (Some(artist), Some(title)) => format!("{artist} — {title}"),
                (None, Some(title)) => title.clone(),
                (Some(artist), None) => artist.clone(),
                (None, None) => audio.title.clone(),
            };
            let cover = if artwork.is_some() { " + cover" } else { "" };
            println!("  ✓ Tagged: {label}{cover}");
        }
        Err(e) => {
            // The MP3 exists and plays fine; only the tags are missing
            eprintln!("  ⚠ Tagging failed (file kept): {e}");
        }
    }
}
