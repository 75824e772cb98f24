//! Audio download via yt-dlp
//!
//! This module shells out to the `yt-dlp` command-line tool to fetch a
//! video's audio track and convert it to MP3 (conversion itself needs
//! ffmpeg on the PATH). One invocation both downloads and reports what it
//! downloaded through `--print` directives, so no second metadata call is
//! needed.
//!
//! Install yt-dlp:
//! - Windows: `winget install yt-dlp`
//! - macOS: `brew install yt-dlp`
//! - Linux: `pip install yt-dlp` or your distro package
//!
//! ffmpeg comes from https://ffmpeg.org/download.html or any package manager.

use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;

/// Errors from the download stage
#[derive(Debug, Error)]
pub enum DownloadError {
    /// yt-dlp is not installed or not on the PATH
    #[error("yt-dlp not found. Install it from https://github.com/yt-dlp/yt-dlp")]
    ToolMissing,

    /// The download exceeded the configured time limit
    #[error("download timed out after {0} seconds")]
    Timeout(u64),

    /// yt-dlp exited with a failure status
    #[error("yt-dlp failed: {0}")]
    ToolFailed(String),

    /// yt-dlp succeeded but printed something we cannot parse
    #[error("could not parse yt-dlp output: {0}")]
    UnexpectedOutput(String),

    /// The process could not be launched at all
    #[error("failed to launch yt-dlp: {0}")]
    Launch(#[from] std::io::Error),
}

/// A finished download, as reported by yt-dlp itself
#[derive(Debug, Clone)]
pub struct DownloadedAudio {
    /// Final MP3 path on disk, after postprocessing
    pub path: PathBuf,
    /// Video ID
    pub video_id: String,
    /// Raw video title
    pub title: String,
    /// Channel name, used as an artist fallback when lookup finds none
    pub uploader: Option<String>,
}

/// Download settings
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Directory the MP3 lands in
    pub directory: PathBuf,
    /// Target MP3 bitrate in kbit/s
    pub bitrate: u32,
    /// Hard limit for a single invocation (the whole playlist, if allowed)
    pub timeout: Duration,
    /// Follow playlist URLs instead of downloading a single video
    pub allow_playlist: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            bitrate: 192,
            timeout: Duration::from_secs(120),
            allow_playlist: false,
        }
    }
}

/// Metadata line printed before the file path. The title goes last so
/// embedded pipe characters cannot break parsing.
const PRINT_TEMPLATE: &str = "%(id)s|%(uploader)s|%(title)s";

/// Output template: readable title plus the unambiguous video ID. The title
/// is capped at 200 bytes to stay clear of filesystem limits.
const OUTPUT_TEMPLATE: &str = "%(title).200B [%(id)s].%(ext)s";

/// Common installation paths for yt-dlp on Windows
#[cfg(windows)]
const YTDLP_PATHS: &[&str] = &[
    "yt-dlp", // In PATH
    r"C:\Program Files\yt-dlp\yt-dlp.exe",
    r"C:\ProgramData\chocolatey\bin\yt-dlp.exe",
];

#[cfg(not(windows))]
const YTDLP_PATHS: &[&str] = &[
    "yt-dlp", // In PATH
    "/usr/bin/yt-dlp",
    "/usr/local/bin/yt-dlp",
    "/opt/homebrew/bin/yt-dlp",
];

/// Common installation paths for ffmpeg on Windows
#[cfg(windows)]
const FFMPEG_PATHS: &[&str] = &[
    "ffmpeg", // In PATH
    r"C:\Program Files\ffmpeg\bin\ffmpeg.exe",
    r"C:\ProgramData\chocolatey\bin\ffmpeg.exe",
];

#[cfg(not(windows))]
const FFMPEG_PATHS: &[&str] = &[
    "ffmpeg", // In PATH
    "/usr/bin/ffmpeg",
    "/usr/local/bin/ffmpeg",
    "/opt/homebrew/bin/ffmpeg",
];

/// Find the yt-dlp executable, checking common installation paths
fn find_ytdlp() -> Option<&'static str> {
    YTDLP_PATHS
        .iter()
        .find(|&path| {
            std::process::Command::new(path)
                .arg("--version")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        })
        .map(|v| v as _)
}

/// Find the ffmpeg executable, checking common installation paths
fn find_ffmpeg() -> Option<&'static str> {
    FFMPEG_PATHS
        .iter()
        .find(|&path| {
            std::process::Command::new(path)
                .arg("-version")
                .output()
                .map(|o| o.status.success())
                .unwrap_or(false)
        })
        .map(|v| v as _)
}

/// Check if yt-dlp is available on the system
pub fn is_ytdlp_available() -> bool {
    find_ytdlp().is_some()
}

/// Check if ffmpeg is available on the system
pub fn is_ffmpeg_available() -> bool {
    find_ffmpeg().is_some()
}

/// Get yt-dlp version string (for diagnostics)
pub fn ytdlp_version() -> Option<String> {
    let ytdlp = find_ytdlp()?;
    std::process::Command::new(ytdlp)
        .arg("--version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

/// Get ffmpeg version line (for diagnostics)
pub fn ffmpeg_version() -> Option<String> {
    let ffmpeg = find_ffmpeg()?;
    std::process::Command::new(ffmpeg)
        .arg("-version")
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| {
            String::from_utf8_lossy(&o.stdout)
                .lines()
                .next()
                .map(str::to_string)
        })
}

/// Download audio as MP3. A plain watch URL yields one entry; a playlist
/// URL (with `allow_playlist` set) yields one entry per video.
///
/// Some videos refuse the default web client; those are retried once
/// pretending to be the Android app before giving up.
pub async fn fetch_audio(
    url: &str,
    options: &DownloadOptions,
) -> Result<Vec<DownloadedAudio>, DownloadError> {
    let ytdlp = find_ytdlp().ok_or(DownloadError::ToolMissing)?;

    match run_ytdlp(ytdlp, url, options, None).await {
        Ok(audio) => Ok(audio),
        Err(DownloadError::ToolFailed(reason)) => {
            tracing::info!("Retrying with alternative player client after: {}", reason);
            run_ytdlp(ytdlp, url, options, Some("youtube:player_client=android")).await
        }
        Err(e) => Err(e),
    }
}

/// Run one yt-dlp invocation and parse what it printed
async fn run_ytdlp(
    ytdlp: &str,
    url: &str,
    options: &DownloadOptions,
    extractor_args: Option<&str>,
) -> Result<Vec<DownloadedAudio>, DownloadError> {
    let output_template = options.directory.join(OUTPUT_TEMPLATE);

    let mut command = Command::new(ytdlp);
    command
        .arg("--no-simulate")
        .arg("--print")
        .arg(PRINT_TEMPLATE)
        .arg("--print")
        .arg("after_move:filepath")
        .arg("-x")
        .arg("--audio-format")
        .arg("mp3")
        .arg("--audio-quality")
        .arg(format!("{}K", options.bitrate))
        .arg("-o")
        .arg(&output_template)
        .arg(if options.allow_playlist {
            "--yes-playlist"
        } else {
            "--no-playlist"
        })
        .arg("--no-warnings")
        .arg(url)
        .kill_on_drop(true);

    if let Some(args) = extractor_args {
        command.arg("--extractor-args").arg(args);
    }

    let result = tokio::time::timeout(options.timeout, command.output())
        .await
        .map_err(|_| DownloadError::Timeout(options.timeout.as_secs()))?;

    let output = result?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DownloadError::ToolFailed(stderr.trim().to_string()));
    }

    parse_ytdlp_output(&String::from_utf8_lossy(&output.stdout))
}

/// yt-dlp prints one line per --print directive per video: the metadata
/// line first, then the final file path after postprocessing moves it into
/// place. Playlists produce one such pair per entry.
fn parse_ytdlp_output(stdout: &str) -> Result<Vec<DownloadedAudio>, DownloadError> {
    let mut lines = stdout.lines().filter(|l| !l.trim().is_empty());
    let mut downloads = Vec::new();

    while let Some(metadata) = lines.next() {
        let filepath = lines
            .next()
            .ok_or_else(|| DownloadError::UnexpectedOutput("missing file path line".to_string()))?;

        let mut parts = metadata.splitn(3, '|');
        let video_id = parts.next().unwrap_or("").trim();
        let uploader = parts.next().unwrap_or("").trim();
        let title = parts.next().unwrap_or("").trim();

        if video_id.is_empty() || title.is_empty() {
            return Err(DownloadError::UnexpectedOutput(format!(
                "malformed metadata line: {metadata}"
            )));
        }

        downloads.push(DownloadedAudio {
            path: PathBuf::from(filepath.trim()),
            video_id: video_id.to_string(),
            title: title.to_string(),
            uploader: normalize_uploader(uploader),
        });
    }

    if downloads.is_empty() {
        return Err(DownloadError::UnexpectedOutput(
            "yt-dlp reported no downloads".to_string(),
        ));
    }

    Ok(downloads)
}

/// yt-dlp prints "NA" for fields it could not determine
fn normalize_uploader(uploader: &str) -> Option<String> {
    match uploader {
        "" | "NA" => None,
        name => Some(name.to_string()),
    }
}

/// Query parameters that smuggle playlist context into a watch URL; with
/// any of these present yt-dlp may wander off into a whole playlist.
const PLAYLIST_PARAMS: &[&str] = &[
    "list",
    "index",
    "start_radio",
    "pp",
    "playlist",
    "playnext",
    "si",
    "t",
];

/// Return a single-video watch URL unless playlists are explicitly allowed.
///
/// `youtu.be` short links are expanded to the standard `/watch` form, and
/// playlist context is hard-stripped when `allow_playlist` is off so exactly
/// one video downloads. Non-YouTube URLs and anything that does not parse as
/// a URL at all pass through untouched.
pub fn normalize_url(raw: &str, allow_playlist: bool) -> String {
    let Ok(url) = reqwest::Url::parse(raw) else {
        return raw.to_string();
    };

    match url.host_str() {
        Some("youtu.be" | "www.youtu.be") => {
            let video_id = url.path().trim_start_matches('/');
            let mut expanded = reqwest::Url::parse("https://www.youtube.com/watch")
                .expect("static URL parses");
            {
                let mut pairs = expanded.query_pairs_mut();
                if !video_id.is_empty() {
                    pairs.append_pair("v", video_id);
                }
                if allow_playlist {
                    pairs.extend_pairs(url.query_pairs());
                }
            }
            if expanded.query() == Some("") {
                expanded.set_query(None);
            }
            expanded.to_string()
        }
        Some(host) if host.contains("youtube.com") => {
            if allow_playlist {
                return url.to_string();
            }
            let mut tidied = url.clone();
            let kept: Vec<(String, String)> = url
                .query_pairs()
                .filter(|(key, _)| !PLAYLIST_PARAMS.contains(&key.as_ref()))
                .map(|(key, value)| (key.into_owned(), value.into_owned()))
                .collect();

            tidied.set_query(None);
            if !kept.is_empty() {
                tidied.query_pairs_mut().extend_pairs(&kept);
            }
            tidied.to_string()
        }
        _ => raw.to_string(),
    }
}

/// Read a batch file of URLs, one per line.
/// Blank lines and lines starting with '#' are skipped.
pub fn read_url_list(path: &Path) -> std::io::Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}
