//! The tools command: report on the external tools and credentials.

use crate::config::Config;
use crate::download;

/// Check that yt-dlp and ffmpeg are installed and show what lookup has to
/// work with.
pub fn cmd_tools(config: &Config) -> anyhow::Result<()> {
    println!("Checking external tools...");
    println!();

    match download::ytdlp_version() {
        Some(version) => println!("✓ yt-dlp {version}"),
        None => {
            println!("✗ yt-dlp not found");
            println!("  Windows: winget install yt-dlp");
            println!("  macOS:   brew install yt-dlp");
            println!("  Linux:   pip install yt-dlp");
        }
    }

    match download::ffmpeg_version() {
        Some(version) => println!("✓ {version}"),
        None => {
            println!("✗ ffmpeg not found (needed for MP3 conversion)");
            println!("  https://ffmpeg.org/download.html or your package manager");
        }
    }

    println!();
    if config.credentials.lastfm_api_key.is_some() {
        println!("✓ Last.fm API key configured");
    } else {
        println!("- Last.fm API key not configured (that provider will be skipped)");
    }

    match crate::config::config_path() {
        Some(path) if path.exists() => println!("✓ Config: {}", path.display()),
        Some(path) => println!("- Config: {} (not present, defaults in use)", path.display()),
        None => println!("- Config directory could not be determined"),
    }

    Ok(())
}
