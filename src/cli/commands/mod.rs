//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `fetch`: download one URL or a batch list, then resolve and tag
//! - `lookup`: run the metadata resolution pipeline only
//! - `tag`: resolve and tag an existing audio file
//! - `tools`: report external tool availability

mod fetch;
mod lookup;
mod tag;
mod tools;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::lookup::{LookupConfig, Resolver};

pub use fetch::cmd_fetch;
pub use lookup::cmd_lookup;
pub use tag::cmd_tag;
pub use tools::cmd_tools;

/// tunegrab CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Download audio as MP3, then look up metadata and tag it
    Fetch {
        /// Video URL. If omitted, URLs are read from the batch list file.
        url: Option<String>,
        /// Output directory (default from config, else ./downloads)
        #[arg(short, long)]
        outdir: Option<PathBuf>,
        /// MP3 bitrate in kbit/s (default from config, else 192)
        #[arg(long)]
        bitrate: Option<u32>,
        /// Allow playlist downloads (off by default)
        #[arg(long)]
        allow_playlist: bool,
        /// Skip metadata lookup and tagging entirely
        /// (also enabled by the TUNEGRAB_SKIP_TAG environment variable)
        #[arg(long)]
        skip_tag: bool,
        /// Batch list file: one URL per line, # comments allowed
        #[arg(short, long, default_value = "download.txt")]
        file: PathBuf,
    },
    /// Resolve metadata for a title and print it, without touching any file
    Lookup {
        /// Raw video title to resolve
        title: String,
        /// Video ID recorded in the result (defaults to a placeholder)
        #[arg(long)]
        video_id: Option<String>,
    },
    /// Resolve metadata for an existing audio file and write its tags
    Tag {
        /// Path to the audio file
        path: PathBuf,
        /// Raw title to resolve (defaults to the file stem)
        #[arg(long)]
        title: Option<String>,
        /// Do not download or embed artwork
        #[arg(long)]
        skip_artwork: bool,
    },
    /// Check that yt-dlp and ffmpeg are installed
    Tools,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let rt = Runtime::new()?;
    let config = crate::config::load();

    match &cli.command {
        Commands::Fetch {
            url,
            outdir,
            bitrate,
            allow_playlist,
            skip_tag,
            file,
        } => cmd_fetch(
            &rt,
            &config,
            url.as_deref(),
            outdir.as_deref(),
            *bitrate,
            *allow_playlist,
            *skip_tag,
            file,
        ),
        Commands::Lookup { title, video_id } => {
            cmd_lookup(&rt, &config, title, video_id.as_deref())
        }
        Commands::Tag {
            path,
            title,
            skip_artwork,
        } => cmd_tag(&rt, &config, path, title.as_deref(), *skip_artwork),
        Commands::Tools => cmd_tools(&config),
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Build the real provider chain from configuration
pub(crate) fn build_resolver(config: &Config) -> Resolver {
    Resolver::new(LookupConfig {
        timeout: config.network.timeout(),
        lastfm_api_key: config.credentials.lastfm_api_key.clone(),
    })
}

/// Print a resolved tag set, one labelled line per present field
pub(crate) fn print_resolved(tags: &crate::lookup::ResolvedTags) {
    match tags.source {
        Some(source) => println!("✓ Matched via {}", source),
        None => println!("⚠ No provider matched; using cleaned title only"),
    }
    println!();
    if let Some(ref title) = tags.title {
        println!("  Title:   {}", title);
    }
    if let Some(ref artist) = tags.artist {
        println!("  Artist:  {}", artist);
    }
    if let Some(ref album) = tags.album {
        println!("  Album:   {}", album);
    }
    if let Some(year) = tags.year {
        println!("  Year:    {}", year);
    }
    if let Some(ref genre) = tags.genre {
        println!("  Genre:   {}", genre);
    }
    if let Some(ref url) = tags.artwork_url {
        println!("  Artwork: {}", url);
    }
}

/// The skip-tagging switch: CLI flag, environment variable (presence, like
/// the usual convention for on/off env switches), or config file.
pub(crate) fn tagging_skipped(flag: bool, config: &Config) -> bool {
    flag || std::env::var_os("TUNEGRAB_SKIP_TAG").is_some() || config.tagging.skip
}
