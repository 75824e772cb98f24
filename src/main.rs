//! tunegrab - YouTube to MP3 downloader with metadata lookup and tagging.
//!
//! Downloads audio via yt-dlp, resolves music metadata from MusicBrainz,
//! iTunes and Last.fm with fallback, and writes the winning tags (plus
//! cover art) into the MP3.

pub mod cli;
pub mod config;
pub mod download;
pub mod lookup;
pub mod tagger;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("tunegrab=info".parse().unwrap()))
        .init();

    cli::run_command(&args)
}
