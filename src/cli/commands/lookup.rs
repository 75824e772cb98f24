//! The lookup command: run the resolution pipeline and show the result.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::lookup::clean_title;

use super::{build_resolver, print_resolved};

/// Resolve a raw title against the provider chain and print the outcome.
/// Useful for checking what a fetch would tag without downloading anything.
pub fn cmd_lookup(
    rt: &Runtime,
    config: &Config,
    title: &str,
    video_id: Option<&str>,
) -> anyhow::Result<()> {
    let query = clean_title(title);
    println!("Query: {query}");

    let resolver = build_resolver(config);
    let tags = rt.block_on(resolver.resolve(title, video_id.unwrap_or("test")));

    print_resolved(&tags);
    Ok(())
}
