//! MusicBrainz search integration
//!
//! Primary metadata source: free-text recording search against the open
//! MusicBrainz database. Artwork URLs point at the Cover Art Archive entry
//! for the chosen release, so no second API call is needed here.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API/Search
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.

pub mod dto;
mod adapter;
mod client;

pub use adapter::best_record;
pub use client::MusicBrainzClient;
