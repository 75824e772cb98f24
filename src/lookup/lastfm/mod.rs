//! Last.fm track search integration
//!
//! Community-driven fallback source, consulted last. Requires an API key;
//! without one the provider reports itself unavailable and the chain moves
//! on. Search results carry title, artist, and artwork, but no album or
//! release year.
//!
//! API docs: https://www.last.fm/api/show/track.search

pub mod dto;
mod adapter;
mod client;

pub use adapter::best_record;
pub use client::LastFmClient;
