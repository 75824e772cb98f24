//! iTunes Search API integration
//!
//! Secondary metadata source: Apple's catalog search. No API key required.
//! Results carry clean album titles, genres, and high-quality artwork, but
//! free-text matching is loose, so candidates are scored by word overlap
//! with the query before one is accepted.
//!
//! API docs: https://developer.apple.com/library/archive/documentation/AudioVideo/Conceptual/iTuneSearchAPI/

pub mod dto;
mod adapter;
mod client;

pub use adapter::best_record;
pub use client::ItunesClient;
