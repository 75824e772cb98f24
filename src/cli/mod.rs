//! Command-line interface for tunegrab.
//!
//! This module provides the commands for downloading, looking up, and
//! tagging audio without any further ceremony.

mod commands;

pub use commands::{Cli, Commands, run_command};
