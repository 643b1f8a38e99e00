//! Command-line interface for music-fetcher.
//!
//! This module provides CLI commands for searching, matching and
//! downloading tracks, plus the standalone URL utilities.

mod commands;

pub use commands::{Cli, Commands, run_command};
