//! Music Fetcher - finds a YouTube video for a track and downloads its audio.
//!
//! Given an artist, title and expected duration, it searches YouTube, walks
//! the results in page order, skips playlists, ads and malformed entries,
//! and downloads the first video whose duration and title match.

pub mod cli;
pub mod config;
pub mod error;
#[cfg(test)]
pub mod test_utils;
pub mod track;
pub mod youtube;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive("music_fetcher=info".parse()?))
        .init();

    cli::run_command(&args)
}
