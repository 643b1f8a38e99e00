//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule for maintainability:
//! - `search`: Search and report a verdict per result
//! - `fetch`: Find the first matching result and download it
//! - `url`: Video id extraction and link validation
//! - `settings`: Config file inspection and tool checks

mod fetch;
mod search;
mod settings;
mod url;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::track::Track;
use crate::youtube::{SearchClient, TrackFinder, YoutubeDl};

pub use fetch::cmd_fetch;
pub use search::cmd_search;
pub use settings::{cmd_check_tools, cmd_config};
pub use url::{cmd_validate, cmd_video_id};

/// Music Fetcher CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "MUSIC_FETCHER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// The track to look for
#[derive(Args, Debug, Clone)]
pub struct TrackArgs {
    /// Artist name
    #[arg(short, long)]
    pub artist: String,
    /// Song title
    #[arg(short, long)]
    pub title: String,
    /// Expected duration, in seconds or as m:ss
    #[arg(short, long, value_parser = parse_track_duration)]
    pub duration: u32,
}

impl TrackArgs {
    /// Build the track request, using `extension` for the output file
    pub fn to_track(&self, extension: &str) -> Arc<Track> {
        Arc::new(
            Track::new(self.artist.clone(), self.title.clone(), self.duration)
                .with_extension(extension),
        )
    }
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// List search results with their match verdicts
    Search {
        #[command(flatten)]
        track: TrackArgs,
        /// Print accepted and rejected candidates as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find the first matching video and download its audio
    Fetch {
        #[command(flatten)]
        track: TrackArgs,
        /// Output directory (defaults to the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Use this video instead of searching
        #[arg(long)]
        url: Option<String>,
        /// Audio format / file extension (defaults to the configured one)
        #[arg(long)]
        extension: Option<String>,
        /// Show what would be downloaded without downloading
        #[arg(long)]
        dry_run: bool,
    },
    /// Print the video id of a URL
    VideoId {
        /// Watch or short link
        url: String,
    },
    /// Check that a URL points to a single video
    Validate {
        /// URL to check
        url: String,
    },
    /// Show the configuration in use
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
    /// Check if the downloader program is installed
    CheckTools,
}

/// Run the specified CLI command.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => config::load_from(path),
        None => config::load(),
    };

    match &cli.command {
        Commands::Search { track, json } => {
            let rt = Runtime::new()?;
            cmd_search(&rt, &config, track, *json)
        }
        Commands::Fetch {
            track,
            output,
            url,
            extension,
            dry_run,
        } => {
            let rt = Runtime::new()?;
            cmd_fetch(
                &rt,
                &config,
                track,
                output.as_deref(),
                url.as_deref(),
                extension.as_deref(),
                *dry_run,
            )
        }
        Commands::VideoId { url } => cmd_video_id(url),
        Commands::Validate { url } => cmd_validate(url),
        Commands::Config { init } => cmd_config(&config, cli.config.as_deref(), *init),
        Commands::CheckTools => {
            let rt = Runtime::new()?;
            cmd_check_tools(&rt, &config)
        }
    }
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Parse "225" or "3:45" into seconds
fn parse_track_duration(value: &str) -> Result<u32, String> {
    let invalid = || format!("invalid duration \"{}\" (expected seconds or m:ss)", value);
    match value.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u32 = minutes.parse().map_err(|_| invalid())?;
            let seconds: u32 = seconds.parse().map_err(|_| invalid())?;
            if seconds >= 60 {
                return Err(invalid());
            }
            minutes
                .checked_mul(60)
                .and_then(|m| m.checked_add(seconds))
                .ok_or_else(invalid)
        }
        None => value.parse().map_err(|_| invalid()),
    }
}

/// Format seconds as m:ss
pub(crate) fn format_duration(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Build the production finder from config
pub(crate) fn build_finder(config: &Config) -> anyhow::Result<TrackFinder<SearchClient, YoutubeDl>> {
    let finder = TrackFinder::new(
        SearchClient::new()?,
        YoutubeDl::new(&config.download),
        config,
    )?;
    Ok(finder)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_track_duration() {
        assert_eq!(parse_track_duration("225"), Ok(225));
        assert_eq!(parse_track_duration("3:45"), Ok(225));
        assert_eq!(parse_track_duration("0:09"), Ok(9));
        assert!(parse_track_duration("3:75").is_err());
        assert!(parse_track_duration("three").is_err());
        assert!(parse_track_duration("-5").is_err());
        assert!(parse_track_duration("99999999:00").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(225), "3:45");
        assert_eq!(format_duration(9), "0:09");
    }

    #[test]
    fn test_cli_parses_fetch() {
        let cli = Cli::try_parse_from([
            "music-fetcher",
            "fetch",
            "--artist",
            "Artist",
            "--title",
            "Song",
            "--duration",
            "3:45",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Fetch { track, dry_run, .. } => {
                assert_eq!(track.duration, 225);
                assert!(dry_run);
                let track = track.to_track(".flac");
                assert_eq!(track.filename, "Artist - Song");
                assert_eq!(track.extension, "flac");
            }
            _ => panic!("expected fetch command"),
        }
    }

    #[test]
    fn test_cli_verify() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
