//! Fetch command - find a match and download it.

use std::path::Path;
use std::sync::Arc;

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::track::Track;
use crate::youtube::{Candidate, SearchClient, TrackFinder, YoutubeDl, YoutubeError};

use super::{TrackArgs, build_finder, format_duration};

/// Find the first acceptable video for a track and download its audio
pub fn cmd_fetch(
    rt: &Runtime,
    config: &Config,
    args: &TrackArgs,
    output: Option<&Path>,
    url: Option<&str>,
    extension: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let extension = extension.unwrap_or(&config.download.extension);
    let track = args.to_track(extension);
    let finder = build_finder(config)?;
    let directory = finder.destination_dir(output);

    rt.block_on(fetch(&finder, &track, &directory, url, dry_run))
}

async fn fetch(
    finder: &TrackFinder<SearchClient, YoutubeDl>,
    track: &Arc<Track>,
    directory: &Path,
    url: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let candidate = match url {
        Some(url) => Candidate::from_url(url, Arc::clone(track))?,
        None => match finder.find_match(Arc::clone(track)).await {
            Ok(candidate) => candidate,
            Err(YoutubeError::Exhausted) => {
                anyhow::bail!("No match found for \"{}\"", track.search_text());
            }
            Err(e) => return Err(e.into()),
        },
    };

    println!("✓ {}", candidate.title);
    println!("  URL:      {}", candidate.url);
    println!("  Uploader: {}", candidate.uploader);
    println!(
        "  Duration: {} (expected {})",
        format_duration(candidate.duration),
        format_duration(track.duration)
    );

    if dry_run {
        println!();
        println!(
            "Would download to {:?}",
            directory.join(format!("{}.{}", track.filename, track.extension))
        );
        return Ok(());
    }

    let file = finder.download(&candidate, directory).await?;
    println!();
    println!("✓ Saved {:?}", file);
    Ok(())
}
