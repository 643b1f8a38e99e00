//! Track finder - orchestrates search, matching and download
//!
//! This is the high-level API for fetching a track:
//! 1. Request the results page for the track's search text
//! 2. Pull candidates in page order, skipping malformed or disqualified ones
//! 3. Stop at the first candidate the matcher accepts
//! 4. Hand it to the downloader

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::client::{build_query_url, fetch_with_fallback};
use super::domain::{Candidate, YoutubeError};
use super::matcher::Matcher;
use super::results::{SearchResultSet, Selectors};
use super::traits::{DocumentFetcher, Downloader};
use crate::config::{Config, DownloadConfig, YoutubeConfig};
use crate::error::{Result, ResultExt};
use crate::track::Track;

/// What happened to one results page entry
#[derive(Debug)]
pub struct Inspection {
    /// 1-based position on the page
    pub position: usize,
    /// The candidate and its verdict, or why no candidate could be built
    pub outcome: std::result::Result<(Candidate, std::result::Result<(), YoutubeError>), YoutubeError>,
}

impl Inspection {
    pub fn is_accepted(&self) -> bool {
        matches!(self.outcome, Ok((_, Ok(()))))
    }
}

/// Finds and downloads tracks
pub struct TrackFinder<F, D> {
    fetcher: F,
    downloader: D,
    youtube: YoutubeConfig,
    download: DownloadConfig,
    selectors: Selectors,
    matcher: Matcher,
}

impl<F: DocumentFetcher, D: Downloader> TrackFinder<F, D> {
    /// Create a finder with the given collaborators and config
    pub fn new(fetcher: F, downloader: D, config: &Config) -> std::result::Result<Self, YoutubeError> {
        Ok(Self {
            fetcher,
            downloader,
            selectors: Selectors::new(&config.youtube)?,
            matcher: Matcher::new(config.youtube.duration_tolerance),
            youtube: config.youtube.clone(),
            download: config.download.clone(),
        })
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    /// Request the results page for `track`.
    pub async fn fetch_result_set(
        &self,
        track: Arc<Track>,
    ) -> std::result::Result<SearchResultSet, YoutubeError> {
        let url = build_query_url(&self.youtube.query_pattern, &track.search_text());
        let document =
            fetch_with_fallback(&self.fetcher, &url, &self.youtube.accept_language).await?;
        let set = SearchResultSet::parse(
            &document,
            &self.selectors,
            &self.youtube.video_prefix,
            track,
        );
        debug!("{} entries found at {}", set.len(), url);
        Ok(set)
    }

    /// Pull candidates until one is accepted.
    ///
    /// Recoverable errors (malformed or disqualified entries) are logged and
    /// skipped, anything else ends the search. Fails with
    /// [`YoutubeError::Exhausted`] when no entry matches.
    pub fn first_match(
        &self,
        set: &mut SearchResultSet,
    ) -> std::result::Result<Candidate, YoutubeError> {
        let track = Arc::clone(set.track());
        while set.has_next() {
            let candidate = match set.next_candidate() {
                Ok(candidate) => candidate,
                Err(e) if e.is_recoverable() => {
                    debug!("Skipping entry {}: {}", set.pulled(), e);
                    continue;
                }
                Err(e) => return Err(e),
            };
            match self.matcher.evaluate(&candidate, &track) {
                Ok(()) => {
                    info!(
                        "Matched \"{}\" with \"{}\" ({})",
                        track.search_text(),
                        candidate.title,
                        candidate.url
                    );
                    return Ok(candidate);
                }
                Err(e) if e.is_recoverable() => {
                    debug!("Rejecting {} at {}: {}", candidate.url, set.pulled(), e)
                }
                Err(e) => return Err(e),
            }
        }
        Err(YoutubeError::Exhausted)
    }

    /// Search for `track` and return the first acceptable candidate
    pub async fn find_match(&self, track: Arc<Track>) -> std::result::Result<Candidate, YoutubeError> {
        let mut set = self.fetch_result_set(track).await?;
        self.first_match(&mut set)
    }

    /// Search for `track` and report a verdict for every entry
    pub async fn inspect(
        &self,
        track: Arc<Track>,
    ) -> std::result::Result<Vec<Inspection>, YoutubeError> {
        let mut set = self.fetch_result_set(Arc::clone(&track)).await?;
        let mut inspections = Vec::with_capacity(set.len());
        while set.has_next() {
            let outcome = set.next_candidate().map(|candidate| {
                let verdict = self.matcher.evaluate(&candidate, &track);
                (candidate, verdict)
            });
            inspections.push(Inspection {
                position: set.pulled(),
                outcome,
            });
        }
        Ok(inspections)
    }

    /// Destination directory, from config or the working directory
    pub fn destination_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        override_dir
            .map(Path::to_path_buf)
            .or_else(|| self.download.directory.clone())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Download an accepted candidate into `directory`.
    ///
    /// Returns the path of the resulting file.
    pub async fn download(&self, candidate: &Candidate, directory: &Path) -> Result<PathBuf> {
        let track = &candidate.track;
        std::fs::create_dir_all(directory)
            .with_context(format!("Failed to create directory {:?}", directory))?;

        let destination = directory.join(&track.filename);
        self.downloader
            .download(candidate, &destination, &self.download.format, &track.extension)
            .await?;

        let file = directory.join(format!("{}.{}", track.filename, track.extension));
        info!("Downloaded {} to {:?}", candidate.id, file);
        Ok(file)
    }

    /// Search, match and download `track` in one go
    pub async fn fetch_track(&self, track: Arc<Track>, directory: &Path) -> Result<PathBuf> {
        let candidate = self.find_match(track).await?;
        self.download(&candidate, directory).await
    }
}
