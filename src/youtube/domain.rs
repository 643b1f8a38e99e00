//! Internal domain models for YouTube search results.
//!
//! A [`Candidate`] is only ever built from a structurally complete result
//! entry, so everything downstream (matcher, downloader) can rely on its
//! fields being present.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::track::{SimilarityError, Track};

/// Canonical single-video link, completed with the video id
const WATCH_URL_PREFIX: &str = "https://www.youtube.com/watch?v=";

/// A search result entry that passed structural validation
#[derive(Debug, Clone, Serialize)]
pub struct Candidate {
    /// Video identifier, derived from `url` only
    pub id: String,
    /// Absolute video URL
    pub url: String,
    /// Video title as shown in the listing
    pub title: String,
    /// Uploader (channel) name
    pub uploader: String,
    /// Reported duration in seconds
    pub duration: u32,
    /// Track this candidate was searched for
    #[serde(skip)]
    pub track: Arc<Track>,
}

impl Candidate {
    /// Build a candidate from a user-supplied link, bypassing search.
    ///
    /// The link is reduced to its video id and rebuilt as a plain watch URL,
    /// so playlist or channel parts never reach the downloader. Title and
    /// uploader are unknown, so the track's own values stand in.
    pub fn from_url(url: &str, track: Arc<Track>) -> Result<Self, YoutubeError> {
        super::url::validate_url(url)?;
        let id = super::url::extract_video_id(url)?;
        let canonical = format!("{}{}", WATCH_URL_PREFIX, id);
        if super::url::is_playlist_link(&canonical) || canonical.contains(super::url::USER_MARKER) {
            return Err(YoutubeError::StructuralMismatch(url.to_string()));
        }
        Ok(Self {
            id,
            url: canonical,
            title: track.title.clone(),
            uploader: track.artist.clone(),
            duration: track.duration,
            track,
        })
    }
}

/// A field of a result entry that must be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Url,
    Title,
    Uploader,
    Duration,
}

impl fmt::Display for EntryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntryField::Url => "url",
            EntryField::Title => "title",
            EntryField::Uploader => "uploader",
            EntryField::Duration => "duration",
        };
        f.write_str(name)
    }
}

/// Comma separated field list for error messages
fn join_fields(fields: &[EntryField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Errors raised while searching, extracting, matching or downloading
#[derive(Debug, thiserror::Error)]
pub enum YoutubeError {
    #[error("Cannot retrieve document from \"{url}\": {reason}")]
    Fetch { url: String, reason: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP {0}")]
    HttpStatus(u16),

    #[error("Invalid selector \"{selector}\": {reason}")]
    Selector { selector: String, reason: String },

    #[error("Non-standard video entry at position {position}: missing {}", join_fields(.missing))]
    MalformedEntry {
        position: usize,
        missing: Vec<EntryField>,
    },

    #[error("Playlist URL found: {0}")]
    PlaylistUrl(String),

    #[error("Advertising URL found: {0}")]
    AdvertisingUrl(String),

    #[error("Track is pointing to a playlist or user: {0}")]
    StructuralMismatch(String),

    #[error(
        "Duration difference is excessive: |{expected} - {actual}| = {delta} (max tolerated: {tolerance})"
    )]
    DurationMismatch {
        expected: u32,
        actual: u32,
        delta: u32,
        tolerance: u32,
    },

    #[error(transparent)]
    TitleMismatch(#[from] SimilarityError),

    #[error("No more results left on page")]
    Exhausted,

    #[error("URL {0} doesn't seem to be pointing to any YouTube video")]
    NotAVideoUrl(String),

    #[error("Something went wrong while executing \"{command}\":\n{stderr}")]
    Download { command: String, stderr: String },
}

impl YoutubeError {
    /// Whether the search loop can skip past this error and pull the next entry.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            YoutubeError::MalformedEntry { .. }
                | YoutubeError::PlaylistUrl(_)
                | YoutubeError::AdvertisingUrl(_)
                | YoutubeError::StructuralMismatch(_)
                | YoutubeError::DurationMismatch { .. }
                | YoutubeError::TitleMismatch(_)
        )
    }
}
