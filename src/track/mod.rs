//! Track requests - the songs we are looking for.
//!
//! A [`Track`] carries what the search pipeline needs to know about a song:
//! the text to search for, the expected duration, where the downloaded file
//! goes, and a fuzzy title check ([`Track::seems`]) used to accept or reject
//! search results.

use serde::{Deserialize, Serialize};

/// Minimum share of title words a result must contain
const TITLE_MATCH_RATIO: f32 = 0.75;

/// Words marking an alternative rendition of a song.
///
/// A result containing one of these is rejected unless the track title
/// itself contains it.
const VARIANT_KEYWORDS: &[&str] = &[
    "live",
    "cover",
    "remix",
    "karaoke",
    "instrumental",
    "acoustic",
    "nightcore",
    "reversed",
    "slowed",
    "tutorial",
    "lesson",
];

/// A song to look up and download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Song title
    pub title: String,
    /// Main artist
    pub artist: String,
    /// Expected duration in seconds
    pub duration: u32,
    /// Destination file name, without extension
    pub filename: String,
    /// Destination file extension, without the leading dot
    pub extension: String,
}

/// Why a result title does not look like the track
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimilarityError {
    #[error("Title \"{found}\" does not match \"{expected}\" ({matched}/{total} words)")]
    TitleMismatch {
        expected: String,
        found: String,
        matched: usize,
        total: usize,
    },

    #[error("Title \"{found}\" looks like a {keyword} version")]
    Variant { keyword: String, found: String },
}

impl Track {
    /// Create a track, deriving the file name from artist and title.
    pub fn new(artist: impl Into<String>, title: impl Into<String>, duration: u32) -> Self {
        let artist = artist.into();
        let title = title.into();
        let filename = sanitize_filename(&format!("{} - {}", artist, title));
        Self {
            title,
            artist,
            duration,
            filename,
            extension: "mp3".to_string(),
        }
    }

    /// Override the destination extension (leading dot is ignored).
    pub fn with_extension(mut self, extension: &str) -> Self {
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Text to type into the search box
    pub fn search_text(&self) -> String {
        format!("{} {}", self.artist, self.title)
    }

    /// Fuzzy check that `title` refers to this track.
    pub fn seems(&self, title: &str) -> Result<(), SimilarityError> {
        let found = normalize(title);
        let found_words: Vec<&str> = found.split_whitespace().collect();

        let expected = normalize(core_title(&self.title));
        let expected_words: Vec<&str> = expected.split_whitespace().collect();

        if !expected_words.is_empty() {
            let matched = expected_words
                .iter()
                .filter(|w| found_words.contains(*w))
                .count();
            let ratio = matched as f32 / expected_words.len() as f32;
            if ratio < TITLE_MATCH_RATIO {
                return Err(SimilarityError::TitleMismatch {
                    expected: self.title.clone(),
                    found: title.to_string(),
                    matched,
                    total: expected_words.len(),
                });
            }
        }

        let own = normalize(&self.title);
        let own_words: Vec<&str> = own.split_whitespace().collect();
        if let Some(keyword) = VARIANT_KEYWORDS
            .iter()
            .find(|k| found_words.contains(*k) && !own_words.contains(*k))
        {
            return Err(SimilarityError::Variant {
                keyword: keyword.to_string(),
                found: title.to_string(),
            });
        }

        Ok(())
    }
}

/// Strip bracketed parts and ` - ` suffixes ("Song (feat. X) - Remastered")
fn core_title(title: &str) -> &str {
    let end = [" - ", "(", "["]
        .iter()
        .filter_map(|sep| title.find(sep))
        .min()
        .unwrap_or(title.len());
    let core = title[..end].trim();
    if core.is_empty() { title } else { core }
}

/// Lowercase, turning anything that isn't alphanumeric into a space
fn normalize(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect()
}

/// Sanitize a string for use as a filename
pub fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}
