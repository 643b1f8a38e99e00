//! Test utilities and fixtures for music-fetcher tests.
//!
//! Provides a mock track, a candidate factory and a builder for results
//! pages shaped like the markup the default selectors expect.
//!
//! # Example
//!
//! ```ignore
//! use crate::test_utils::{ResultsPage, result_set};
//!
//! let mut set = result_set(
//!     ResultsPage::new().video("/watch?v=abc", "Artist - Song", "Artist", "Duration: 3:45"),
//! );
//! assert_eq!(set.next_candidate().unwrap().id, "abc");
//! ```

use std::sync::Arc;

use crate::config::YoutubeConfig;
use crate::track::Track;
use crate::youtube::{Candidate, SearchResultSet, Selectors};

/// Creates a mock Track: "Artist" - "Song", 225 seconds.
pub fn mock_track() -> Track {
    Track::new("Artist", "Song", 225)
}

/// Creates a candidate for [`mock_track`] with the given id and duration.
///
/// Customize with struct update syntax or by mutating fields.
pub fn mock_candidate(id: &str, duration: u32) -> Candidate {
    Candidate {
        id: id.to_string(),
        url: format!("https://www.youtube.com/watch?v={}", id),
        title: "Artist - Song (Official Audio)".to_string(),
        uploader: "Artist".to_string(),
        duration,
        track: Arc::new(mock_track()),
    }
}

/// Escape text for use inside an HTML attribute or element
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Builder for results page fixtures.
#[derive(Debug, Default, Clone)]
pub struct ResultsPage {
    entries: Vec<String>,
}

impl ResultsPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a complete result entry.
    pub fn video(self, href: &str, title: &str, uploader: &str, duration: &str) -> Self {
        let link = format!(
            r#"<a class="yt-uix-tile-link" href="{}" title="{}">{}</a>"#,
            escape(href),
            escape(title),
            escape(title)
        );
        self.raw_video(&link, uploader, duration)
    }

    /// Add an entry with a hand-written link element.
    pub fn raw_video(mut self, link: &str, uploader: &str, duration: &str) -> Self {
        self.entries.push(format!(
            r#"<div class="yt-lockup">
  <h3 class="yt-lockup-title">{}<span class="accessible-description">{}</span></h3>
  <div class="yt-lockup-byline"><a href="/channel/UC123">{}</a></div>
</div>"#,
            link,
            escape(duration),
            escape(uploader)
        ));
        self
    }

    /// Add a link with no description or duration block.
    pub fn bare_link(mut self, href: &str, title: &str) -> Self {
        self.entries.push(format!(
            r#"<div class="yt-lockup"><a class="yt-uix-tile-link" href="{}" title="{}">{}</a></div>"#,
            escape(href),
            escape(title),
            escape(title)
        ));
        self
    }

    /// Render the full HTML document.
    pub fn render(&self) -> String {
        format!(
            "<!DOCTYPE html><html><head><title>results</title></head><body><ol>{}</ol></body></html>",
            self.entries.join("\n")
        )
    }
}

/// Parse a fixture page with the default selectors, for [`mock_track`].
pub fn result_set(page: ResultsPage) -> SearchResultSet {
    let config = YoutubeConfig::default();
    let selectors = Selectors::new(&config).expect("default selectors compile");
    SearchResultSet::parse(
        &page.render(),
        &selectors,
        &config.video_prefix,
        Arc::new(mock_track()),
    )
}
