//! Search result extraction.
//!
//! A results page is reduced to three views, one per selector: video links
//! (href + title attributes), description blocks (uploader) and duration
//! labels. Position `i` in each view refers to the same listing entry, so a
//! view shorter than the link view simply has no data for the trailing
//! entries.
//!
//! The views are captured eagerly (the parsed DOM is not `Send`), but each
//! entry is only validated when it is pulled with
//! [`SearchResultSet::next_candidate`].

use std::sync::Arc;

use scraper::{ElementRef, Html, Selector};

use super::domain::{Candidate, EntryField, YoutubeError};
use super::url::{extract_video_id, is_playlist_link, is_short_link, is_watch_link};
use crate::config::YoutubeConfig;
use crate::track::Track;

/// Compiled CSS selectors locating the three result views
#[derive(Debug, Clone)]
pub struct Selectors {
    video: Selector,
    description: Selector,
    uploader: Selector,
    duration: Selector,
}

fn compile(selector: &str) -> Result<Selector, YoutubeError> {
    Selector::parse(selector).map_err(|e| YoutubeError::Selector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

impl Selectors {
    pub fn new(config: &YoutubeConfig) -> Result<Self, YoutubeError> {
        Ok(Self {
            video: compile(&config.video_selector)?,
            description: compile(&config.description_selector)?,
            uploader: compile(&config.uploader_selector)?,
            duration: compile(&config.duration_selector)?,
        })
    }
}

/// Link view entry; attributes are absent when the markup lacks them
#[derive(Debug, Clone, Default)]
struct LinkEntry {
    href: Option<String>,
    title: Option<String>,
}

/// Concatenated, trimmed text content of an element
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Lazily validated sequence of search results
#[derive(Debug)]
pub struct SearchResultSet {
    track: Arc<Track>,
    video_prefix: String,
    links: Vec<LinkEntry>,
    uploaders: Vec<String>,
    durations: Vec<String>,
    /// Number of entries pulled so far; the next entry is `links[cursor]`
    cursor: usize,
}

impl SearchResultSet {
    /// Capture the result views of an HTML document.
    ///
    /// `video_prefix` is prepended to relative links.
    pub fn parse(
        html: &str,
        selectors: &Selectors,
        video_prefix: &str,
        track: Arc<Track>,
    ) -> Self {
        let document = Html::parse_document(html);

        let links = document
            .select(&selectors.video)
            .map(|el| LinkEntry {
                href: el.value().attr("href").map(str::to_string),
                title: el.value().attr("title").map(str::to_string),
            })
            .collect();

        let uploaders = document
            .select(&selectors.description)
            .map(|desc| {
                desc.select(&selectors.uploader)
                    .map(element_text)
                    .collect::<String>()
                    .trim()
                    .to_string()
            })
            .collect();

        let durations = document
            .select(&selectors.duration)
            .map(element_text)
            .collect();

        Self {
            track,
            video_prefix: video_prefix.to_string(),
            links,
            uploaders,
            durations,
            cursor: 0,
        }
    }

    /// Number of link entries in the document
    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// 1-based position of the last pulled entry (0 before the first pull)
    pub fn pulled(&self) -> usize {
        self.cursor
    }

    /// The track this search was issued for
    pub fn track(&self) -> &Arc<Track> {
        &self.track
    }

    /// Whether another entry can be pulled
    pub fn has_next(&self) -> bool {
        self.cursor < self.links.len()
    }

    /// Advance to the next entry and turn it into a [`Candidate`].
    ///
    /// A failed pull still consumes the entry; call again to move on.
    pub fn next_candidate(&mut self) -> Result<Candidate, YoutubeError> {
        if !self.has_next() {
            return Err(YoutubeError::Exhausted);
        }
        let index = self.cursor;
        self.cursor += 1;
        self.extract(index)
    }

    fn extract(&self, index: usize) -> Result<Candidate, YoutubeError> {
        let link = &self.links[index];
        let uploader = self.uploaders.get(index);
        let duration = self.durations.get(index).and_then(|d| parse_duration(d));

        let missing: Vec<EntryField> = [
            (EntryField::Url, link.href.is_some()),
            (EntryField::Title, link.title.is_some()),
            (EntryField::Uploader, uploader.is_some()),
            (EntryField::Duration, duration.is_some()),
        ]
        .into_iter()
        .filter_map(|(field, present)| (!present).then_some(field))
        .collect();

        let (Some(href), Some(title), Some(uploader), Some(duration)) =
            (&link.href, &link.title, uploader, duration)
        else {
            return Err(YoutubeError::MalformedEntry {
                position: index + 1,
                missing,
            });
        };

        if !is_short_link(href) && is_playlist_link(href) {
            return Err(YoutubeError::PlaylistUrl(href.clone()));
        }
        if !is_short_link(href) && !is_watch_link(href) {
            return Err(YoutubeError::AdvertisingUrl(href.clone()));
        }

        let url = if href.starts_with('/') {
            format!("{}{}", self.video_prefix, href)
        } else {
            href.clone()
        };

        Ok(Candidate {
            id: extract_video_id(&url)?,
            url,
            title: title.clone(),
            uploader: uploader.clone(),
            duration,
            track: Arc::clone(&self.track),
        })
    }
}

impl Iterator for SearchResultSet {
    type Item = Result<Candidate, YoutubeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.has_next().then(|| self.next_candidate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.links.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

/// Parse a duration label such as `"Duration: 3:45."` into seconds.
///
/// Only the `minutes:seconds` form after the first `": "` is understood;
/// anything else yields `None`.
pub fn parse_duration(text: &str) -> Option<u32> {
    let value = text.split(": ").nth(1)?;
    let mut parts = value.split(':');
    let minutes: u32 = parts.next()?.parse().ok()?;
    let seconds: String = parts.next()?.chars().take(2).collect();
    let seconds: u32 = seconds.parse().ok()?;
    minutes.checked_mul(60)?.checked_add(seconds)
}
