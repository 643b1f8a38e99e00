//! YouTube search - finds a video carrying the audio of a track.
//!
//! # Architecture
//!
//! - **Domain models** (`domain.rs`) - [`Candidate`] and [`YoutubeError`]
//! - **Client** (`client.rs`) - HTTP fetch of the results page
//! - **Results** (`results.rs`) - lazy extraction of candidates from the page
//! - **Matcher** (`matcher.rs`) - accept/reject gate for a candidate
//! - **URL helpers** (`url.rs`) - video id extraction and link validation
//! - **Download** (`download.rs`) - audio download via youtube-dl
//! - **Service** (`service.rs`) - orchestration of the whole flow
//!
//! # Usage
//!
//! ```ignore
//! use youtube::{SearchClient, TrackFinder, YoutubeDl};
//!
//! let config = config::load();
//! let finder = TrackFinder::new(SearchClient::new()?, YoutubeDl::new(&config.download), &config)?;
//!
//! let track = Arc::new(Track::new("Artist", "Song", 225));
//! let file = finder.fetch_track(track, Path::new("downloads")).await?;
//! ```

pub mod client;
pub mod domain;
pub mod download;
pub mod matcher;
pub mod results;
pub mod service;
pub mod traits;
pub mod url;

pub use client::SearchClient;
pub use domain::{Candidate, EntryField, YoutubeError};
pub use download::YoutubeDl;
pub use matcher::{DURATION_TOLERANCE_SECONDS, Matcher};
pub use results::{SearchResultSet, Selectors};
pub use service::{Inspection, TrackFinder};
pub use url::{extract_video_id, validate_url};
