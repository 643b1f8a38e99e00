//! Trait definitions for the pipeline's external collaborators.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses [`SearchClient`](super::SearchClient) and
//! [`YoutubeDl`](super::YoutubeDl), while tests substitute the mocks below.

use std::path::Path;

use async_trait::async_trait;

use super::domain::{Candidate, YoutubeError};

/// Fetches a search results document.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Request `url` with the extra `headers` and return the response body.
    async fn fetch_document(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<String, YoutubeError>;
}

/// Downloads the audio of an accepted candidate.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Download `candidate` to `destination` (no extension) as `extension`.
    async fn download(
        &self,
        candidate: &Candidate,
        destination: &Path,
        format: &str,
        extension: &str,
    ) -> Result<(), YoutubeError>;
}
