//! YouTube search HTTP client
//!
//! Fetches the raw results page for a query. The page is requested in
//! English first so that duration labels read `Duration: m:ss`; if that
//! request fails, a plain request is tried before giving up.

use async_trait::async_trait;
use tracing::{debug, warn};

use super::domain::YoutubeError;
use super::traits::DocumentFetcher;

/// Placeholder substituted by the encoded search text in query patterns
pub const QUERY_PLACEHOLDER: &str = "{query}";

/// User agent string
const USER_AGENT: &str = concat!(
    "MusicFetcher/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/music-fetcher)"
);

/// HTTP client for results pages
pub struct SearchClient {
    http_client: reqwest::Client,
}

impl SearchClient {
    /// Create a new client
    pub fn new() -> Result<Self, YoutubeError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| YoutubeError::Network(e.to_string()))?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl DocumentFetcher for SearchClient {
    async fn fetch_document(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> Result<String, YoutubeError> {
        let mut request = self.http_client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request
            .send()
            .await
            .map_err(|e| YoutubeError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(YoutubeError::HttpStatus(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| YoutubeError::Network(e.to_string()))
    }
}

/// Build the results page URL for `search_text`.
///
/// The text is percent-encoded with spaces turned into `+`.
pub fn build_query_url(pattern: &str, search_text: &str) -> String {
    let encoded = urlencoding::encode(search_text).replace("%20", "+");
    pattern.replace(QUERY_PLACEHOLDER, &encoded)
}

/// Fetch `url` with an `Accept-Language` preference, falling back to a
/// request without it.
pub async fn fetch_with_fallback(
    fetcher: &dyn DocumentFetcher,
    url: &str,
    language: &str,
) -> Result<String, YoutubeError> {
    debug!("Requesting {}", url);
    match fetcher
        .fetch_document(url, &[("Accept-Language", language)])
        .await
    {
        Ok(document) => Ok(document),
        Err(e) => {
            warn!("Localized request for {} failed ({}), retrying plain", url, e);
            fetcher
                .fetch_document(url, &[])
                .await
                .map_err(|e| YoutubeError::Fetch {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
        }
    }
}
