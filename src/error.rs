//! Application-wide error types.
//!
//! Library modules use specific error types via `thiserror`
//! ([`YoutubeError`], [`ConfigError`]), while the CLI uses `anyhow` for
//! convenient error propagation.
//!
//! # Example
//!
//! ```ignore
//! use music_fetcher::error::{Result, ResultExt};
//!
//! fn prepare(dir: &Path) -> Result<()> {
//!     std::fs::create_dir_all(dir).with_context("creating download directory")?;
//!     Ok(())
//! }
//! ```

use crate::config::ConfigError;
use crate::youtube::YoutubeError;

/// Application-wide result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level application error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Search, match or download error
    #[error(transparent)]
    Youtube(#[from] YoutubeError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Add context to an error.
    pub fn context(self, ctx: impl Into<String>) -> Self {
        Self::WithContext {
            context: ctx.into(),
            source: Box::new(self),
        }
    }
}

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn with_context(self, ctx: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Io(e).context(ctx))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, YoutubeError> {
    fn with_context(self, ctx: impl Into<String>) -> Result<T> {
        self.map_err(|e| Error::Youtube(e).context(ctx))
    }
}
