//! Configuration system using TOML files.
//!
//! Config is stored in the OS-standard config directory:
//! - Windows: %APPDATA%\music-fetcher\config.toml
//! - macOS: ~/Library/Application Support/music-fetcher/config.toml
//! - Linux: ~/.config/music-fetcher/config.toml
//!
//! The results page markup changes without notice, so the query pattern and
//! the selectors live here rather than in code: when search breaks, the fix
//! is usually an edit to this file.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::youtube::DURATION_TOLERANCE_SECONDS;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Search and result extraction settings
    pub youtube: YoutubeConfig,

    /// Downloader settings
    pub download: DownloadConfig,
}

/// Search and result extraction settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct YoutubeConfig {
    /// Results page URL, `{query}` is replaced by the encoded search text
    pub query_pattern: String,

    /// Video link elements (carry `href` and `title`)
    pub video_selector: String,

    /// Description blocks holding the uploader
    pub description_selector: String,

    /// Uploader element inside a description block
    pub uploader_selector: String,

    /// Duration labels ("Duration: m:ss")
    pub duration_selector: String,

    /// Prefix for relative video links
    pub video_prefix: String,

    /// Preferred page language
    pub accept_language: String,

    /// Maximum duration difference in seconds
    pub duration_tolerance: u32,
}

impl Default for YoutubeConfig {
    fn default() -> Self {
        Self {
            query_pattern: "https://www.youtube.com/results?search_query={query}".to_string(),
            video_selector: ".yt-uix-tile-link".to_string(),
            description_selector: ".yt-lockup-byline".to_string(),
            uploader_selector: "a".to_string(),
            duration_selector: ".accessible-description".to_string(),
            video_prefix: "https://www.youtube.com".to_string(),
            accept_language: "en".to_string(),
            duration_tolerance: DURATION_TOLERANCE_SECONDS,
        }
    }
}

/// Downloader settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownloadConfig {
    /// youtube-dl compatible program
    pub program: String,

    /// Stream format selector
    pub format: String,

    /// Audio quality passed to the converter (0 = best)
    pub audio_quality: String,

    /// Audio file extension
    pub extension: String,

    /// Where downloads go (working directory when unset)
    pub directory: Option<PathBuf>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            program: "youtube-dl".to_string(),
            format: "bestaudio".to_string(),
            audio_quality: "0".to_string(),
            extension: "mp3".to_string(),
            directory: None,
        }
    }
}

// ============================================================================
// Config File Operations
// ============================================================================

/// Get the config directory path
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("music-fetcher"))
}

/// Get the full path to the config file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load configuration from disk
///
/// Returns default config if file doesn't exist or can't be parsed.
/// Logs warnings but doesn't fail - we always return a usable config.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        tracing::warn!("Could not determine config directory, using defaults");
        return Config::default();
    };
    load_from(&path)
}

/// Load configuration from a specific file (`--config` or
/// `MUSIC_FETCHER_CONFIG`).
///
/// Lets a patched set of selectors or a different query pattern be tried
/// against the live results page without touching the main config.
pub fn load_from(path: &Path) -> Config {
    if !path.exists() {
        tracing::info!("No config file found at {:?}, using defaults", path);
        return Config::default();
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str(&contents) {
            Ok(config) => {
                tracing::info!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                tracing::error!("Failed to parse config file {:?}: {}", path, e);
                tracing::warn!("Using default configuration");
                Config::default()
            }
        },
        Err(e) => {
            tracing::error!("Failed to read config file {:?}: {}", path, e);
            Config::default()
        }
    }
}

/// Save configuration to the default location
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Save configuration to a specific file
///
/// Used by `config --init` to write out the default selectors and query
/// pattern for hand editing. Creates the parent directory if needed and
/// replaces the file atomically.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::CreateDir(dir.to_path_buf(), e))?;
    }

    let contents = toml::to_string_pretty(config).map_err(ConfigError::Serialize)?;

    // Write atomically (write to temp, then rename)
    let temp_path = path.with_extension("toml.tmp");
    std::fs::write(&temp_path, &contents).map_err(|e| ConfigError::Write(temp_path.clone(), e))?;
    std::fs::rename(&temp_path, path)
        .map_err(|e| ConfigError::Rename(temp_path, path.to_path_buf(), e))?;

    tracing::info!("Saved config to {:?}", path);
    Ok(())
}

// ============================================================================
// Error Types
// ============================================================================

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to create config directory {0}: {1}")]
    CreateDir(PathBuf, std::io::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(toml::ser::Error),

    #[error("Failed to write config to {0}: {1}")]
    Write(PathBuf, std::io::Error),

    #[error("Failed to rename temp file {0} to {1}: {2}")]
    Rename(PathBuf, PathBuf, std::io::Error),
}

// ============================================================================
// Tests
// ============================================================================
