//! Audio download via youtube-dl
//!
//! Shells out to `youtube-dl` (or a compatible fork such as `yt-dlp`) to
//! download the best audio stream and convert it to the requested format.
//!
//! Install:
//! - Windows: `winget install yt-dlp`
//! - macOS: `brew install yt-dlp`
//! - Linux: `apt install youtube-dl` or `pip install yt-dlp`

use std::path::Path;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::info;

use super::domain::{Candidate, YoutubeError};
use super::traits::Downloader;
use crate::config::DownloadConfig;

/// youtube-dl compatible downloader
#[derive(Debug, Clone)]
pub struct YoutubeDl {
    program: String,
    audio_quality: String,
}

impl YoutubeDl {
    pub fn new(config: &DownloadConfig) -> Self {
        Self {
            program: config.program.clone(),
            audio_quality: config.audio_quality.clone(),
        }
    }

    /// Check if the downloader program is installed
    pub async fn is_available(&self) -> bool {
        self.version().await.is_some()
    }

    /// Get the downloader version string (for diagnostics)
    pub async fn version(&self) -> Option<String> {
        Command::new(&self.program)
            .arg("--version")
            .output()
            .await
            .ok()
            .filter(|o| o.status.success())
            .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
    }

    /// Command line arguments for one download
    fn build_args(
        &self,
        url: &str,
        destination: &Path,
        format: &str,
        extension: &str,
    ) -> Vec<String> {
        vec![
            "--output".to_string(),
            format!("{}.%(ext)s", destination.display()),
            "--format".to_string(),
            format.to_string(),
            "--extract-audio".to_string(),
            "--audio-format".to_string(),
            extension.trim_start_matches('.').to_string(),
            "--audio-quality".to_string(),
            self.audio_quality.clone(),
            url.to_string(),
        ]
    }
}

impl Default for YoutubeDl {
    fn default() -> Self {
        Self::new(&DownloadConfig::default())
    }
}

#[async_trait]
impl Downloader for YoutubeDl {
    async fn download(
        &self,
        candidate: &Candidate,
        destination: &Path,
        format: &str,
        extension: &str,
    ) -> Result<(), YoutubeError> {
        let args = self.build_args(&candidate.url, destination, format, extension);
        let command = format!("{} {}", self.program, args.join(" "));
        info!("Downloading {} to {:?}", candidate.url, destination);

        let output = Command::new(&self.program)
            .args(&args)
            .output()
            .await
            .map_err(|e| YoutubeError::Download {
                command: command.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(YoutubeError::Download {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(())
    }
}
