//! Standalone URL utilities.

use crate::youtube::{extract_video_id, validate_url};

/// Print the video id of a watch or short link
pub fn cmd_video_id(url: &str) -> anyhow::Result<()> {
    println!("{}", extract_video_id(url)?);
    Ok(())
}

/// Check that a URL points to a single video
pub fn cmd_validate(url: &str) -> anyhow::Result<()> {
    validate_url(url)?;
    println!("✓ {} (video id: {})", url, extract_video_id(url)?);
    Ok(())
}
