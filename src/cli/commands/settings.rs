//! Configuration and tool check commands.

use std::path::Path;

use tokio::runtime::Runtime;

use crate::config::{self, Config};
use crate::youtube::YoutubeDl;

/// Show the configuration in use, optionally writing the defaults
pub fn cmd_config(config: &Config, path: Option<&Path>, init: bool) -> anyhow::Result<()> {
    if init {
        let defaults = Config::default();
        let written = match path {
            Some(path) => {
                config::save_to(&defaults, path)?;
                path.to_path_buf()
            }
            None => config::save(&defaults)?,
        };
        println!("✓ Wrote default configuration to {:?}", written);
        return Ok(());
    }

    match path.map(Path::to_path_buf).or_else(config::config_path) {
        Some(path) => println!("# {}", path.display()),
        None => println!("# (no config directory, using defaults)"),
    }
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Check that the downloader is installed
pub fn cmd_check_tools(rt: &Runtime, config: &Config) -> anyhow::Result<()> {
    println!("Checking download tools...\n");

    let downloader = YoutubeDl::new(&config.download);
    match rt.block_on(downloader.version()) {
        Some(version) => println!("✓ {}: {}", config.download.program, version),
        None => {
            println!("✗ {}: NOT FOUND", config.download.program);
            print_downloader_install_instructions();
        }
    }

    Ok(())
}

/// Print installation instructions for the downloader
fn print_downloader_install_instructions() {
    eprintln!("Install youtube-dl or yt-dlp:");
    eprintln!("  Windows: winget install yt-dlp");
    eprintln!("  macOS:   brew install yt-dlp");
    eprintln!("  Linux:   apt install youtube-dl (or pip install yt-dlp)");
    eprintln!("For yt-dlp, set `program = \"yt-dlp\"` in the [download] section.");
}
