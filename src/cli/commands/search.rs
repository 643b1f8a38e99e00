//! Search command - lists every result with its verdict.

use tokio::runtime::Runtime;

use crate::config::Config;
use crate::youtube::Inspection;

use super::{TrackArgs, build_finder, format_duration};

/// Search for a track and print what the matcher thinks of each result
pub fn cmd_search(rt: &Runtime, config: &Config, args: &TrackArgs, json: bool) -> anyhow::Result<()> {
    let track = args.to_track(&config.download.extension);
    let finder = build_finder(config)?;

    let inspections = rt.block_on(finder.inspect(track.clone()))?;

    if json {
        let report: Vec<_> = inspections.iter().map(inspection_json).collect();
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "Results for \"{}\" ({}, tolerance ±{}s)",
        track.search_text(),
        format_duration(track.duration),
        finder.matcher().tolerance()
    );
    println!();

    if inspections.is_empty() {
        println!("No results found. The page layout may have changed;");
        println!("check the selectors with `music-fetcher config`.");
        return Ok(());
    }

    for inspection in &inspections {
        match &inspection.outcome {
            Ok((candidate, Ok(()))) => {
                println!(
                    "{:>3}. ✓ {} [{}] by {}",
                    inspection.position,
                    candidate.title,
                    format_duration(candidate.duration),
                    candidate.uploader
                );
                println!("       {}", candidate.url);
            }
            Ok((candidate, Err(reason))) => {
                println!(
                    "{:>3}. ✗ {} [{}] by {}",
                    inspection.position,
                    candidate.title,
                    format_duration(candidate.duration),
                    candidate.uploader
                );
                println!("       {}", reason);
            }
            Err(reason) => {
                println!("{:>3}. - {}", inspection.position, reason);
            }
        }
    }

    let accepted = inspections.iter().filter(|i| i.is_accepted()).count();
    println!();
    println!("{} of {} results acceptable", accepted, inspections.len());
    Ok(())
}

fn inspection_json(inspection: &Inspection) -> serde_json::Value {
    match &inspection.outcome {
        Ok((candidate, verdict)) => serde_json::json!({
            "position": inspection.position,
            "candidate": candidate,
            "accepted": verdict.is_ok(),
            "reason": verdict.as_ref().err().map(ToString::to_string),
        }),
        Err(reason) => serde_json::json!({
            "position": inspection.position,
            "candidate": null,
            "accepted": false,
            "reason": reason.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mock_candidate;
    use crate::youtube::YoutubeError;

    #[test]
    fn test_inspection_json_accepted() {
        let inspection = Inspection {
            position: 2,
            outcome: Ok((mock_candidate("abc123", 225), Ok(()))),
        };
        let value = inspection_json(&inspection);
        assert_eq!(value["position"], 2);
        assert_eq!(value["accepted"], true);
        assert_eq!(value["candidate"]["id"], "abc123");
        assert!(value["reason"].is_null());
    }

    #[test]
    fn test_inspection_json_rejected_entry() {
        let inspection = Inspection {
            position: 1,
            outcome: Err(YoutubeError::PlaylistUrl("/watch?v=a&list=PL".to_string())),
        };
        let value = inspection_json(&inspection);
        assert_eq!(value["accepted"], false);
        assert!(value["candidate"].is_null());
        assert!(value["reason"].as_str().unwrap().contains("Playlist URL"));
    }
}
