use anyhow::{Context as _, Result};
use spacetv_api::schema::{AppVideoListing, WebVideoListing};
use spacetv_types::{format_duration, truncate, SpaceVideo};
use std::path::Path;

use crate::args::ListingShape;

pub fn normalize(file: &Path, shape: ListingShape, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let videos: Vec<SpaceVideo> = match shape {
        ListingShape::Web => {
            let listing: WebVideoListing =
                serde_json::from_str(&content).context("Failed to parse web listing")?;
            spacetv_api::normalize_web_listing(&listing)?
        }
        ListingShape::App => {
            let listing: AppVideoListing =
                serde_json::from_str(&content).context("Failed to parse app listing")?;
            spacetv_api::normalize_app_listing(&listing)?
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&videos)?);
        return Ok(());
    }

    println!(
        "{:>12} {:>14} {:>8} {:>10} {:>8} {:>10}  {}",
        "AID", "BVID", "LENGTH", "PLAYS", "DANMAKU", "DATE", "TITLE"
    );
    for video in &videos {
        println!(
            "{:>12} {:>14} {:>8} {:>10} {:>8} {:>10}  {}",
            video.aid,
            video.bvid,
            format_duration(video.duration),
            video.play,
            video.danmaku,
            video.publish_date.format("%Y-%m-%d"),
            truncate(&video.title, 48)
        );
    }
    println!("\n{} record(s)", videos.len());
    Ok(())
}
