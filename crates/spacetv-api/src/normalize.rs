use chrono::{DateTime, Utc};
use spacetv_types::SpaceVideo;

use crate::schema::{AppSpaceVideoItem, AppVideoListing, WebSpaceVideoItem, WebVideoListing};
use crate::{Error, Result};

/// Parse a colon-separated "MM:SS" duration string into seconds.
///
/// The string must split into exactly two integer-parseable parts;
/// anything else is a `MalformedDuration` error.
fn parse_mm_ss(raw: &str) -> Result<u32> {
    let mut parts = raw.split(':');
    let (Some(minutes), Some(seconds), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(Error::MalformedDuration(raw.to_string()));
    };
    let minutes: u32 = minutes
        .parse()
        .map_err(|_| Error::MalformedDuration(raw.to_string()))?;
    let seconds: u32 = seconds
        .parse()
        .map_err(|_| Error::MalformedDuration(raw.to_string()))?;
    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(|| Error::MalformedDuration(raw.to_string()))
}

/// Convert a unix-seconds timestamp to DateTime<Utc>, clamping
/// out-of-range values to the epoch so bad records stay deterministic
fn parse_unix_seconds(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

/// Normalize one web-endpoint record into the canonical form.
pub fn from_web_item(item: &WebSpaceVideoItem) -> Result<SpaceVideo> {
    Ok(SpaceVideo {
        aid: item.aid,
        bvid: item.bvid.clone(),
        title: item.title.clone(),
        cover: item.pic.clone(),
        author: item.author.clone(),
        duration: parse_mm_ss(&item.length)?,
        play: item.play,
        danmaku: item.video_review,
        publish_date: parse_unix_seconds(item.created),
    })
}

/// Normalize one app-endpoint record into the canonical form.
pub fn from_app_item(item: &AppSpaceVideoItem) -> Result<SpaceVideo> {
    let aid: i64 = item
        .param
        .parse()
        .map_err(|_| Error::MalformedId(item.param.clone()))?;

    Ok(SpaceVideo {
        aid,
        bvid: item.bvid.clone(),
        title: item.title.clone(),
        cover: item.cover.clone(),
        author: item.author.clone(),
        duration: item.duration,
        play: item.play,
        danmaku: item.danmaku,
        publish_date: parse_unix_seconds(item.ctime),
    })
}

/// Normalize a whole web listing, preserving input order.
///
/// Aborts on the first malformed record; callers wanting a partial
/// list can map over `listing.vlist` themselves.
pub fn normalize_web_listing(listing: &WebVideoListing) -> Result<Vec<SpaceVideo>> {
    listing.vlist.iter().map(from_web_item).collect()
}

/// Normalize a whole app listing, preserving input order.
pub fn normalize_app_listing(listing: &AppVideoListing) -> Result<Vec<SpaceVideo>> {
    listing.item.iter().map(from_app_item).collect()
}
