use serde::{Deserialize, Serialize};

// Raw wire shapes for the two space-video listing endpoints. The web
// endpoint and the app endpoint return the same logical data with
// different field names and encodings; both are normalized into
// `spacetv_types::SpaceVideo` in `normalize.rs`.

/// One entry of the web-endpoint listing.
///
/// `length` is a colon-separated "MM:SS" string and `created` is a unix
/// timestamp in seconds.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebSpaceVideoItem {
    pub aid: i64,
    pub bvid: String,
    pub title: String,
    pub pic: String,
    pub author: String,
    pub length: String,
    #[serde(default)]
    pub play: i64,
    #[serde(default)]
    pub video_review: i64,
    pub created: i64,
}

/// Web-endpoint listing body.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct WebVideoListing {
    #[serde(default)]
    pub vlist: Vec<WebSpaceVideoItem>,
}

/// One entry of the app-endpoint listing.
///
/// The numeric id arrives as the string-typed `param` field; `duration`
/// is already integer seconds and `ctime` is a unix timestamp in
/// seconds.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppSpaceVideoItem {
    pub param: String,
    pub bvid: String,
    pub title: String,
    pub cover: String,
    pub author: String,
    pub duration: u32,
    #[serde(default)]
    pub play: i64,
    #[serde(default)]
    pub danmaku: i64,
    pub ctime: i64,
}

/// App-endpoint listing body.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppVideoListing {
    #[serde(default)]
    pub item: Vec<AppSpaceVideoItem>,
}
