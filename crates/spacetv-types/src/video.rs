use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical video listing record.
///
/// Both remote listing shapes normalize into this one form; it is never
/// persisted, only recomputed per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceVideo {
    /// Numeric video id.
    pub aid: i64,
    /// String video id.
    pub bvid: String,
    pub title: String,
    /// Cover image URL.
    pub cover: String,
    pub author: String,
    /// Length in seconds.
    pub duration: u32,
    /// Play count.
    pub play: i64,
    /// Danmaku (comment overlay) count.
    pub danmaku: i64,
    pub publish_date: DateTime<Utc>,
}

/// Sort order accepted by the space video listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpaceVideoOrder {
    PubDate,
    Click,
}

impl SpaceVideoOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SpaceVideoOrder::PubDate => "pubdate",
            SpaceVideoOrder::Click => "click",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wire_values() {
        assert_eq!(SpaceVideoOrder::PubDate.as_str(), "pubdate");
        assert_eq!(SpaceVideoOrder::Click.as_str(), "click");
    }
}
