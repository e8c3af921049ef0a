use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A streaming service that publishes its own weekly top-10 list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Netflix,
    Disney,
    Wavve,
    Tving,
}

impl Platform {
    /// Every platform, in load and display order.
    pub const ALL: [Platform; 4] = [
        Platform::Netflix,
        Platform::Disney,
        Platform::Wavve,
        Platform::Tving,
    ];

    /// Wire identifier used in CSV data, query strings and file names
    pub fn id(self) -> &'static str {
        match self {
            Platform::Netflix => "netflix",
            Platform::Disney => "disney",
            Platform::Wavve => "wavve",
            Platform::Tving => "tving",
        }
    }

    /// Korean display name
    pub fn display_name(self) -> &'static str {
        match self {
            Platform::Netflix => "넷플릭스",
            Platform::Disney => "디즈니+",
            Platform::Wavve => "웨이브",
            Platform::Tving => "티빙",
        }
    }

    /// Name of the per-platform CSV resource, e.g. "netflix_top10.csv"
    pub fn resource_name(self) -> String {
        format!("{}_top10.csv", self.id())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| s.to_string())
    }
}

/// One title's placement on one platform's list for one week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRanking {
    pub platform: Platform,
    pub title: String,
    pub rank: i32,         // 1-based; out-of-range values pass through scoring
    pub genre: String,
    pub weekly_views: u64,
    pub region: String,
    pub week: String,      // e.g. "2024-03"; compared as an opaque string
}

/// A title's merged standing across every platform it appeared on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegratedRanking {
    pub title: String,
    pub score: i64,
    /// One entry per contributing record, in input order (not deduplicated)
    pub platforms: Vec<Platform>,
    pub main_platform: Platform,
    /// First genre seen for the title
    pub genre: String,
    pub total_views: u64,
    /// Number of contributing records, not distinct platforms
    pub platform_count: usize,
}
