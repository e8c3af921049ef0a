use serde::Serialize;

use super::types::{IntegratedRanking, Platform, RawRanking};
use crate::selection::Selection;

/// Headline numbers shown above the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Summary {
    /// Number of explicitly selected platforms, `None` when all are shown
    pub selected_platforms: Option<usize>,
    pub total_titles: usize,
    pub top_score: i64,
    pub total_views: u64,
}

impl Summary {
    pub fn from_rankings(rankings: &[IntegratedRanking], selection: &Selection) -> Self {
        let selected = selection.platforms.len();
        Self {
            selected_platforms: (selected > 0).then_some(selected),
            total_titles: rankings.len(),
            top_score: rankings.first().map(|r| r.score).unwrap_or(0),
            total_views: rankings
                .iter()
                .fold(0u64, |acc, r| acc.saturating_add(r.total_views)),
        }
    }
}

/// A platform's own list: its records ordered by rank, first `limit` kept
pub fn platform_top(records: &[RawRanking], platform: Platform, limit: usize) -> Vec<RawRanking> {
    let mut own: Vec<RawRanking> = records
        .iter()
        .filter(|r| r.platform == platform)
        .cloned()
        .collect();
    own.sort_by_key(|r| r.rank);
    own.truncate(limit);
    own
}
