use std::collections::HashMap;

use super::collation::TitleOrder;
use super::types::{IntegratedRanking, Platform, RawRanking};

/// Points a single placement is worth: rank 1 earns 10, rank 10 earns 1.
///
/// Ranks outside 1..=10 are not clamped.
pub fn points_for_rank(rank: i32) -> i64 {
    11 - i64::from(rank)
}

/// Running totals for one title while records are folded in
struct TitleAccumulator<'a> {
    title: &'a str,
    score: i64,
    platforms: Vec<Platform>,
    genre: &'a str,
    total_views: u64,
    best_rank: i32,
    best_platform: Platform,
}

impl<'a> TitleAccumulator<'a> {
    fn new(first: &'a RawRanking) -> Self {
        Self {
            title: &first.title,
            score: 0,
            platforms: Vec::new(),
            genre: &first.genre,
            total_views: 0,
            best_rank: first.rank,
            best_platform: first.platform,
        }
    }

    fn add(&mut self, record: &RawRanking) {
        self.score += points_for_rank(record.rank);
        self.platforms.push(record.platform);
        self.total_views = self.total_views.saturating_add(record.weekly_views);

        // Strictly lower only: on a tie the earlier record keeps the spot
        if record.rank < self.best_rank {
            self.best_rank = record.rank;
            self.best_platform = record.platform;
        }
    }

    fn finish(self) -> IntegratedRanking {
        IntegratedRanking {
            title: self.title.to_string(),
            score: self.score,
            platform_count: self.platforms.len(),
            platforms: self.platforms,
            main_platform: self.best_platform,
            genre: self.genre.to_string(),
            total_views: self.total_views,
        }
    }
}

/// Merge per-platform records into one leaderboard.
///
/// Records are grouped by exact title. The result is sorted by score
/// descending, then total views descending, then title in Korean collation
/// order. Total over any input, including an empty one.
pub fn aggregate(records: &[RawRanking]) -> Vec<IntegratedRanking> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<TitleAccumulator> = Vec::new();

    for record in records {
        let slot = *index.entry(record.title.as_str()).or_insert_with(|| {
            groups.push(TitleAccumulator::new(record));
            groups.len() - 1
        });
        groups[slot].add(record);
    }

    let mut rankings: Vec<IntegratedRanking> =
        groups.into_iter().map(TitleAccumulator::finish).collect();
    sort_rankings(&mut rankings);
    rankings
}

/// Sort in leaderboard order (score desc, views desc, title asc)
pub fn sort_rankings(rankings: &mut [IntegratedRanking]) {
    let order = TitleOrder::korean();
    rankings.sort_by(|a, b| {
        b.score
            .cmp(&a.score)
            .then_with(|| b.total_views.cmp(&a.total_views))
            .then_with(|| order.compare(&a.title, &b.title))
    });
}
