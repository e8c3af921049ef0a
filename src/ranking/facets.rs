use std::collections::BTreeSet;

use super::types::RawRanking;

/// Distinct genres, ascending
pub fn available_genres(records: &[RawRanking]) -> Vec<String> {
    let genres: BTreeSet<&str> = records.iter().map(|r| r.genre.as_str()).collect();
    genres.into_iter().map(String::from).collect()
}

/// Distinct weeks, most recent first.
///
/// "Most recent" is string order, so week labels must sort chronologically
/// (zero-padded ISO dates or weeks do).
pub fn available_weeks(records: &[RawRanking]) -> Vec<String> {
    let weeks: BTreeSet<&str> = records.iter().map(|r| r.week.as_str()).collect();
    weeks.into_iter().rev().map(String::from).collect()
}
