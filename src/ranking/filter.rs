use super::types::RawRanking;
use crate::selection::Selection;

/// Whether a single record passes every facet of the selection
pub fn matches(record: &RawRanking, selection: &Selection) -> bool {
    let platform_match =
        selection.platforms.is_empty() || selection.platforms.contains(&record.platform);
    let genre_match = selection.genres.is_empty() || selection.genres.contains(&record.genre);
    let week_match = selection.week().map_or(true, |week| record.week == week);

    platform_match && genre_match && week_match
}

/// Keep only the records matching the selection, preserving input order
pub fn filter_records(records: &[RawRanking], selection: &Selection) -> Vec<RawRanking> {
    records
        .iter()
        .filter(|record| matches(record, selection))
        .cloned()
        .collect()
}
