use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::fetch::{LoadOutcome, PlatformFailure};
use crate::ranking::{
    aggregate, available_genres, available_weeks, filter_records, IntegratedRanking, RawRanking,
    Summary,
};
use crate::selection::Selection;

/// Proof that a load was started; only the most recent ticket may install
/// its result.
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl LoadTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// False once a newer load has been started; in-flight work may stop early
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

/// Everything derived from the board for one selection
#[derive(Debug, Clone)]
pub struct BoardView {
    pub genres: Vec<String>,
    pub weeks: Vec<String>,
    /// The caller's selection with its week defaulted to the most recent one
    pub selection: Selection,
    pub records: Vec<RawRanking>,
    pub rankings: Vec<IntegratedRanking>,
    pub summary: Summary,
}

/// Holds the current record set. Loads are tagged with a generation number
/// so a slow, superseded load can never overwrite a newer one.
#[derive(Debug, Default)]
pub struct RankingBoard {
    latest: Arc<AtomicU64>,
    installed: u64,
    records: Vec<RawRanking>,
    failed: Vec<PlatformFailure>,
}

impl RankingBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, invalidating any ticket handed out before
    pub fn begin_load(&self) -> LoadTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Install a finished load. Returns false (and drops the outcome) when
    /// the ticket has been superseded.
    pub fn complete_load(&mut self, ticket: &LoadTicket, outcome: LoadOutcome) -> bool {
        if !ticket.is_current() {
            tracing::debug!(
                generation = ticket.generation,
                latest = self.latest.load(Ordering::SeqCst),
                "discarding superseded load"
            );
            return false;
        }
        self.installed = ticket.generation;
        self.records = outcome.records;
        self.failed = outcome.failed;
        true
    }

    /// Generation of the installed records (0 before the first load)
    pub fn installed_generation(&self) -> u64 {
        self.installed
    }

    pub fn records(&self) -> &[RawRanking] {
        &self.records
    }

    pub fn failed(&self) -> &[PlatformFailure] {
        &self.failed
    }

    /// Derive facets, filtered records, rankings and summary for a selection.
    ///
    /// Facets always come from the unfiltered record set.
    pub fn view(&self, selection: &Selection) -> BoardView {
        let genres = available_genres(&self.records);
        let weeks = available_weeks(&self.records);
        let selection = selection.resolve_week(&weeks);
        let records = filter_records(&self.records, &selection);
        let rankings = aggregate(&records);
        let summary = Summary::from_rankings(&rankings, &selection);

        BoardView {
            genres,
            weeks,
            selection,
            records,
            rankings,
            summary,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ranking::Platform;

    fn record(title: &str, week: &str) -> RawRanking {
        RawRanking {
            platform: Platform::Netflix,
            title: title.to_string(),
            rank: 1,
            genre: "드라마".to_string(),
            weekly_views: 10,
            region: "KR".to_string(),
            week: week.to_string(),
        }
    }

    fn outcome(records: Vec<RawRanking>) -> LoadOutcome {
        LoadOutcome {
            records,
            failed: vec![],
        }
    }

    #[test]
    fn test_single_load_installs() {
        let mut board = RankingBoard::new();
        let ticket = board.begin_load();
        assert!(board.complete_load(&ticket, outcome(vec![record("A", "w1")])));
        assert_eq!(board.records().len(), 1);
        assert_eq!(board.installed_generation(), ticket.generation());
    }

    #[test]
    fn test_superseded_load_is_discarded() {
        let mut board = RankingBoard::new();
        let old = board.begin_load();
        let new = board.begin_load();
        assert!(!old.is_current());
        assert!(new.is_current());

        // Newer load lands first, then the stale one arrives late
        assert!(board.complete_load(&new, outcome(vec![record("New", "w1")])));
        assert!(!board.complete_load(&old, outcome(vec![record("Old", "w1")])));
        assert_eq!(board.records()[0].title, "New");
    }

    #[test]
    fn test_stale_load_rejected_even_if_first() {
        let mut board = RankingBoard::new();
        let old = board.begin_load();
        let _new = board.begin_load();

        assert!(!board.complete_load(&old, outcome(vec![record("Old", "w1")])));
        assert!(board.records().is_empty());
        assert_eq!(board.installed_generation(), 0);
    }

    #[test]
    fn test_view_defaults_to_latest_week() {
        let mut board = RankingBoard::new();
        let ticket = board.begin_load();
        board.complete_load(
            &ticket,
            outcome(vec![record("Old", "2024-01"), record("New", "2024-02")]),
        );

        let view = board.view(&Selection::default());
        assert_eq!(view.weeks, vec!["2024-02", "2024-01"]);
        assert_eq!(view.selection.week(), Some("2024-02"));
        assert_eq!(view.rankings.len(), 1);
        assert_eq!(view.rankings[0].title, "New");
        assert_eq!(view.summary.total_titles, 1);
    }

    #[test]
    fn test_view_of_empty_board() {
        let board = RankingBoard::new();
        let view = board.view(&Selection::default());
        assert!(view.rankings.is_empty());
        assert!(view.weeks.is_empty());
        assert_eq!(view.selection.week(), None);
        assert_eq!(view.summary.top_score, 0);
    }

    #[tokio::test]
    async fn test_bundled_sample_data_end_to_end() {
        use crate::fetch::{load_all, LoadOptions};
        use crate::source::DirSource;

        let source = DirSource::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"));
        let mut board = RankingBoard::new();
        let ticket = board.begin_load();
        let loaded = load_all(&source, &LoadOptions::default()).await;
        assert!(loaded.failed.is_empty());
        assert!(board.complete_load(&ticket, loaded));

        let view = board.view(&Selection::default());
        assert_eq!(view.weeks, vec!["2024-03", "2024-02"]);

        let titles: Vec<&str> = view.rankings.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["오징어 게임", "더 글로리", "무빙", "환승연애", "런닝맨", "피지컬: 100"]
        );
        assert_eq!(view.rankings[0].score, 17);
        assert_eq!(view.rankings[1].score, 17);
        assert_eq!(view.rankings[1].main_platform, Platform::Netflix);
        assert_eq!(view.rankings[2].platforms, vec![Platform::Disney, Platform::Tving]);
    }
}
