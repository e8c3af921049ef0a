pub mod collation;
pub mod engine;
pub mod facets;
pub mod filter;
pub mod summary;
pub mod types;

pub use engine::{aggregate, points_for_rank, sort_rankings};
pub use facets::{available_genres, available_weeks};
pub use filter::filter_records;
pub use summary::{platform_top, Summary};
pub use types::{IntegratedRanking, Platform, RawRanking};
