//! Cross-platform OTT leaderboard.
//!
//! Loads each streaming platform's weekly top-10 list, filters by platform,
//! genre and week, and merges the lists into one scored ranking that can be
//! printed or exported as CSV.

pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod ranking;
pub mod selection;
pub mod session;
pub mod source;

pub use error::{RecordError, SelectionError, SourceError};
pub use ranking::{IntegratedRanking, Platform, RawRanking};
pub use selection::Selection;
