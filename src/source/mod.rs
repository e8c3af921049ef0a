pub mod dir;
pub mod http;
pub mod parse;

pub use dir::DirSource;
pub use http::HttpSource;
pub use parse::{parse_line, parse_rankings, MalformedPolicy};

use std::future::Future;

use crate::error::SourceError;
use crate::ranking::Platform;

/// Anything that can hand back a platform's raw CSV text.
///
/// Implementations only move bytes; parsing, retries and timeouts are applied
/// by the loader in [`crate::fetch`].
pub trait RankingSource {
    fn fetch_text(
        &self,
        platform: Platform,
    ) -> impl Future<Output = Result<String, SourceError>> + Send;

    /// Short human-readable location, for logs
    fn describe(&self) -> String;
}

/// The provider selected by configuration
#[derive(Debug, Clone)]
pub enum DataSource {
    Http(HttpSource),
    Dir(DirSource),
}

impl RankingSource for DataSource {
    async fn fetch_text(&self, platform: Platform) -> Result<String, SourceError> {
        match self {
            DataSource::Http(source) => source.fetch_text(platform).await,
            DataSource::Dir(source) => source.fetch_text(platform).await,
        }
    }

    fn describe(&self) -> String {
        match self {
            DataSource::Http(source) => source.describe(),
            DataSource::Dir(source) => source.describe(),
        }
    }
}
