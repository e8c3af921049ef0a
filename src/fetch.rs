use futures::stream::{FuturesUnordered, StreamExt};
use std::time::Duration;
use tokio_retry::{strategy::ExponentialBackoff, Retry};

use crate::error::SourceError;
use crate::ranking::{Platform, RawRanking};
use crate::source::{parse_rankings, MalformedPolicy, RankingSource};

/// Knobs for one load pass
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub timeout: Duration,
    pub retries: usize,
    pub malformed: MalformedPolicy,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(20),
            retries: 3,
            malformed: MalformedPolicy::Skip,
        }
    }
}

/// A platform whose records could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformFailure {
    pub platform: Platform,
    pub message: String,
}

/// Result of loading every platform. Never an error: failed platforms
/// contribute no records and are listed in `failed`.
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub records: Vec<RawRanking>,
    pub failed: Vec<PlatformFailure>,
}

impl LoadOutcome {
    pub fn all_failed(&self) -> bool {
        self.failed.len() == Platform::ALL.len()
    }
}

/// Fetch and parse a single platform's list, with retry and timeout
pub async fn load_platform<S: RankingSource>(
    source: &S,
    platform: Platform,
    options: &LoadOptions,
) -> Result<Vec<RawRanking>, SourceError> {
    // Delays double from 100ms, capped at 5s
    let retry_strategy = ExponentialBackoff::from_millis(2)
        .factor(50)
        .max_delay(Duration::from_secs(5))
        .take(options.retries);

    let fetch = Retry::spawn(retry_strategy, || source.fetch_text(platform));
    let text = tokio::time::timeout(options.timeout, fetch)
        .await
        .map_err(|_| SourceError::Timeout(platform))??;

    Ok(parse_rankings(&text, options.malformed)?)
}

/// Load every platform concurrently and concatenate the records.
///
/// Fetches complete in any order, but the output is always concatenated in
/// [`Platform::ALL`] order. A platform that fails is logged and contributes
/// an empty list.
pub async fn load_all<S: RankingSource + Sync>(source: &S, options: &LoadOptions) -> LoadOutcome {
    let mut slots: Vec<Option<Vec<RawRanking>>> = vec![None; Platform::ALL.len()];
    let mut failed = Vec::new();

    let mut futures = FuturesUnordered::new();
    for (idx, platform) in Platform::ALL.into_iter().enumerate() {
        futures.push(async move { (idx, platform, load_platform(source, platform, options).await) });
    }

    while let Some((idx, platform, result)) = futures.next().await {
        match result {
            Ok(records) => {
                tracing::debug!(%platform, count = records.len(), "loaded platform");
                slots[idx] = Some(records);
            }
            Err(e) => {
                tracing::warn!(%platform, source = %source.describe(), error = %e, "platform load failed, continuing without it");
                failed.push(PlatformFailure {
                    platform,
                    message: e.to_string(),
                });
            }
        }
    }

    failed.sort_by_key(|f| f.platform);
    let records: Vec<RawRanking> = slots.into_iter().flatten().flatten().collect();
    tracing::info!(
        records = records.len(),
        failed = failed.len(),
        "load complete"
    );

    LoadOutcome { records, failed }
}
