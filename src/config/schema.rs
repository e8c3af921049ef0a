use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::source::MalformedPolicy;

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    /// What to do with unparseable data lines: "skip" (default) or "abort"
    #[serde(default)]
    pub malformed_records: MalformedPolicy,

    /// Fallback tracing filter when RUST_LOG is unset (e.g. "info")
    #[serde(default)]
    pub log_level: Option<String>,
}

/// Where per-platform CSV files live. Exactly one field must be set.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Base URL; files are fetched from `<base_url>/<platform>_top10.csv`
    #[serde(default)]
    pub base_url: Option<String>,

    /// Local directory holding `<platform>_top10.csv` files
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FetchConfig {
    /// Per-platform timeout, humantime format ("20s", "1m 30s")
    #[serde(default = "default_timeout")]
    pub timeout: String,

    /// Retries after the first failed attempt
    #[serde(default = "default_retries")]
    pub retries: usize,
}

fn default_timeout() -> String {
    "20s".to_string()
}

fn default_retries() -> usize {
    3
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: default_timeout(),
            retries: default_retries(),
        }
    }
}
