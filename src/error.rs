use std::path::PathBuf;

use thiserror::Error;

use crate::ranking::Platform;

/// A single data line that could not be turned into a `RawRanking`.
///
/// Line numbers are 1-based and count the header line, so they match what an
/// editor shows for the source file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("line {line}: expected 7 fields, found {found}")]
    FieldCount { line: usize, found: usize },

    #[error("line {line}: unknown platform '{value}'")]
    UnknownPlatform { line: usize, value: String },

    #[error("line {line}: rank '{value}' is not an integer")]
    InvalidRank { line: usize, value: String },

    #[error("line {line}: weekly views '{value}' is not a non-negative integer")]
    InvalidViews { line: usize, value: String },
}

/// Failure to obtain one platform's record list.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{platform}: server responded with status {status}")]
    Status { platform: Platform, status: u16 },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}: fetch timed out")]
    Timeout(Platform),

    #[error("malformed record: {0}")]
    Malformed(#[from] RecordError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("unknown platform '{0}' (expected one of: netflix, disney, wavve, tving)")]
    UnknownPlatform(String),

    #[error("query value for '{key}' is not valid percent-encoded UTF-8")]
    InvalidEncoding { key: String },
}
