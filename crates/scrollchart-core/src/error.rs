//! Error types for loading, configuration, and playback control

use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading a series from CSV
#[derive(Debug, Error)]
pub enum SeriesError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing column '{0}' in CSV header")]
    MissingColumn(String),

    /// A row whose date or rate does not parse. Line numbers are 1-based and
    /// count the header line.
    #[error("malformed record on line {line}: {reason}")]
    MalformedRecord { line: u64, reason: String },

    #[error("CSV contains no records")]
    Empty,
}

/// Invalid chart or animator configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("visible row count must be at least 1")]
    NoRows,

    #[error("series has {len} records but {visible_rows} visible rows were requested")]
    SeriesTooShort { len: usize, visible_rows: usize },

    #[error("tick interval must be greater than zero")]
    ZeroInterval,

    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors returned by the playback control surface
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DriverError {
    #[error("playback task has shut down")]
    Closed,
}
