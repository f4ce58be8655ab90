//! Load-time error types.

use std::path::PathBuf;

/// Errors raised while loading stop and schedule data.
///
/// These abort startup. Nothing a query does can produce one.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Data file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Data file is not the expected JSON shape
    #[error("failed to parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// `stop_sequence` is missing or not an integer
    #[error("journey {journey}: stop_sequence must be an integer, got {value}")]
    InvalidStopSequence { journey: String, value: String },

    /// Two rows of one journey share a `stop_sequence`
    #[error("journey {journey}: duplicate stop_sequence {sequence}")]
    DuplicateStopSequence { journey: String, sequence: i64 },

    /// `lat`/`lon` present but not a number
    #[error("stop {id}: coordinate must be a number, got {value}")]
    InvalidCoordinate { id: String, value: String },
}
