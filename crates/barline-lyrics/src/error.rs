//! Error types for the lyrics pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during lyric processing.
#[derive(Debug, Error)]
pub enum LyricsError {
    /// Input contained no lyric lines after cleaning.
    #[error("no lyric lines found")]
    EmptyLyrics,

    /// A required lyrics file is missing.
    #[error("lyrics file not found: {0}")]
    MissingFile(PathBuf),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
