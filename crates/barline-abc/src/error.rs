//! Error types for the ABC engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for ABC engine operations.
pub type AbcResult<T> = Result<T, AbcError>;

/// Errors that can occur during ABC engine operations.
#[derive(Debug, Error)]
pub enum AbcError {
    /// Renderer executable not found.
    #[error("abc2midi executable not found. Ensure the abcmidi package is installed and in PATH, or set ABC2MIDI_PATH environment variable")]
    RendererNotFound,

    /// Failed to spawn the renderer process.
    #[error("Failed to spawn abc2midi process: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// Renderer process timed out.
    #[error("abc2midi timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// Renderer process exited with non-zero status.
    #[error("abc2midi exited with status {exit_code}: {stderr}")]
    ProcessFailed { exit_code: i32, stderr: String },

    /// No ABC files found in a song directory.
    #[error("No ABC files found in {dir}")]
    NoAbcFiles { dir: PathBuf },

    /// A section file referenced by the structure is missing.
    #[error("Section file not found: {path}")]
    SectionNotFound { path: PathBuf },

    /// IO error during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AbcError {
    /// Creates a new process failed error.
    pub fn process_failed(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self::ProcessFailed {
            exit_code,
            stderr: stderr.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AbcError::RendererNotFound;
        assert!(err.to_string().contains("abc2midi executable not found"));

        let err = AbcError::Timeout { timeout_secs: 10 };
        assert!(err.to_string().contains("10 seconds"));

        let err = AbcError::process_failed(1, "bad input");
        assert!(err.to_string().contains("bad input"));
    }
}
