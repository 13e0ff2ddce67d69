//! Song consistency checking.
//!
//! For a finished song every instrument track must contain the same total
//! bar count, or playback drifts out of alignment. The checker reports
//! per-file counts and renderer validity; it never attempts to fix a
//! discrepancy — that is an authoring task.

use std::path::Path;

use serde::Serialize;

use crate::bars::count_bars;
use crate::error::{AbcError, AbcResult};
use crate::render::{Renderer, Validation};

/// Check result for one instrument file.
#[derive(Debug, Clone, Serialize)]
pub struct FileCheck {
    /// File name within the song directory.
    pub file: String,
    /// Counted bars (first voice).
    pub bars: usize,
    /// Whether the renderer accepted the file.
    pub valid: bool,
    /// Renderer diagnostics when invalid, "OK" otherwise.
    pub message: String,
}

/// Aggregate consistency report for a song directory.
#[derive(Debug, Clone, Serialize)]
pub struct ConsistencyReport {
    /// Name of the song directory.
    pub song_dir: String,
    /// Per-file results, sorted by file name.
    pub files: Vec<FileCheck>,
    /// Whether every file shares one bar count.
    pub all_match: bool,
    /// The shared bar count when `all_match`, else the first file's count.
    pub expected_bars: usize,
    /// The distinct bar counts found, ascending.
    pub distinct_counts: Vec<usize>,
}

impl ConsistencyReport {
    /// True when bar counts agree and every file passed renderer validation.
    pub fn is_consistent(&self) -> bool {
        self.all_match && self.files.iter().all(|f| f.valid)
    }
}

/// Verifies that all instrument ABC files in a song directory have the same
/// bar count, validating each through the renderer.
///
/// Renderer unavailability or timeout is recorded as a per-file validation
/// failure, never a batch abort. A directory with no ABC files is an error.
pub fn verify_song_consistency(song_dir: &Path, renderer: &Renderer) -> AbcResult<ConsistencyReport> {
    let mut abc_files: Vec<_> = std::fs::read_dir(song_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "abc"))
        .collect();
    abc_files.sort();

    if abc_files.is_empty() {
        return Err(AbcError::NoAbcFiles {
            dir: song_dir.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for abc_file in &abc_files {
        let content = std::fs::read_to_string(abc_file)?;
        let bars = count_bars(&content);

        let validation = match renderer.validate(abc_file) {
            Ok(v) => v,
            // Missing renderer, spawn failure, timeout: a per-file failure.
            Err(e) => Validation {
                ok: false,
                message: e.to_string(),
            },
        };

        files.push(FileCheck {
            file: abc_file
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            bars,
            valid: validation.ok,
            message: if validation.ok {
                "OK".to_string()
            } else {
                validation.message
            },
        });
    }

    let mut distinct_counts: Vec<usize> = files.iter().map(|f| f.bars).collect();
    distinct_counts.sort_unstable();
    distinct_counts.dedup();

    Ok(ConsistencyReport {
        song_dir: song_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        all_match: distinct_counts.len() == 1,
        expected_bars: files.first().map(|f| f.bars).unwrap_or(0),
        distinct_counts,
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_track(dir: &Path, name: &str, bars: usize) {
        let body = vec!["C8"; bars].join(" | ");
        let content = format!("X:1\nT:{}\nM:4/4\nL:1/8\nK:C\n{} |\n", name, body);
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn matching_directory_reports_all_match() {
        let tmp = tempfile::tempdir().unwrap();
        write_track(tmp.path(), "bass.abc", 4);
        write_track(tmp.path(), "guitar.abc", 4);
        write_track(tmp.path(), "vocal.abc", 4);

        let report = verify_song_consistency(tmp.path(), &Renderer::new()).unwrap();
        assert!(report.all_match);
        assert_eq!(report.expected_bars, 4);
        assert_eq!(report.distinct_counts, vec![4]);
        assert_eq!(report.files.len(), 3);
    }

    #[test]
    fn one_bar_discrepancy_surfaces_the_file() {
        let tmp = tempfile::tempdir().unwrap();
        write_track(tmp.path(), "bass.abc", 4);
        write_track(tmp.path(), "guitar.abc", 3);

        let report = verify_song_consistency(tmp.path(), &Renderer::new()).unwrap();
        assert!(!report.all_match);
        assert!(!report.is_consistent());
        assert_eq!(report.distinct_counts, vec![3, 4]);

        let discrepant = report.files.iter().find(|f| f.bars == 3).unwrap();
        assert_eq!(discrepant.file, "guitar.abc");
    }

    #[test]
    fn empty_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let result = verify_song_consistency(tmp.path(), &Renderer::new());
        assert!(matches!(result, Err(AbcError::NoAbcFiles { .. })));
    }

    #[test]
    fn files_are_sorted_by_name() {
        let tmp = tempfile::tempdir().unwrap();
        write_track(tmp.path(), "vocal.abc", 2);
        write_track(tmp.path(), "bass.abc", 2);

        let report = verify_song_consistency(tmp.path(), &Renderer::new()).unwrap();
        let names: Vec<_> = report.files.iter().map(|f| f.file.as_str()).collect();
        assert_eq!(names, vec!["bass.abc", "vocal.abc"]);
    }
}
