//! Verify command implementation
//!
//! Verifies that every instrument ABC file in a song directory carries the
//! same bar count, and reports per-file renderer validity.

use anyhow::{Context, Result};
use barline_abc::{verify_song_consistency, ConsistencyReport, Renderer};
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

/// Run the verify command
///
/// # Arguments
/// * `song_dir` - Directory containing per-instrument ABC files
/// * `json` - Whether to output machine-readable JSON instead of text
///
/// # Returns
/// Exit code: 0 when all files agree and validate, 1 otherwise
pub fn run(song_dir: &str, json: bool) -> Result<ExitCode> {
    let dir = Path::new(song_dir);
    if !dir.exists() {
        anyhow::bail!("Song directory does not exist: {}", song_dir);
    }

    let report = verify_song_consistency(dir, &Renderer::new())
        .with_context(|| format!("Failed to verify song directory: {}", song_dir))?;

    if json {
        let output = serde_json::to_string_pretty(&report)
            .context("Failed to serialize consistency report")?;
        println!("{}", output);
    } else {
        print_report(&report);
    }

    if report.is_consistent() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Print a consistency report to the console
pub(crate) fn print_report(report: &ConsistencyReport) {
    println!("{}", "============================================================".cyan());
    println!("{} {}", "Song:".cyan().bold(), report.song_dir);
    println!("{}", "============================================================".cyan());

    for file in &report.files {
        let status = if file.valid {
            "ok".green()
        } else {
            "x".red()
        };
        let message = if file.valid {
            file.message.clone()
        } else {
            // Renderer diagnostics can run long; keep the table readable.
            file.message.lines().next().unwrap_or("").to_string()
        };
        println!(
            "{} {:30} {:3} bars  {}",
            status,
            file.file,
            file.bars,
            message.dimmed()
        );
    }

    println!("{}", "------------------------------------------------------------".dimmed());

    if report.all_match {
        println!(
            "{} All files match: {} bars",
            "ok".green().bold(),
            report.expected_bars
        );
    } else {
        println!(
            "{} Bar count mismatch! Found: {:?}",
            "x".red().bold(),
            report.distinct_counts
        );
        println!("  Expected: all files should have the same bar count");
    }

    println!("{}", "============================================================".cyan());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_track(dir: &Path, name: &str, bars: usize) {
        let body = vec!["C8"; bars].join(" | ");
        std::fs::write(
            dir.join(name),
            format!("X:1\nT:t\nM:4/4\nL:1/8\nK:C\n{} |\n", body),
        )
        .unwrap();
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(run("/nonexistent/song", false).is_err());
    }

    #[test]
    fn empty_directory_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(run(tmp.path().to_str().unwrap(), false).is_err());
    }

    #[test]
    fn mismatched_directory_exits_nonzero() {
        let tmp = tempfile::tempdir().unwrap();
        write_track(tmp.path(), "bass.abc", 4);
        write_track(tmp.path(), "vocal.abc", 3);

        let code = run(tmp.path().to_str().unwrap(), true).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }
}
