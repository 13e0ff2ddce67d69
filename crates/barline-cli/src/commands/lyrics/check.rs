//! Lyrics check command implementation
//!
//! Verifies lyric consistency across a song's generated files.

use anyhow::Result;
use barline_lyrics::validate_song_lyrics;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

/// Run the lyrics check command
///
/// # Arguments
/// * `song_dir` - Song directory holding lyrics.yaml (and optionally
///   chords.yaml)
///
/// # Returns
/// Exit code: 0 when all sources agree, 1 otherwise
pub fn run(song_dir: &str) -> Result<ExitCode> {
    let dir = Path::new(song_dir);
    if !dir.exists() {
        anyhow::bail!("Song directory does not exist: {}", song_dir);
    }

    let report = validate_song_lyrics(dir);

    println!("{}", "======================================================================".cyan());
    println!("{} {}", "Lyrics Validation:".cyan().bold(), report.song_dir);
    println!("{}", "======================================================================".cyan());
    println!(
        "{} {}",
        "Files checked:".dimmed(),
        report.files_checked.join(", ")
    );

    if !report.errors.is_empty() {
        println!();
        println!("{} ({}):", "ERRORS".red().bold(), report.errors.len());
        for error in &report.errors {
            println!("\n{}", error);
        }
    }

    println!();
    if report.all_valid {
        println!("{} All lyrics are consistent!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Found {} inconsistencies",
            "FAILED".red().bold(),
            report.errors.len()
        );
        Ok(ExitCode::from(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consistent_directory_passes() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("lyrics.yaml"),
            "sections:\n  verse1:\n    - the river runs cold\n",
        )
        .unwrap();

        let code = run(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn drifted_chords_fail() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("lyrics.yaml"),
            "sections:\n  verse1:\n    - the river runs cold\n",
        )
        .unwrap();
        std::fs::write(
            tmp.path().join("chords.yaml"),
            "sections:\n  verse1:\n    - chords: [Am]\n      lyrics: something else entirely\n",
        )
        .unwrap();

        let code = run(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn missing_directory_is_an_error() {
        assert!(run("/nonexistent/song").is_err());
    }
}
