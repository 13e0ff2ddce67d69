//! Build command implementation
//!
//! Combines section files into complete per-instrument tracks, then runs
//! the consistency report over the built song.

use anyhow::{Context, Result};
use barline_abc::{combine_sections, verify_song_consistency, Renderer, TrackSettings};
use barline_spec::Structure;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::verify::print_report;

/// Run the build command
///
/// # Arguments
/// * `song_dir` - Song directory holding the sections/ folder; combined
///   tracks are written here
/// * `structure_path` - Structure file (default: `{song_dir}/structure.yaml`)
///
/// # Returns
/// Exit code: 0 when the built song is consistent, 1 otherwise
pub fn run(song_dir: &str, structure_path: Option<&str>) -> Result<ExitCode> {
    let dir = Path::new(song_dir);
    if !dir.exists() {
        anyhow::bail!("Song directory does not exist: {}", song_dir);
    }

    let structure_file = match structure_path {
        Some(path) => PathBuf::from(path),
        None => dir.join("structure.yaml"),
    };
    if !structure_file.exists() {
        anyhow::bail!(
            "Structure file does not exist: {}",
            structure_file.display()
        );
    }

    let structure = Structure::from_yaml_file(&structure_file)
        .with_context(|| format!("Failed to load: {}", structure_file.display()))?;
    let sections_dir = dir.join("sections");

    for (instrument, spec) in &structure.instruments {
        let settings = TrackSettings {
            title: structure.title.clone(),
            composer: structure.composer().to_string(),
            tempo: structure.tempo,
            time: structure.time.clone(),
            key: structure.key.clone(),
            midi_program: spec.program.unwrap_or(0),
            percussion: spec.percussion,
        };

        let sections: Vec<(String, PathBuf)> = structure
            .structure
            .iter()
            .map(|section| {
                (
                    section.clone(),
                    sections_dir.join(format!("{}-{}.abc", section, instrument)),
                )
            })
            .collect();

        let output = dir.join(format!("{}.abc", instrument));
        let outcome = combine_sections(&sections, &output, &settings)
            .with_context(|| format!("Failed to combine sections for '{}'", instrument))?;

        for missing in &outcome.missing {
            println!(
                "{} Missing section file: {}",
                "!".yellow(),
                missing.display()
            );
        }
        println!("{} {}.abc", "Built".green().bold(), instrument);
    }

    println!();
    println!("{}", "Verifying consistency...".cyan());
    let report = verify_song_consistency(dir, &Renderer::new())
        .with_context(|| format!("Failed to verify: {}", song_dir))?;
    print_report(&report);

    if report.is_consistent() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}
