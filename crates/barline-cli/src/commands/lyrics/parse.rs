//! Lyrics parse command implementation
//!
//! Parses raw, chord-annotated lyric text into structured YAML.

use anyhow::{Context, Result};
use barline_lyrics::LyricParser;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run the lyrics parse command
///
/// # Arguments
/// * `input` - Raw lyrics file
/// * `output` - Output YAML path (default: input with `.yaml` extension)
///
/// # Returns
/// Exit code: 0 on success, 1 on missing input
pub fn run(input: &str, output: Option<&str>) -> Result<ExitCode> {
    let input_path = Path::new(input);
    if !input_path.exists() {
        anyhow::bail!("Input file not found: {}", input);
    }

    let text = std::fs::read_to_string(input_path)
        .with_context(|| format!("Failed to read: {}", input))?;
    let sheet = LyricParser::new().parse(&text);

    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => input_path.with_extension("yaml"),
    };

    let yaml = serde_yaml::to_string(&sheet).context("Failed to serialize lyric sheet")?;
    std::fs::write(&output_path, yaml)
        .with_context(|| format!("Failed to write: {}", output_path.display()))?;

    println!(
        "{} {}",
        "Parsed structure written to:".green().bold(),
        output_path.display()
    );
    println!("  {} {}", "Sections:".dimmed(), sheet.sections.len());
    println!(
        "  {} {}",
        "Section order:".dimmed(),
        sheet.section_order.join(" -> ")
    );

    Ok(ExitCode::SUCCESS)
}
