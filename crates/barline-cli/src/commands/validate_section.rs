//! Validate-section command implementation
//!
//! Checks that one section file carries exactly the bar count the
//! structure declares for its section.

use anyhow::{Context, Result};
use barline_abc::count_bars;
use barline_spec::Structure;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

/// Run the validate-section command
///
/// # Arguments
/// * `structure_path` - Path to structure.yaml
/// * `section` - Section name
/// * `instrument` - Instrument name (reported only)
/// * `file` - Section ABC file to check
///
/// # Returns
/// Exit code: 0 when the count matches, 1 otherwise
pub fn run(structure_path: &str, section: &str, instrument: &str, file: &str) -> Result<ExitCode> {
    let structure_file = Path::new(structure_path);
    if !structure_file.exists() {
        anyhow::bail!("Structure file does not exist: {}", structure_path);
    }

    let structure = Structure::from_yaml_file(structure_file)
        .with_context(|| format!("Failed to load structure file: {}", structure_path))?;
    let expected = structure
        .section_bars(section)
        .with_context(|| format!("Unknown section '{}'", section))?;

    let path = Path::new(file);
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string());

    if !path.exists() {
        println!("{} File not found: {}", "x".red(), file);
        return Ok(ExitCode::from(1));
    }

    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read: {}", file))?;
    let actual = count_bars(&content);

    if actual == expected as usize {
        println!(
            "{} {}: {} bars (correct for {}-{})",
            "ok".green(),
            name,
            actual,
            section,
            instrument
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} {}: {} bars (expected {})",
            "x".red(),
            name,
            actual,
            expected
        );
        Ok(ExitCode::from(1))
    }
}
