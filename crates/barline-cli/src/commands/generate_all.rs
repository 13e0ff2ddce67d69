//! Generate-all command implementation
//!
//! Writes a section template for every (section, instrument) pair that
//! does not already have a section file.

use anyhow::{Context, Result};
use barline_abc::section_template;
use barline_spec::Structure;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

/// Run the generate-all command
///
/// # Arguments
/// * `song_dir` - Song directory containing structure.yaml
///
/// # Returns
/// Exit code: 0 on success
pub fn run(song_dir: &str) -> Result<ExitCode> {
    let dir = Path::new(song_dir);
    let structure_file = dir.join("structure.yaml");
    if !structure_file.exists() {
        anyhow::bail!(
            "Structure file does not exist: {}",
            structure_file.display()
        );
    }

    let structure = Structure::from_yaml_file(&structure_file)
        .with_context(|| format!("Failed to load: {}", structure_file.display()))?;

    let sections_dir = dir.join("sections");
    std::fs::create_dir_all(&sections_dir)
        .with_context(|| format!("Failed to create: {}", sections_dir.display()))?;

    let mut count = 0usize;
    for section in structure.unique_sections() {
        for instrument in structure.instrument_names() {
            let output_file = sections_dir.join(format!("{}-{}.abc", section, instrument));
            if output_file.exists() {
                continue;
            }

            let content = section_template(&structure, section, instrument)
                .with_context(|| format!("Failed to build template for '{}'", section))?;
            std::fs::write(&output_file, content)
                .with_context(|| format!("Failed to write: {}", output_file.display()))?;

            println!(
                "{} {}",
                "Created template:".green(),
                output_file.display()
            );
            count += 1;
        }
    }

    println!();
    println!("Generated {} section templates", count);
    Ok(ExitCode::SUCCESS)
}
