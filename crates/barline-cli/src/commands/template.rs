//! Template command implementation
//!
//! Creates a section template ABC file with the correct number of bars.

use anyhow::{Context, Result};
use barline_abc::section_template;
use barline_spec::Structure;
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Run the template command
///
/// # Arguments
/// * `structure_path` - Path to structure.yaml
/// * `section` - Section name (intro, verse, chorus, ...)
/// * `instrument` - Instrument name
/// * `output` - Output path (default: `sections/{section}-{instrument}.abc`
///   next to the structure file)
///
/// # Returns
/// Exit code: 0 on success, 1 on missing input or unknown section
pub fn run(
    structure_path: &str,
    section: &str,
    instrument: &str,
    output: Option<&str>,
) -> Result<ExitCode> {
    let structure_file = Path::new(structure_path);
    if !structure_file.exists() {
        anyhow::bail!("Structure file does not exist: {}", structure_path);
    }

    let structure = Structure::from_yaml_file(structure_file)
        .with_context(|| format!("Failed to load structure file: {}", structure_path))?;

    let content = section_template(&structure, section, instrument)
        .with_context(|| format!("Failed to build template for section '{}'", section))?;

    let output_file = match output {
        Some(path) => PathBuf::from(path),
        None => structure_file
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("sections")
            .join(format!("{}-{}.abc", section, instrument)),
    };

    if let Some(parent) = output_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    std::fs::write(&output_file, &content)
        .with_context(|| format!("Failed to write template: {}", output_file.display()))?;

    let bars = structure.section_bars(section).unwrap_or_default();
    println!(
        "{} {}",
        "Created template:".green().bold(),
        output_file.display()
    );
    println!("  {} {}", "Section:".dimmed(), section);
    println!("  {} {}", "Instrument:".dimmed(), instrument);
    println!("  {} {}", "Expected bars:".dimmed(), bars);

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use barline_abc::count_bars;

    const STRUCTURE: &str = "title: T\ntempo: 100\ntime: 4/4\nkey: C\nsections:\n  - name: intro\n    bars: 4\nstructure: [intro]\ninstruments:\n  bass:\n    program: 33\n";

    #[test]
    fn writes_template_with_correct_bars() {
        let tmp = tempfile::tempdir().unwrap();
        let structure = tmp.path().join("structure.yaml");
        std::fs::write(&structure, STRUCTURE).unwrap();

        let code = run(structure.to_str().unwrap(), "intro", "bass", None).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let template = tmp.path().join("sections").join("intro-bass.abc");
        assert!(template.exists());
        assert_eq!(count_bars(&std::fs::read_to_string(&template).unwrap()), 4);
    }

    #[test]
    fn unknown_section_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let structure = tmp.path().join("structure.yaml");
        std::fs::write(&structure, STRUCTURE).unwrap();

        assert!(run(structure.to_str().unwrap(), "coda", "bass", None).is_err());
    }
}
