//! Validate-all command implementation
//!
//! Validates every (section, instrument) section file for a song: bar
//! counts against the structure, plus a list of missing files.

use anyhow::{Context, Result};
use barline_abc::count_bars;
use barline_spec::Structure;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

/// Run the validate-all command
///
/// # Arguments
/// * `song_dir` - Song directory containing structure.yaml and sections/
///
/// # Returns
/// Exit code: 0 when every section file exists with the right count,
/// 1 otherwise
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
    if !sections_dir.exists() {
        anyhow::bail!("No sections directory found in {}", song_dir);
    }

    println!("{}", "======================================================================".cyan());
    println!("{} {}", "Section Validation:".cyan().bold(), structure.title);
    println!("{}", "======================================================================".cyan());

    let mut missing: Vec<String> = Vec::new();
    let mut invalid = 0usize;
    let mut checked = 0usize;

    for section in structure.unique_sections() {
        let expected = structure
            .section_bars(section)
            .with_context(|| format!("Unknown section '{}'", section))?;

        for instrument in structure.instrument_names() {
            let file_name = format!("{}-{}.abc", section, instrument);
            let section_file = sections_dir.join(&file_name);

            if !section_file.exists() {
                missing.push(file_name);
                continue;
            }

            let content = std::fs::read_to_string(&section_file)
                .with_context(|| format!("Failed to read: {}", section_file.display()))?;
            let actual = count_bars(&content);
            checked += 1;

            if actual == expected as usize {
                println!("{} {}: {} bars (correct)", "ok".green(), file_name, actual);
            } else {
                println!(
                    "{} {}: {} bars (expected {})",
                    "x".red(),
                    file_name,
                    actual,
                    expected
                );
                invalid += 1;
            }
        }
    }

    if !missing.is_empty() {
        println!();
        println!(
            "{} ({}):",
            "Missing section files".yellow().bold(),
            missing.len()
        );
        for file_name in &missing {
            println!("  - {}", file_name);
        }
    }

    println!();
    if invalid == 0 && missing.is_empty() {
        println!(
            "{} All {} sections valid!",
            "SUCCESS".green().bold(),
            checked
        );
        Ok(ExitCode::SUCCESS)
    } else {
        if invalid > 0 {
            println!("{} {} invalid sections", "FAILED".red().bold(), invalid);
        }
        if !missing.is_empty() {
            println!("{} {} missing sections", "FAILED".red().bold(), missing.len());
        }
        Ok(ExitCode::from(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRUCTURE: &str = "title: T\ntempo: 100\ntime: 4/4\nkey: C\nsections:\n  - name: intro\n    bars: 2\nstructure: [intro]\ninstruments:\n  bass:\n    program: 33\n  vocal:\n    program: 53\n";

    fn write_section(dir: &Path, name: &str, bars: usize) {
        let body = vec!["C8"; bars].join(" | ");
        std::fs::write(
            dir.join(name),
            format!("X:1\nM:4/4\nL:1/8\nK:C\n{} |\n", body),
        )
        .unwrap();
    }

    #[test]
    fn all_valid_sections_pass() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("structure.yaml"), STRUCTURE).unwrap();
        let sections = tmp.path().join("sections");
        std::fs::create_dir(&sections).unwrap();
        write_section(&sections, "intro-bass.abc", 2);
        write_section(&sections, "intro-vocal.abc", 2);

        let code = run(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn missing_and_wrong_sections_fail() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("structure.yaml"), STRUCTURE).unwrap();
        let sections = tmp.path().join("sections");
        std::fs::create_dir(&sections).unwrap();
        // bass has the wrong count, vocal is missing entirely
        write_section(&sections, "intro-bass.abc", 3);

        let code = run(tmp.path().to_str().unwrap()).unwrap();
        assert_eq!(code, ExitCode::from(1));
    }

    #[test]
    fn missing_sections_dir_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("structure.yaml"), STRUCTURE).unwrap();
        assert!(run(tmp.path().to_str().unwrap()).is_err());
    }
}
