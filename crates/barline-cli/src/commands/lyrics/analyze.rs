//! Lyrics analyze command implementation
//!
//! Quantitative analysis: rhyme, meter, POS, phonetics, vocabulary,
//! structure. Writes a JSON report and prints a summary.

use anyhow::{Context, Result};
use barline_lyrics::{full_analysis, PosTagger};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{load_dictionary, load_sheet};

/// Run the lyrics analyze command
///
/// # Arguments
/// * `input` - Lyrics file (structured YAML or raw text)
/// * `output` - Output JSON path (default: input with `.analysis.json`)
///
/// # Returns
/// Exit code: 0 on success, 1 on missing/empty input
pub fn run(input: &str, output: Option<&str>) -> Result<ExitCode> {
    let input_path = Path::new(input);
    let sheet = load_sheet(input_path)?;

    let dict = load_dictionary()?;
    let tagger = PosTagger::builtin();

    println!("{} {}", "Analyzing:".cyan().bold(), input);
    let analysis = full_analysis(&sheet, &dict, &tagger)
        .with_context(|| format!("Failed to analyze: {}", input))?;

    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => input_path.with_extension("analysis.json"),
    };
    let json = serde_json::to_string_pretty(&analysis).context("Failed to serialize analysis")?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("Failed to write: {}", output_path.display()))?;

    let overall = &analysis.overall;
    println!(
        "\n{} {}",
        "Analysis written to:".green().bold(),
        output_path.display()
    );
    println!("\n{}", "Summary:".bold());
    println!("  {} {}", "Total lines:".dimmed(), overall.total_lines);
    println!(
        "  {} {}",
        "Dominant meter:".dimmed(),
        overall.meter.dominant_meter
    );
    println!(
        "  {} {:.1}",
        "Avg syllables/line:".dimmed(),
        overall.meter.avg_syllables_per_line
    );
    let scheme = &overall.rhyme.scheme_string;
    let preview: String = scheme.chars().take(20).collect();
    println!("  {} {}", "Rhyme scheme:".dimmed(), preview);
    println!(
        "  {} {:.2}",
        "Rhyme density:".dimmed(),
        overall.rhyme.rhyme_density
    );
    println!(
        "  {} {:.2}",
        "Vocabulary richness (TTR):".dimmed(),
        overall.vocabulary.type_token_ratio
    );
    println!(
        "  {} {}",
        "Total words:".dimmed(),
        overall.vocabulary.total_words
    );

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_analysis_json() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("lyrics.txt");
        std::fs::write(
            &input,
            "/verse/\nthe fire in the night\nwe waited for the light\n",
        )
        .unwrap();

        let code = run(input.to_str().unwrap(), None).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let output = tmp.path().join("lyrics.analysis.json");
        assert!(output.exists());
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(parsed["overall"]["total_lines"], 2);
    }

    #[test]
    fn empty_input_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("empty.txt");
        std::fs::write(&input, "").unwrap();
        assert!(run(input.to_str().unwrap(), None).is_err());
    }
}
