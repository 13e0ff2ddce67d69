//! Lyrics taste command implementation
//!
//! Computes the taste metrics and the weighted 0-100 score.

use anyhow::{Context, Result};
use barline_lyrics::{full_taste_analysis, PosTagger, TasteLexicons};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::load_sheet;

/// Run the lyrics taste command
///
/// # Arguments
/// * `input` - Lyrics file (structured YAML or raw text)
/// * `output` - Output JSON path (default: input with `.taste.json`)
///
/// # Returns
/// Exit code: 0 on success, 1 on missing/empty input
pub fn run(input: &str, output: Option<&str>) -> Result<ExitCode> {
    let input_path = Path::new(input);
    let sheet = load_sheet(input_path)?;

    let lexicons = TasteLexicons::builtin();
    let tagger = PosTagger::builtin();

    println!("{} {}", "Analyzing taste metrics:".cyan().bold(), input);
    let taste = full_taste_analysis(&sheet, &lexicons, &tagger)
        .with_context(|| format!("Failed to analyze: {}", input))?;

    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => input_path.with_extension("taste.json"),
    };
    let json = serde_json::to_string_pretty(&taste).context("Failed to serialize analysis")?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("Failed to write: {}", output_path.display()))?;

    println!(
        "\n{} {}",
        "Taste analysis written to:".green().bold(),
        output_path.display()
    );
    println!("\n{}", "==================================================".cyan());
    println!(
        "{} {:.1}/100",
        "OVERALL TASTE SCORE:".cyan().bold(),
        taste.overall_taste_score
    );
    println!("{}", "==================================================".cyan());

    let scores = &taste.component_scores;
    println!("\n{}", "Component Scores:".bold());
    println!("  Concreteness:     {:5.1}/100", scores.concreteness);
    println!("  Cliché-Free:      {:5.1}/100", scores.cliche_free);
    println!("  Show Don't Tell:  {:5.1}/100", scores.show_dont_tell);
    println!("  Sensory Richness: {:5.1}/100", scores.sensory_richness);

    println!("\n{}", "Recommendations:".bold());
    for rec in &taste.recommendations {
        println!("  - {}", rec);
    }

    Ok(ExitCode::SUCCESS)
}
