//! Lyrics critique command implementation
//!
//! Generates a structured judge prompt for external model evaluation.

use anyhow::{Context, Result};
use barline_lyrics::{full_taste_analysis, generate_critique_prompt, PosTagger, TasteLexicons};
use colored::Colorize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::load_sheet;

/// Run the lyrics critique command
///
/// # Arguments
/// * `input` - Lyrics file to critique
/// * `model` - Optional model lyrics for style comparison
/// * `output` - Output markdown path (default: input with `.critique.md`)
/// * `include_taste` - Embed computed taste metrics in the prompt
///
/// # Returns
/// Exit code: 0 on success, 1 on missing input
pub fn run(
    input: &str,
    model: Option<&str>,
    output: Option<&str>,
    include_taste: bool,
) -> Result<ExitCode> {
    let input_path = Path::new(input);
    let sheet = load_sheet(input_path)?;

    let model_sheet = match model {
        Some(path) => Some(load_sheet(Path::new(path))?),
        None => None,
    };

    let taste = if include_taste {
        println!("{}", "Computing taste metrics...".cyan());
        let lexicons = TasteLexicons::builtin();
        let tagger = PosTagger::builtin();
        Some(
            full_taste_analysis(&sheet, &lexicons, &tagger)
                .with_context(|| format!("Failed to analyze: {}", input))?,
        )
    } else {
        None
    };

    let prompt = generate_critique_prompt(&sheet, model_sheet.as_ref(), taste.as_ref());

    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => input_path.with_extension("critique.md"),
    };
    std::fs::write(&output_path, prompt)
        .with_context(|| format!("Failed to write: {}", output_path.display()))?;

    println!(
        "\n{} {}",
        "Critique prompt written to:".green().bold(),
        output_path.display()
    );
    println!("\n{}", "To use this prompt:".bold());
    println!("  1. Copy the contents of {}", output_path.display());
    println!("  2. Paste into your preferred LLM");
    println!("  3. The model will return structured JSON evaluation");
    println!("  4. Use the evaluation to guide revisions");
    if include_taste {
        println!("\n  {}", "Taste metrics included in prompt context.".dimmed());
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_critique_prompt() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("lyrics.txt");
        std::fs::write(&input, "/verse/\nthe kitchen light still burns\n").unwrap();

        let code = run(input.to_str().unwrap(), None, None, true).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let output = tmp.path().join("lyrics.critique.md");
        let prompt = std::fs::read_to_string(&output).unwrap();
        assert!(prompt.contains("LYRICS CRITIQUE REQUEST"));
        assert!(prompt.contains("AUTOMATED TASTE METRICS"));
        assert!(prompt.contains("the kitchen light still burns"));
    }

    #[test]
    fn missing_input_is_an_error() {
        assert!(run("/nonexistent/lyrics.txt", None, None, false).is_err());
    }
}
