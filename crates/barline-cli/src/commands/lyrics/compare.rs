//! Lyrics compare command implementation
//!
//! Analyzes a model song and candidate lyrics, ranks the candidates by
//! similarity to the model, and writes a JSON report.

use anyhow::{Context, Result};
use barline_lyrics::{full_analysis, similarity_score, Analysis, PosTagger, Similarity};
use colored::Colorize;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{load_dictionary, load_sheet};

/// Full comparison report.
#[derive(Serialize)]
struct CompareReport {
    model: ModelEntry,
    candidates: Vec<CandidateEntry>,
    ranking_summary: Vec<RankEntry>,
}

#[derive(Serialize)]
struct ModelEntry {
    file: String,
    analysis: Analysis,
}

#[derive(Serialize)]
struct CandidateEntry {
    file: String,
    rank: usize,
    similarity: Similarity,
    analysis: Analysis,
}

#[derive(Serialize)]
struct RankEntry {
    rank: usize,
    file: String,
    score: f64,
}

/// Run the lyrics compare command
///
/// # Arguments
/// * `model` - Model lyrics file
/// * `candidates` - Candidate lyrics files
/// * `output` - Output JSON path (default: comparison_report.json)
///
/// # Returns
/// Exit code: 0 on success, 1 on missing input
pub fn run(model: &str, candidates: &[String], output: Option<&str>) -> Result<ExitCode> {
    let model_path = Path::new(model);
    if !model_path.exists() {
        anyhow::bail!("Model file not found: {}", model);
    }
    let missing: Vec<&String> = candidates
        .iter()
        .filter(|c| !Path::new(c.as_str()).exists())
        .collect();
    if !missing.is_empty() {
        anyhow::bail!("Candidate files not found: {:?}", missing);
    }

    let dict = load_dictionary()?;
    let tagger = PosTagger::builtin();

    println!("{} {}", "Analyzing model:".cyan().bold(), model);
    let model_sheet = load_sheet(model_path)?;
    let model_analysis = full_analysis(&model_sheet, &dict, &tagger)
        .with_context(|| format!("Failed to analyze model: {}", model))?;

    let mut ranked: Vec<CandidateEntry> = Vec::new();
    for candidate in candidates {
        println!("{} {}", "Analyzing candidate:".cyan(), candidate);
        let sheet = load_sheet(Path::new(candidate))?;
        let analysis = full_analysis(&sheet, &dict, &tagger)
            .with_context(|| format!("Failed to analyze candidate: {}", candidate))?;
        let similarity = similarity_score(&model_analysis, &analysis);
        ranked.push(CandidateEntry {
            file: candidate.clone(),
            rank: 0,
            similarity,
            analysis,
        });
    }

    ranked.sort_by(|a, b| {
        b.similarity
            .total_score
            .partial_cmp(&a.similarity.total_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (i, entry) in ranked.iter_mut().enumerate() {
        entry.rank = i + 1;
    }

    let report = CompareReport {
        ranking_summary: ranked
            .iter()
            .map(|entry| RankEntry {
                rank: entry.rank,
                file: entry.file.clone(),
                score: entry.similarity.total_score,
            })
            .collect(),
        model: ModelEntry {
            file: model.to_string(),
            analysis: model_analysis,
        },
        candidates: ranked,
    };

    let output_path = match output {
        Some(path) => PathBuf::from(path),
        None => PathBuf::from("comparison_report.json"),
    };
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
    std::fs::write(&output_path, json)
        .with_context(|| format!("Failed to write: {}", output_path.display()))?;

    println!(
        "\n{} {}",
        "Comparison report written to:".green().bold(),
        output_path.display()
    );
    println!("\n{}", "Ranking (best match to model):".bold());
    println!("{}", "--------------------------------------------------".dimmed());
    for entry in &report.ranking_summary {
        let name = Path::new(&entry.file)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| entry.file.clone());
        println!("  #{}: {} (score: {:.3})", entry.rank, name, entry.score);
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_closer_candidate_first() {
        let tmp = tempfile::tempdir().unwrap();
        let model = tmp.path().join("model.txt");
        std::fs::write(
            &model,
            "/verse/\nthe fire in the night\nwe waited for the light\n/chorus/\nout past the moon\nshe will be there soon\n",
        )
        .unwrap();

        // Close: same structure and rhyme shape.
        let close = tmp.path().join("close.txt");
        std::fs::write(
            &close,
            "/verse/\nthe letter on the table tonight\nstill burning in the light\n/chorus/\nout under the moon\nwe will be there soon\n",
        )
        .unwrap();

        // Far: different structure, no rhymes.
        let far = tmp.path().join("far.txt");
        std::fs::write(&far, "/bridge/\nzyx glorb snerf\n").unwrap();

        let report = tmp.path().join("report.json");
        let code = run(
            model.to_str().unwrap(),
            &[
                far.to_str().unwrap().to_string(),
                close.to_str().unwrap().to_string(),
            ],
            Some(report.to_str().unwrap()),
        )
        .unwrap();
        assert_eq!(code, ExitCode::SUCCESS);

        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
        let first = parsed["ranking_summary"][0]["file"].as_str().unwrap();
        assert!(first.ends_with("close.txt"));
    }

    #[test]
    fn missing_candidate_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let model = tmp.path().join("model.txt");
        std::fs::write(&model, "/verse/\nsome line\n").unwrap();

        assert!(run(
            model.to_str().unwrap(),
            &["/nonexistent/candidate.txt".to_string()],
            None
        )
        .is_err());
    }
}
