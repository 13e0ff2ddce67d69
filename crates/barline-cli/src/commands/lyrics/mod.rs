//! Lyrics command group.
//!
//! Parsing, analysis, taste scoring, model comparison, critique prompt
//! generation, and cross-file consistency checks for song lyrics.

pub mod analyze;
pub mod check;
pub mod compare;
pub mod critique;
pub mod parse;
pub mod taste;

use anyhow::{Context, Result};
use barline_lyrics::{LyricParser, LyricSheet, PhoneticDictionary};
use std::path::Path;

/// Loads a lyric sheet from a structured YAML file or raw lyric text,
/// decided by extension.
pub(crate) fn load_sheet(path: &Path) -> Result<LyricSheet> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read: {}", path.display()))?;

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
            .with_context(|| format!("Failed to parse YAML: {}", path.display())),
        _ => Ok(LyricParser::new().parse(&text)),
    }
}

/// Builds the phonetic dictionary: the `BARLINE_CMUDICT` environment
/// variable can point at a full CMU dictionary file; the embedded subset
/// is the default.
pub(crate) fn load_dictionary() -> Result<PhoneticDictionary> {
    if let Ok(path) = std::env::var("BARLINE_CMUDICT") {
        let path = Path::new(&path);
        return PhoneticDictionary::load(path)
            .with_context(|| format!("Failed to load dictionary: {}", path.display()));
    }
    Ok(PhoneticDictionary::builtin())
}
