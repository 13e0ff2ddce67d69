//! Lyrics consistency checking.
//!
//! A song's lyrics exist in several generated forms — `lyrics.yaml`
//! (structured text), `chords.yaml` (chords + text), and `w:` lines in
//! vocal ABC files. This checker compares them after normalization and
//! reports any drift; `lyrics.yaml` is the source of truth.

use std::collections::BTreeMap;
use std::path::Path;

use regex::Regex;
use serde::Serialize;

use crate::error::LyricsError;

/// Consistency report for one song directory.
#[derive(Debug, Clone, Serialize)]
pub struct LyricsCheckReport {
    /// Name of the song directory.
    pub song_dir: String,
    /// Whether every checked source agreed.
    pub all_valid: bool,
    /// Files that were compared.
    pub files_checked: Vec<String>,
    /// Human-readable difference descriptions.
    pub errors: Vec<String>,
}

/// Normalizes text for comparison: lowercase, punctuation stripped,
/// whitespace collapsed.
pub fn normalize_text(text: &str) -> String {
    let mut cleaned = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() || c == '_' || c.is_whitespace() {
            cleaned.push(c);
        }
    }
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Extracts section name to lyric lines from `lyrics.yaml` or
/// `chords.yaml`.
///
/// Both formats are accepted: plain line lists, or lists of
/// `{chords, lyrics}` maps.
pub fn extract_lyrics_from_yaml(path: &Path) -> Result<BTreeMap<String, Vec<String>>, LyricsError> {
    let text = std::fs::read_to_string(path)?;
    let data: serde_yaml::Value = serde_yaml::from_str(&text)?;

    let mut sections = BTreeMap::new();
    let Some(mapping) = data.get("sections").and_then(|s| s.as_mapping()) else {
        return Ok(sections);
    };

    for (name, content) in mapping {
        let Some(name) = name.as_str() else { continue };
        let Some(items) = content.as_sequence() else {
            continue;
        };

        let lines: Vec<String> = items
            .iter()
            .filter_map(|item| {
                if let Some(text) = item.as_str() {
                    // lyrics.yaml format: plain strings
                    Some(text.to_string())
                } else {
                    // chords.yaml format: {chords, lyrics} maps
                    item.get("lyrics")
                        .and_then(|l| l.as_str())
                        .map(str::to_string)
                }
            })
            .collect();

        if !lines.is_empty() {
            sections.insert(name.to_string(), lines);
        }
    }

    Ok(sections)
}

/// Extracts lyric lines from a vocal ABC file's `w:` lines, joining
/// hyphenated syllables back into words.
pub fn extract_lyrics_from_abc(path: &Path) -> Result<Vec<String>, LyricsError> {
    let text = std::fs::read_to_string(path)?;
    let syllable_break = Regex::new(r"-\s+").expect("valid syllable break pattern");

    Ok(text
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            line.strip_prefix("w:")
                .map(|lyric| syllable_break.replace_all(lyric.trim(), "").to_string())
        })
        .collect())
}

/// Compares lyrics from two sources section by section.
///
/// Returns whether everything matched and the list of differences.
pub fn compare_lyrics(
    source1: &BTreeMap<String, Vec<String>>,
    source2: &BTreeMap<String, Vec<String>>,
    source1_name: &str,
    source2_name: &str,
) -> (bool, Vec<String>) {
    let mut differences = Vec::new();

    for (section, lines1) in source1 {
        let Some(lines2) = source2.get(section) else {
            differences.push(format!(
                "Section '{}' in {} but not in {}",
                section, source1_name, source2_name
            ));
            continue;
        };

        if lines1.len() != lines2.len() {
            differences.push(format!(
                "Section '{}': {} has {} lines, {} has {} lines",
                section,
                source1_name,
                lines1.len(),
                source2_name,
                lines2.len()
            ));
            continue;
        }

        for (i, (line1, line2)) in lines1.iter().zip(lines2).enumerate() {
            if normalize_text(line1) != normalize_text(line2) {
                differences.push(format!(
                    "Section '{}', line {}:\n  {}: {}\n  {}: {}",
                    section,
                    i + 1,
                    source1_name,
                    line1,
                    source2_name,
                    line2
                ));
            }
        }
    }

    for section in source2.keys() {
        if !source1.contains_key(section) {
            differences.push(format!(
                "Section '{}' in {} but not in {}",
                section, source2_name, source1_name
            ));
        }
    }

    (differences.is_empty(), differences)
}

/// Validates lyric consistency across all lyric-bearing files in a song
/// directory. `lyrics.yaml` must exist; `chords.yaml` is compared when
/// present.
pub fn validate_song_lyrics(song_dir: &Path) -> LyricsCheckReport {
    let mut report = LyricsCheckReport {
        song_dir: song_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        all_valid: true,
        files_checked: Vec::new(),
        errors: Vec::new(),
    };

    let lyrics_yaml = song_dir.join("lyrics.yaml");
    if !lyrics_yaml.exists() {
        report.all_valid = false;
        report
            .errors
            .push(format!("lyrics.yaml not found in {}", song_dir.display()));
        return report;
    }

    let lyrics_data = match extract_lyrics_from_yaml(&lyrics_yaml) {
        Ok(data) => {
            report.files_checked.push("lyrics.yaml".to_string());
            data
        }
        Err(e) => {
            report.all_valid = false;
            report.errors.push(format!("Error reading lyrics.yaml: {}", e));
            return report;
        }
    };

    let chords_yaml = song_dir.join("chords.yaml");
    if chords_yaml.exists() {
        match extract_lyrics_from_yaml(&chords_yaml) {
            Ok(chords_data) => {
                report.files_checked.push("chords.yaml".to_string());
                let (all_match, differences) =
                    compare_lyrics(&lyrics_data, &chords_data, "lyrics.yaml", "chords.yaml");
                if !all_match {
                    report.all_valid = false;
                    report.errors.extend(differences);
                }
            }
            Err(e) => {
                report.all_valid = false;
                report.errors.push(format!("Error reading chords.yaml: {}", e));
            }
        }
    }

    report
}
