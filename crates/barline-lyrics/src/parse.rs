//! Raw lyric text parsing.
//!
//! Turns pasted, chord-annotated lyric text into a structured sheet of
//! named sections. Section headings are detected by pattern, chord
//! annotations and tab lines are stripped, and repeated section types are
//! numbered (`verse1`, `verse2`, ...).

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// A parsed lyric sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricSheet {
    /// Sections in order of appearance.
    pub sections: Vec<LyricSection>,
    /// Section names in order of appearance.
    pub section_order: Vec<String>,
}

impl LyricSheet {
    /// All lyric lines across sections, flattened in order.
    pub fn all_lines(&self) -> Vec<&str> {
        self.sections
            .iter()
            .flat_map(|s| s.lines.iter().map(String::as_str))
            .collect()
    }
}

/// One named section of lyrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricSection {
    /// Section name, numbered (e.g. "verse1", "chorus2").
    pub name: String,
    /// Cleaned lyric lines.
    pub lines: Vec<String>,
}

/// Heading patterns recognized as section markers, tried in order.
const SECTION_PATTERNS: &[(&str, &str)] = &[
    (r"^verse\s*(\d+)?", "verse"),
    (r"^v\s*(\d+)", "verse"),
    (r"^chorus\s*(\d+)?", "chorus"),
    (r"^c\s*(\d+)", "chorus"),
    (r"^pre-?chorus\s*(\d+)?", "prechorus"),
    (r"^bridge\s*(\d+)?", "bridge"),
    (r"^outro\s*(\d+)?", "outro"),
    (r"^intro\s*(\d+)?", "intro"),
    (r"^hook\s*(\d+)?", "hook"),
    (r"^refrain\s*(\d+)?", "refrain"),
    (r"^interlude\s*(\d+)?", "interlude"),
    (r"^solo\s*(\d+)?", "solo"),
    (r"^coda\s*(\d+)?", "coda"),
    (r"^tag\s*(\d+)?", "tag"),
];

/// Lyric text parser with its compiled patterns.
///
/// Construct once at startup and pass by reference; the parser holds no
/// other state.
pub struct LyricParser {
    chord_annotation: Regex,
    tab_line: Regex,
    chord_word: Regex,
    brackets: Regex,
    trailing_digits: Regex,
    sections: Vec<(Regex, &'static str)>,
}

impl Default for LyricParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LyricParser {
    /// Builds the parser, compiling all heading and cleanup patterns.
    pub fn new() -> Self {
        Self {
            // Chord annotations like [Am], (G7), or a leading chord name.
            chord_annotation: Regex::new(
                r"(?i)\[[\w#b/]+\]|\([\w#b/]+\)|^[A-G][#b]?(?:m|maj|min|dim|aug|sus|add|7|9|11|13)*[/\w]*\s*:?\s*",
            )
            .expect("valid chord annotation pattern"),
            tab_line: Regex::new(r"^[\s\-|x0-9]+$").expect("valid tab line pattern"),
            chord_word: Regex::new(r"(?i)^[A-G][#b]?(?:m|maj|min|dim|aug|sus|add|7|9|11|13)*$")
                .expect("valid chord word pattern"),
            brackets: Regex::new(r"[\[\](){}]").expect("valid bracket pattern"),
            trailing_digits: Regex::new(r"\d+$").expect("valid digit pattern"),
            sections: SECTION_PATTERNS
                .iter()
                .map(|(pattern, name)| {
                    (
                        Regex::new(pattern).expect("valid section pattern"),
                        *name,
                    )
                })
                .collect(),
        }
    }

    /// Removes chord annotations and normalizes a lyric line.
    ///
    /// Returns an empty string for lines that are tabs or mostly chords.
    pub fn clean_line(&self, line: &str) -> String {
        let line = self.chord_annotation.replace_all(line, "");

        if self.tab_line.is_match(&line) {
            return String::new();
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        if !words.is_empty() {
            let chord_like = words
                .iter()
                .filter(|w| self.chord_word.is_match(w))
                .count();
            if chord_like as f64 / words.len() as f64 > 0.5 {
                return String::new();
            }
        }

        words.join(" ")
    }

    /// Detects whether a line is a section marker, returning its name.
    pub fn detect_section_marker(&self, line: &str) -> Option<String> {
        let line_lower = line.to_lowercase();
        let line_clean = self.brackets.replace_all(line_lower.trim(), "");
        let line_clean = line_clean.trim();

        for (pattern, section_type) in &self.sections {
            if let Some(caps) = pattern.captures(line_clean) {
                let num = caps.get(1).map(|m| m.as_str()).unwrap_or("");
                return Some(format!("{}{}", section_type, num));
            }
        }

        // "/name/" delimiter form
        if line_clean.starts_with('/') || line_clean.ends_with('/') {
            let name = line_clean.trim_matches('/').trim();
            if !name.is_empty() {
                return Some(name.replace(' ', "-"));
            }
        }

        None
    }

    /// Parses raw lyric text into a structured sheet.
    ///
    /// Unsectioned input becomes a single `verse1` section. Unnumbered
    /// repeated markers are numbered per base type in order of appearance.
    pub fn parse(&self, input: &str) -> LyricSheet {
        let mut sheet = LyricSheet {
            sections: Vec::new(),
            section_order: Vec::new(),
        };

        let mut current_section: Option<String> = None;
        let mut current_lines: Vec<String> = Vec::new();
        let mut section_counts: HashMap<String, u32> = HashMap::new();

        for raw in input.lines() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if let Some(marker) = self.detect_section_marker(line) {
                if let Some(name) = current_section.take() {
                    if !current_lines.is_empty() {
                        sheet.section_order.push(name.clone());
                        sheet.sections.push(LyricSection {
                            name,
                            lines: std::mem::take(&mut current_lines),
                        });
                    }
                }
                current_lines.clear();

                let base = self.trailing_digits.replace(&marker, "").to_string();
                let count = section_counts.entry(base).or_insert(0);
                *count += 1;
                let numbered = if self.trailing_digits.is_match(&marker) {
                    marker
                } else {
                    format!("{}{}", marker, count)
                };
                current_section = Some(numbered);
                continue;
            }

            let cleaned = self.clean_line(line);
            if !cleaned.is_empty() {
                current_lines.push(cleaned);
            }
        }

        if let Some(name) = current_section {
            if !current_lines.is_empty() {
                sheet.section_order.push(name.clone());
                sheet.sections.push(LyricSection {
                    name,
                    lines: current_lines,
                });
            }
        } else if sheet.sections.is_empty() {
            // No markers at all: one implicit verse.
            let lines: Vec<String> = input
                .lines()
                .map(|l| self.clean_line(l.trim()))
                .filter(|l| !l.is_empty())
                .collect();
            if !lines.is_empty() {
                sheet.section_order.push("verse1".to_string());
                sheet.sections.push(LyricSection {
                    name: "verse1".to_string(),
                    lines,
                });
            }
        }

        sheet
    }
}
