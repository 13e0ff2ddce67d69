//! Song descriptor types.
//!
//! The descriptor (`.source/song.yaml`) is the single hand-written source of
//! truth for a song: metadata, arrangement order, per-section lyrics/chords
//! and notation snippets, and the instrument roster. Everything else in a
//! song directory is generated from it.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;

/// Top-level song descriptor, deserialized from `song.yaml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongSpec {
    /// Song metadata and arrangement order.
    pub song: SongMeta,

    /// Section definitions, keyed by section name.
    pub sections: BTreeMap<String, SectionSpec>,

    /// Instrument roster, keyed by instrument name.
    pub instruments: BTreeMap<String, InstrumentSpec>,

    /// Optional per-section arrangement notes (free text).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrangement: Option<BTreeMap<String, String>>,
}

/// Song metadata block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongMeta {
    /// Song title.
    pub title: String,

    /// Composer credit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,

    /// Tempo in beats per minute.
    pub tempo: u32,

    /// Time signature (e.g., "4/4").
    pub time: String,

    /// Key signature (e.g., "Cmin").
    pub key: String,

    /// Arrangement order: the sequence of section names to play.
    pub structure: Vec<String>,
}

/// One section of the song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Length of the section in bars.
    pub bars: u32,

    /// Whether the section carries vocals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocals: Option<bool>,

    /// Lyric blocks, keyed by lyric section name (e.g., "verse1").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<BTreeMap<String, Vec<LyricLine>>>,

    /// Per-instrument notation snippets for this section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instruments: Option<BTreeMap<String, SectionNotation>>,
}

/// One lyric line with its chord annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    /// The lyric text.
    pub line: String,

    /// Chords played over this line.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub chords: Vec<String>,
}

/// Notation for one instrument in one section.
///
/// Melodic instruments carry a single ABC snippet; percussion carries a map
/// of drum-part name (kick, snare, ...) to ABC snippet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionNotation {
    /// Single-voice ABC body for a melodic instrument.
    Melodic {
        /// The ABC music text (no headers).
        abc: String,
    },
    /// Drum-part name to ABC body for a percussion instrument.
    Drums(BTreeMap<String, String>),
}

/// One instrument in the roster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentSpec {
    /// General MIDI program number. Not meaningful for percussion.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<u32>,

    /// Whether this instrument is percussion (multi-voice, channel 10).
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub percussion: bool,
}

impl SongSpec {
    /// Parses a descriptor from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a descriptor from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Serializes the descriptor to YAML.
    pub fn to_yaml(&self) -> Result<String, SpecError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Composer credit, or a placeholder when unset.
    pub fn composer(&self) -> &str {
        self.song.composer.as_deref().unwrap_or("Unknown")
    }

    /// Returns true if the named instrument is percussion.
    pub fn is_percussion(&self, instrument: &str) -> bool {
        self.instruments
            .get(instrument)
            .map(|i| i.percussion)
            .unwrap_or(false)
    }

    /// Unique section names in arrangement order of first appearance.
    pub fn unique_sections(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for name in &self.song.structure {
            if !seen.contains(&name.as_str()) {
                seen.push(name.as_str());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const DESCRIPTOR: &str = r#"
song:
  title: Test Song
  composer: Test Composer
  tempo: 120
  time: 4/4
  key: C
  structure: [intro, verse, verse]
sections:
  intro:
    bars: 4
    instruments:
      bass:
        abc: "C8 | C8 | C8 | C8 |"
      drums:
        kick: "C4 C4 | C4 C4 | C4 C4 | C4 C4 |"
        snare: "z4 E4 | z4 E4 | z4 E4 | z4 E4 |"
  verse:
    bars: 8
    vocals: true
    lyrics:
      verse1:
        - line: First line of the verse
          chords: [C, G]
        - line: Second line of the verse
          chords: [Am, F]
instruments:
  bass:
    program: 33
  drums:
    percussion: true
"#;

    #[test]
    fn parses_full_descriptor() {
        let spec = SongSpec::from_yaml(DESCRIPTOR).unwrap();

        assert_eq!(spec.song.title, "Test Song");
        assert_eq!(spec.song.tempo, 120);
        assert_eq!(spec.song.structure, vec!["intro", "verse", "verse"]);
        assert_eq!(spec.sections.len(), 2);
        assert!(spec.is_percussion("drums"));
        assert!(!spec.is_percussion("bass"));
        assert_eq!(spec.instruments["bass"].program, Some(33));
    }

    #[test]
    fn melodic_and_drum_notation_variants() {
        let spec = SongSpec::from_yaml(DESCRIPTOR).unwrap();
        let intro = &spec.sections["intro"];
        let instruments = intro.instruments.as_ref().unwrap();

        match &instruments["bass"] {
            SectionNotation::Melodic { abc } => assert!(abc.starts_with("C8")),
            other => panic!("expected melodic notation, got {:?}", other),
        }
        match &instruments["drums"] {
            SectionNotation::Drums(parts) => {
                assert!(parts.contains_key("kick"));
                assert!(parts.contains_key("snare"));
            }
            other => panic!("expected drum notation, got {:?}", other),
        }
    }

    #[test]
    fn unique_sections_preserve_first_appearance_order() {
        let spec = SongSpec::from_yaml(DESCRIPTOR).unwrap();
        assert_eq!(spec.unique_sections(), vec!["intro", "verse"]);
    }

    #[test]
    fn yaml_round_trip() {
        let spec = SongSpec::from_yaml(DESCRIPTOR).unwrap();
        let yaml = spec.to_yaml().unwrap();
        let parsed = SongSpec::from_yaml(&yaml).unwrap();
        assert_eq!(spec, parsed);
    }

    #[test]
    fn composer_falls_back_when_unset() {
        let mut spec = SongSpec::from_yaml(DESCRIPTOR).unwrap();
        spec.song.composer = None;
        assert_eq!(spec.composer(), "Unknown");
    }
}
