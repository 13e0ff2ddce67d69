//! Structure mirror types.
//!
//! `structure.yaml` is the generated, flattened view of a song used by the
//! section tooling: metadata, per-section bar counts, arrangement order, and
//! the instrument roster. It can be hand-written for songs that are authored
//! section file by section file, or generated from a full descriptor.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SpecError;
use crate::song::{InstrumentSpec, SongSpec};

/// Conventional bar counts for common section types, used when the structure
/// file does not declare sections explicitly.
const DEFAULT_SECTION_BARS: &[(&str, u32)] = &[
    ("intro", 4),
    ("verse", 8),
    ("chorus", 8),
    ("bridge", 4),
    ("break", 4),
    ("outro", 5),
    ("instrumental", 4),
    ("solo", 8),
];

/// Fallback bar count for section names with no conventional default.
const FALLBACK_SECTION_BARS: u32 = 8;

/// One section entry in the structure file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBars {
    /// Section name.
    pub name: String,
    /// Length in bars.
    pub bars: u32,
    /// Whether the section carries vocals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vocals: Option<bool>,
}

/// The structure file: song metadata plus the section/instrument layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    /// Song title.
    pub title: String,

    /// Composer credit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub composer: Option<String>,

    /// Tempo in beats per minute.
    pub tempo: u32,

    /// Time signature.
    pub time: String,

    /// Key signature.
    pub key: String,

    /// Explicit per-section bar counts. When absent, conventional defaults
    /// apply to the names appearing in `structure`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections: Option<Vec<SectionBars>>,

    /// Arrangement order.
    pub structure: Vec<String>,

    /// Instrument roster.
    #[serde(default)]
    pub instruments: BTreeMap<String, InstrumentSpec>,
}

impl Structure {
    /// Parses a structure from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SpecError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Loads a structure from a YAML file.
    pub fn from_yaml_file(path: &Path) -> Result<Self, SpecError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Serializes the structure to YAML.
    pub fn to_yaml(&self) -> Result<String, SpecError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Generates the structure mirror from a full song descriptor.
    ///
    /// Fails when the arrangement references a section the descriptor does
    /// not define.
    pub fn from_song(song: &SongSpec) -> Result<Self, SpecError> {
        let mut sections = Vec::new();
        for name in song.unique_sections() {
            let spec = song
                .sections
                .get(name)
                .ok_or_else(|| SpecError::UnknownSection(name.to_string()))?;
            sections.push(SectionBars {
                name: name.to_string(),
                bars: spec.bars,
                vocals: spec.vocals,
            });
        }

        Ok(Self {
            title: song.song.title.clone(),
            composer: song.song.composer.clone(),
            tempo: song.song.tempo,
            time: song.song.time.clone(),
            key: song.song.key.clone(),
            sections: Some(sections),
            structure: song.song.structure.clone(),
            instruments: song.instruments.clone(),
        })
    }

    /// Expected bar count for a section.
    ///
    /// Looks up the explicit section list when present; otherwise falls back
    /// to the conventional defaults for names appearing in the arrangement.
    pub fn section_bars(&self, name: &str) -> Result<u32, SpecError> {
        if let Some(sections) = &self.sections {
            return sections
                .iter()
                .find(|s| s.name == name)
                .map(|s| s.bars)
                .ok_or_else(|| SpecError::UnknownSection(name.to_string()));
        }

        if !self.structure.iter().any(|s| s == name) {
            return Err(SpecError::UnknownSection(name.to_string()));
        }

        Ok(DEFAULT_SECTION_BARS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, bars)| *bars)
            .unwrap_or(FALLBACK_SECTION_BARS))
    }

    /// Instrument names in roster order.
    pub fn instrument_names(&self) -> Vec<&str> {
        self.instruments.keys().map(String::as_str).collect()
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
        for name in &self.structure {
            if !seen.contains(&name.as_str()) {
                seen.push(name.as_str());
            }
        }
        seen
    }

    /// Composer credit, or a placeholder when unset.
    pub fn composer(&self) -> &str {
        self.composer.as_deref().unwrap_or("Unknown")
    }
}
