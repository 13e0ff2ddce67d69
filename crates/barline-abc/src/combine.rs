//! Section combination.
//!
//! Stitches per-section ABC fragments into one complete per-instrument
//! track under a regenerated header. Percussion instruments interleave into
//! a two-voice file (kick on `V:1`, snare on `V:2`) on the MIDI percussion
//! channel; melodic instruments get a single voice with their MIDI program.

use std::path::{Path, PathBuf};

use crate::error::AbcResult;
use crate::line::{classify, LineKind};

/// MIDI program used for percussion voices.
const PERCUSSION_PROGRAM: u32 = 128;

/// MIDI channel reserved for percussion by convention.
const PERCUSSION_CHANNEL: u32 = 10;

/// Settings for one combined instrument track.
#[derive(Debug, Clone)]
pub struct TrackSettings {
    /// Song title.
    pub title: String,
    /// Composer credit.
    pub composer: String,
    /// Tempo in beats per minute.
    pub tempo: u32,
    /// Time signature.
    pub time: String,
    /// Key signature. Ignored for percussion, which is keyed `C perc`.
    pub key: String,
    /// General MIDI program number.
    pub midi_program: u32,
    /// Whether this track is percussion (two-voice output).
    pub percussion: bool,
}

/// Result of combining section fragments.
#[derive(Debug, Clone)]
pub struct CombineOutcome {
    /// The complete ABC text that was written.
    pub content: String,
    /// Fragment files that were referenced but missing. Skipped fragments
    /// leave the track short; the consistency checker surfaces that.
    pub missing: Vec<PathBuf>,
}

/// Combines section fragment files into a complete ABC file.
///
/// `sections` is the (section name, fragment path) list in arrangement
/// order. The combined text is written to `output` and returned. Missing
/// fragments are skipped, not fatal.
pub fn combine_sections(
    sections: &[(String, PathBuf)],
    output: &Path,
    settings: &TrackSettings,
) -> AbcResult<CombineOutcome> {
    let header = build_header(settings);

    let mut voice1_parts: Vec<String> = Vec::new();
    let mut voice2_parts: Vec<String> = Vec::new();
    let mut missing: Vec<PathBuf> = Vec::new();

    for (_name, fragment_path) in sections {
        if !fragment_path.exists() {
            missing.push(fragment_path.clone());
            continue;
        }
        let content = std::fs::read_to_string(fragment_path)?;

        if settings.percussion {
            let (v1, v2) = split_voices(&content);
            if !v1.is_empty() {
                voice1_parts.push(v1.join("\n"));
            }
            if !v2.is_empty() {
                voice2_parts.push(v2.join("\n"));
            }
        } else {
            voice1_parts.push(extract_music(&content).join("\n"));
        }
    }

    let mut full_content = header;
    full_content.push_str(&voice1_parts.join("\n"));

    if settings.percussion && !voice2_parts.is_empty() {
        full_content.push_str(&format!(
            "\nV:2 name=\"Snare\"\n%%MIDI program {}\n%%MIDI channel {}\n",
            PERCUSSION_PROGRAM, PERCUSSION_CHANNEL
        ));
        full_content.push_str(&voice2_parts.join("\n"));
    }

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, &full_content)?;

    Ok(CombineOutcome {
        content: full_content,
        missing,
    })
}

/// Builds the regenerated header block for a combined track.
fn build_header(settings: &TrackSettings) -> String {
    if settings.percussion {
        format!(
            "X:1\n\
             T:{} - Drums\n\
             C:{}\n\
             M:{}\n\
             L:1/8\n\
             Q:1/4={}\n\
             K:C perc\n\
             V:1 name=\"Kick\"\n\
             %%MIDI program {}\n\
             %%MIDI channel {}\n",
            settings.title,
            settings.composer,
            settings.time,
            settings.tempo,
            PERCUSSION_PROGRAM,
            PERCUSSION_CHANNEL
        )
    } else {
        format!(
            "X:1\n\
             T:{}\n\
             C:{}\n\
             M:{}\n\
             L:1/8\n\
             Q:1/4={}\n\
             K:{}\n\
             V:1\n\
             %%MIDI program {}\n",
            settings.title,
            settings.composer,
            settings.time,
            settings.tempo,
            settings.key,
            settings.midi_program
        )
    }
}

/// Extracts the music body of a single-voice fragment.
///
/// Music starts after the `K:` header line; header, lyric, comment and
/// directive lines are stripped so only music-bearing lines remain.
fn extract_music(content: &str) -> Vec<String> {
    let mut music = Vec::new();
    let mut in_music = false;

    for line in content.lines() {
        if !in_music {
            if line.trim_start().starts_with("K:") {
                in_music = true;
            }
            continue;
        }
        if classify(line) == LineKind::Music {
            music.push(line.trim().to_string());
        }
    }

    music
}

/// Splits a percussion fragment into voice-1 and voice-2 music lines.
///
/// Lines before any voice marker belong to voice 1. Voices above 2 are
/// bucketed with voice 2.
fn split_voices(content: &str) -> (Vec<String>, Vec<String>) {
    let mut v1 = Vec::new();
    let mut v2 = Vec::new();
    let mut current_voice = 1u32;

    for line in content.lines() {
        match classify(line) {
            LineKind::Voice(n) => current_voice = n,
            LineKind::Music => {
                if current_voice == 1 {
                    v1.push(line.trim().to_string());
                } else {
                    v2.push(line.trim().to_string());
                }
            }
            _ => {}
        }
    }

    (v1, v2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bars::count_bars;
    use pretty_assertions::assert_eq;

    fn melodic_settings() -> TrackSettings {
        TrackSettings {
            title: "Test Song".to_string(),
            composer: "Test Composer".to_string(),
            tempo: 120,
            time: "4/4".to_string(),
            key: "C".to_string(),
            midi_program: 33,
            percussion: false,
        }
    }

    fn drum_settings() -> TrackSettings {
        TrackSettings {
            percussion: true,
            ..melodic_settings()
        }
    }

    fn write(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn combines_melodic_sections_additively() {
        let tmp = tempfile::tempdir().unwrap();
        let intro = write(
            &tmp,
            "intro-bass.abc",
            "X:1\nT:Test\nM:4/4\nL:1/8\nK:C\nC8 | C8 |\n",
        );
        let verse = write(
            &tmp,
            "verse-bass.abc",
            "X:1\nT:Test\nM:4/4\nL:1/8\nK:C\nC4 D4 | E4 F4 | G4 A4 | B8 |\n",
        );

        let sections = vec![
            ("intro".to_string(), intro),
            ("verse".to_string(), verse),
        ];
        let output = tmp.path().join("bass.abc");
        let outcome = combine_sections(&sections, &output, &melodic_settings()).unwrap();

        assert!(output.exists());
        assert!(outcome.missing.is_empty());
        // 2 intro bars + 4 verse bars
        assert_eq!(count_bars(&outcome.content), 6);
        assert!(outcome.content.contains("T:Test Song"));
        assert!(outcome.content.contains("%%MIDI program 33"));
    }

    #[test]
    fn percussion_combines_into_two_voices() {
        let tmp = tempfile::tempdir().unwrap();
        let fragment = "X:1\nT:Test\nM:4/4\nL:1/8\nK:C perc\nV:1\nC4 C4 | C4 C4 |\nV:2\nz4 E4 | z4 E4 |\n";
        let intro = write(&tmp, "intro-drums.abc", fragment);
        let verse = write(&tmp, "verse-drums.abc", fragment);

        let sections = vec![
            ("intro".to_string(), intro),
            ("verse".to_string(), verse),
        ];
        let output = tmp.path().join("drums.abc");
        let outcome = combine_sections(&sections, &output, &drum_settings()).unwrap();

        assert!(outcome.content.contains("V:1 name=\"Kick\""));
        assert!(outcome.content.contains("V:2 name=\"Snare\""));
        assert!(outcome.content.contains("%%MIDI channel 10"));
        // Counted bars come from voice 1 only.
        assert_eq!(count_bars(&outcome.content), 4);
    }

    #[test]
    fn missing_fragments_are_skipped_and_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let intro = write(
            &tmp,
            "intro-bass.abc",
            "X:1\nM:4/4\nL:1/8\nK:C\nC8 | C8 |\n",
        );
        let ghost = tmp.path().join("verse-bass.abc");

        let sections = vec![
            ("intro".to_string(), intro),
            ("verse".to_string(), ghost.clone()),
        ];
        let output = tmp.path().join("bass.abc");
        let outcome = combine_sections(&sections, &output, &melodic_settings()).unwrap();

        assert_eq!(outcome.missing, vec![ghost]);
        assert_eq!(count_bars(&outcome.content), 2);
    }

    #[test]
    fn strips_lyric_comment_and_directive_lines() {
        let tmp = tempfile::tempdir().unwrap();
        let intro = write(
            &tmp,
            "intro-vocal.abc",
            "X:1\nM:4/4\nL:1/8\nK:C\n%%MIDI program 53\nC8 | C8 |\nw: la la\n% scratch note\n",
        );

        let sections = vec![("intro".to_string(), intro)];
        let output = tmp.path().join("vocal.abc");
        let outcome = combine_sections(&sections, &output, &melodic_settings()).unwrap();

        assert!(!outcome.content.contains("w: la la"));
        assert!(!outcome.content.contains("scratch note"));
        assert_eq!(count_bars(&outcome.content), 2);
    }

    #[test]
    fn extract_music_requires_key_header() {
        // Bodies only begin after K:, so a headerless snippet yields nothing.
        assert!(extract_music("C8 | C8 |\n").is_empty());
        assert_eq!(
            extract_music("K:C\nC8 | C8 |\n"),
            vec!["C8 | C8 |".to_string()]
        );
    }

    #[test]
    fn split_voices_buckets_by_marker() {
        let (v1, v2) = split_voices("V:1\nC8 |\nV:2\nz8 |\nV:1\nD8 |\n");
        assert_eq!(v1, vec!["C8 |", "D8 |"]);
        assert_eq!(v2, vec!["z8 |"]);
    }
}
