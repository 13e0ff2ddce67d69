//! Song descriptor validation.

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::song::SongSpec;

/// Validates a song descriptor.
///
/// Errors block generation; warnings are advisory. This checks the
/// descriptor's internal consistency only — bar-count agreement between
/// authored notation and declared section lengths is the section tooling's
/// job, not the descriptor's.
pub fn validate_song(song: &SongSpec) -> ValidationResult {
    let mut result = ValidationResult::success();

    if song.sections.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoSections,
            "descriptor declares no sections",
            "sections",
        ));
    }

    if song.instruments.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::NoInstruments,
            "descriptor declares no instruments",
            "instruments",
        ));
    }

    if song.song.structure.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyStructure,
            "arrangement order is empty",
            "song.structure",
        ));
    }

    if song.song.tempo == 0 {
        result.add_error(ValidationError::with_path(
            ErrorCode::InvalidTempo,
            "tempo must be positive",
            "song.tempo",
        ));
    }

    for name in song.unique_sections() {
        if !song.sections.contains_key(name) {
            result.add_error(ValidationError::with_path(
                ErrorCode::UnknownSection,
                format!("arrangement references undefined section '{}'", name),
                "song.structure",
            ));
        }
    }

    for (name, section) in &song.sections {
        if section.bars == 0 {
            result.add_error(ValidationError::with_path(
                ErrorCode::ZeroBars,
                format!("section '{}' declares zero bars", name),
                format!("sections.{}.bars", name),
            ));
        }
        if !song.song.structure.iter().any(|s| s == name) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::UnusedSection,
                format!("section '{}' is defined but never arranged", name),
                format!("sections.{}", name),
            ));
        }
    }

    for (name, instrument) in &song.instruments {
        if !instrument.percussion && instrument.program.is_none() {
            result.add_error(ValidationError::with_path(
                ErrorCode::MissingProgram,
                format!("melodic instrument '{}' has no MIDI program", name),
                format!("instruments.{}.program", name),
            ));
        }

        let has_notation = song.sections.values().any(|s| {
            s.instruments
                .as_ref()
                .is_some_and(|m| m.contains_key(name))
        });
        if !has_notation {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::SilentInstrument,
                format!("instrument '{}' has no notation in any section", name),
                format!("instruments.{}", name),
            ));
        }
    }

    if song.song.composer.is_none() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::MissingComposer,
            "no composer credit",
            "song.composer",
        ));
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorCode, WarningCode};

    fn valid_descriptor() -> SongSpec {
        SongSpec::from_yaml(
            r#"
song:
  title: Valid
  composer: Someone
  tempo: 100
  time: 4/4
  key: C
  structure: [verse]
sections:
  verse:
    bars: 8
    instruments:
      bass:
        abc: "C8 |"
instruments:
  bass:
    program: 33
"#,
        )
        .unwrap()
    }

    #[test]
    fn valid_descriptor_passes() {
        let result = validate_song(&valid_descriptor());
        assert!(result.is_ok(), "errors: {:?}", result.errors);
        assert!(result.warnings.is_empty(), "warnings: {:?}", result.warnings);
    }

    #[test]
    fn arrangement_referencing_undefined_section_fails() {
        let mut song = valid_descriptor();
        song.song.structure.push("ghost".to_string());
        let result = validate_song(&song);
        assert!(!result.is_ok());
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnknownSection));
    }

    #[test]
    fn zero_bars_fails() {
        let mut song = valid_descriptor();
        song.sections.get_mut("verse").unwrap().bars = 0;
        let result = validate_song(&song);
        assert!(result.errors.iter().any(|e| e.code == ErrorCode::ZeroBars));
    }

    #[test]
    fn melodic_instrument_without_program_fails() {
        let mut song = valid_descriptor();
        song.instruments.get_mut("bass").unwrap().program = None;
        let result = validate_song(&song);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::MissingProgram));
    }

    #[test]
    fn percussion_without_program_is_fine() {
        let mut song = valid_descriptor();
        let bass = song.instruments.get_mut("bass").unwrap();
        bass.program = None;
        bass.percussion = true;
        let result = validate_song(&song);
        assert!(!result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::MissingProgram));
    }

    #[test]
    fn unused_section_and_silent_instrument_warn() {
        let mut song = valid_descriptor();
        song.sections.insert(
            "bridge".to_string(),
            crate::song::SectionSpec {
                bars: 4,
                vocals: None,
                lyrics: None,
                instruments: None,
            },
        );
        song.instruments.insert(
            "pad".to_string(),
            crate::song::InstrumentSpec {
                program: Some(89),
                percussion: false,
            },
        );
        let result = validate_song(&song);
        assert!(result.is_ok());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::UnusedSection));
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::SilentInstrument));
    }

    #[test]
    fn missing_composer_warns() {
        let mut song = valid_descriptor();
        song.song.composer = None;
        let result = validate_song(&song);
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::MissingComposer));
    }
}
