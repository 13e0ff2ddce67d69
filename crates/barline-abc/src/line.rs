//! ABC line classification.
//!
//! Every line-oriented pass over ABC text (bar counting, fragment
//! stripping, voice splitting) starts from the same classifier so the
//! prefix rules live in exactly one place.

/// The kind of a single line of ABC text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace-only line.
    Blank,
    /// Information field line: one of `X: T: C: M: L: Q: K:`.
    Header,
    /// Aligned lyric line (`w:`).
    Lyric,
    /// Comment line (`%` but not `%%`).
    Comment,
    /// Directive line (`%%...`), e.g. `%%MIDI program 33`.
    Directive,
    /// Voice marker (`V:<n>`), carrying the declared voice number.
    /// A marker without a parseable number is `Voice(0)`.
    Voice(u32),
    /// Anything else: a music line.
    Music,
}

/// Header tags the tooling recognizes. Other information fields (`P:`,
/// `N:`, ...) are never emitted by the generators and fall through as
/// music lines, matching the counting contract.
const HEADER_TAGS: &[u8] = b"XTCMLQK";

/// Classifies one line of ABC text. Leading/trailing whitespace is ignored.
pub fn classify(line: &str) -> LineKind {
    let line = line.trim();
    if line.is_empty() {
        return LineKind::Blank;
    }

    let bytes = line.as_bytes();

    if bytes[0] == b'%' {
        if bytes.len() >= 2 && bytes[1] == b'%' {
            return LineKind::Directive;
        }
        return LineKind::Comment;
    }

    if bytes.len() >= 2 && bytes[1] == b':' {
        match bytes[0] {
            b'V' => return LineKind::Voice(parse_voice_number(&line[2..])),
            b'w' => return LineKind::Lyric,
            tag if HEADER_TAGS.contains(&tag) => return LineKind::Header,
            _ => {}
        }
    }

    LineKind::Music
}

/// Returns true for `%%MIDI ...` directives.
pub fn is_midi_directive(line: &str) -> bool {
    line.trim().starts_with("%%MIDI")
}

fn parse_voice_number(rest: &str) -> u32 {
    let digits: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}
