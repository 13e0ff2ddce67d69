//! Part-of-speech tagging.
//!
//! The tagger is a lookup table over a bundled lexicon asset plus a few
//! suffix rules — a stand-in collaborator supplying coarse POS tags, the
//! same role a full NLP model plays in heavier pipelines. Words the
//! lexicon and suffixes cannot place default to nouns.

use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;

/// Coarse part-of-speech tags (Universal POS subset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum PosTag {
    /// Noun.
    Noun,
    /// Verb (including auxiliaries).
    Verb,
    /// Adjective.
    Adj,
    /// Adverb.
    Adv,
    /// Pronoun.
    Pron,
    /// Determiner or article.
    Det,
    /// Adposition (preposition).
    Adp,
    /// Conjunction.
    Conj,
    /// Numeral.
    Num,
    /// Interjection.
    Intj,
    /// Particle.
    Part,
}

impl PosTag {
    /// Returns the tag's string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Noun => "NOUN",
            PosTag::Verb => "VERB",
            PosTag::Adj => "ADJ",
            PosTag::Adv => "ADV",
            PosTag::Pron => "PRON",
            PosTag::Det => "DET",
            PosTag::Adp => "ADP",
            PosTag::Conj => "CONJ",
            PosTag::Num => "NUM",
            PosTag::Intj => "INTJ",
            PosTag::Part => "PART",
        }
    }

    fn from_str(s: &str) -> Option<Self> {
        match s {
            "NOUN" => Some(PosTag::Noun),
            "VERB" => Some(PosTag::Verb),
            "ADJ" => Some(PosTag::Adj),
            "ADV" => Some(PosTag::Adv),
            "PRON" => Some(PosTag::Pron),
            "DET" => Some(PosTag::Det),
            "ADP" => Some(PosTag::Adp),
            "CONJ" => Some(PosTag::Conj),
            "NUM" => Some(PosTag::Num),
            "INTJ" => Some(PosTag::Intj),
            "PART" => Some(PosTag::Part),
            _ => None,
        }
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lexicon-backed POS tagger.
///
/// Construct once at startup and pass by reference.
pub struct PosTagger {
    lexicon: HashMap<String, PosTag>,
}

impl PosTagger {
    /// Builds the tagger from the embedded lexicon asset.
    pub fn builtin() -> Self {
        Self::from_text(include_str!("../assets/pos_lexicon.tsv"))
    }

    /// Loads a lexicon from a TSV file of `word<TAB>TAG` lines.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    /// Parses lexicon text. Malformed lines are skipped.
    pub fn from_text(text: &str) -> Self {
        let mut lexicon = HashMap::new();
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.split_whitespace();
            let (Some(word), Some(tag)) = (parts.next(), parts.next()) else {
                continue;
            };
            if let Some(tag) = PosTag::from_str(tag) {
                lexicon.insert(word.to_lowercase(), tag);
            }
        }
        Self { lexicon }
    }

    /// Number of lexicon entries.
    pub fn len(&self) -> usize {
        self.lexicon.len()
    }

    /// Returns true if the lexicon is empty.
    pub fn is_empty(&self) -> bool {
        self.lexicon.is_empty()
    }

    /// Tags a single word: lexicon first, then suffix rules, then noun.
    pub fn tag(&self, word: &str) -> PosTag {
        let lower = word.to_lowercase();
        if let Some(tag) = self.lexicon.get(&lower) {
            return *tag;
        }
        if lower.chars().all(|c| c.is_ascii_digit()) {
            return PosTag::Num;
        }
        suffix_tag(&lower).unwrap_or(PosTag::Noun)
    }
}

/// Suffix heuristics for out-of-lexicon words.
fn suffix_tag(word: &str) -> Option<PosTag> {
    if word.len() < 4 {
        return None;
    }
    if word.ends_with("ly") {
        return Some(PosTag::Adv);
    }
    if word.ends_with("ing") || word.ends_with("ed") {
        return Some(PosTag::Verb);
    }
    if word.ends_with("tion")
        || word.ends_with("ness")
        || word.ends_with("ment")
        || word.ends_with("ship")
    {
        return Some(PosTag::Noun);
    }
    if word.ends_with("ous")
        || word.ends_with("ful")
        || word.ends_with("less")
        || word.ends_with("ive")
        || word.ends_with("able")
    {
        return Some(PosTag::Adj);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lexicon_is_populated() {
        let tagger = PosTagger::builtin();
        assert!(!tagger.is_empty());
        assert_eq!(tagger.tag("the"), PosTag::Det);
        assert_eq!(tagger.tag("she"), PosTag::Pron);
        assert_eq!(tagger.tag("whisper"), PosTag::Verb);
        assert_eq!(tagger.tag("river"), PosTag::Noun);
    }

    #[test]
    fn tagging_is_case_insensitive() {
        let tagger = PosTagger::builtin();
        assert_eq!(tagger.tag("The"), PosTag::Det);
        assert_eq!(tagger.tag("SHE"), PosTag::Pron);
    }

    #[test]
    fn suffix_rules_cover_unknown_words() {
        let tagger = PosTagger::builtin();
        assert_eq!(tagger.tag("glorbingly"), PosTag::Adv);
        assert_eq!(tagger.tag("glorbing"), PosTag::Verb);
        assert_eq!(tagger.tag("glorbness"), PosTag::Noun);
        assert_eq!(tagger.tag("glorbous"), PosTag::Adj);
        assert_eq!(tagger.tag("42"), PosTag::Num);
    }

    #[test]
    fn unknown_words_default_to_noun() {
        let tagger = PosTagger::builtin();
        assert_eq!(tagger.tag("zyx"), PosTag::Noun);
    }

    #[test]
    fn malformed_lexicon_lines_are_skipped() {
        let tagger = PosTagger::from_text("# comment\nword\nhouse NOUN\nbad TAGX\n");
        assert_eq!(tagger.len(), 1);
        assert_eq!(tagger.tag("house"), PosTag::Noun);
    }
}
