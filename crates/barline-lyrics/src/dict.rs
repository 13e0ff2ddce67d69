//! Phonetic dictionary.
//!
//! Syllable counts, stress patterns and rhyming parts come from a
//! CMU-format pronouncing dictionary, consumed as external data. A small
//! embedded subset covers common lyric vocabulary; a full dictionary can
//! be loaded from disk with [`PhoneticDictionary::load`]. Words outside
//! the dictionary fall back to vowel-group counting.

use std::collections::HashMap;
use std::path::Path;

/// ARPABET vowel phones (stress digits stripped).
const VOWEL_PHONES: &[&str] = &[
    "AA", "AE", "AH", "AO", "AW", "AY", "EH", "ER", "EY", "IH", "IY", "OW", "OY", "UH", "UW",
];

/// A pronouncing dictionary mapping words to ARPABET phones.
///
/// Construct once at startup and pass by reference into analysis
/// functions.
pub struct PhoneticDictionary {
    entries: HashMap<String, Vec<String>>,
}

impl PhoneticDictionary {
    /// Builds the dictionary from the embedded subset.
    pub fn builtin() -> Self {
        Self::from_text(include_str!("../assets/cmudict.dict"))
    }

    /// Loads a CMU-format dictionary file from disk.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_text(&text))
    }

    /// Parses CMU-format text: `WORD  PH ON EH0 M Z` per line, `;;;`
    /// comments. Alternate pronunciations (`WORD(2)`) are ignored; the
    /// first pronunciation wins.
    pub fn from_text(text: &str) -> Self {
        let mut entries = HashMap::new();

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(";;;") {
                continue;
            }
            let mut parts = line.split_whitespace();
            let Some(word) = parts.next() else { continue };
            let word = match word.find('(') {
                Some(idx) => &word[..idx],
                None => word,
            };
            let phones: Vec<String> = parts.map(str::to_string).collect();
            if phones.is_empty() {
                continue;
            }
            entries
                .entry(word.to_lowercase())
                .or_insert(phones);
        }

        Self { entries }
    }

    /// Number of words in the dictionary.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// ARPABET phones for a word, if known.
    pub fn phones(&self, word: &str) -> Option<&[String]> {
        self.entries.get(&word.to_lowercase()).map(Vec::as_slice)
    }

    /// Returns true if the word has a dictionary entry.
    pub fn contains(&self, word: &str) -> bool {
        self.entries.contains_key(&word.to_lowercase())
    }

    /// Syllable count for a word: stressed-phone count from the
    /// dictionary, or the vowel-group fallback for unknown words.
    pub fn syllables(&self, word: &str) -> usize {
        if let Some(phones) = self.phones(word) {
            let count = phones
                .iter()
                .filter(|p| p.ends_with(|c: char| c.is_ascii_digit()))
                .count();
            if count > 0 {
                return count;
            }
        }
        fallback_syllables(word)
    }

    /// Stress digits for a word's syllables in order ("0", "1", "2"), if
    /// the word is known.
    pub fn stresses(&self, word: &str) -> Option<String> {
        self.phones(word).map(|phones| {
            phones
                .iter()
                .filter_map(|p| p.chars().last().filter(char::is_ascii_digit))
                .collect()
        })
    }

    /// The rhyming part of a word: phones from the last stressed vowel to
    /// the end. Unknown words fall back to their last three characters.
    pub fn rhyming_part(&self, word: &str) -> String {
        if let Some(phones) = self.phones(word) {
            let start = phones
                .iter()
                .rposition(|p| p.ends_with('1') || p.ends_with('2'))
                .unwrap_or(0);
            return phones[start..].join(" ");
        }

        let lower = word.to_lowercase();
        let tail = lower.len().saturating_sub(3);
        lower[tail..].to_string()
    }

    /// Returns true if the phone (stress stripped) is a vowel.
    pub fn is_vowel_phone(phone: &str) -> bool {
        let stripped: String = phone.chars().filter(|c| !c.is_ascii_digit()).collect();
        VOWEL_PHONES.contains(&stripped.as_str())
    }
}

/// Counts vowel groups as a syllable estimate: runs of `aeiouy`, minus a
/// silent trailing `e`, never less than one.
fn fallback_syllables(word: &str) -> usize {
    let word = word.to_lowercase();
    let mut count = 0usize;
    let mut in_group = false;
    for c in word.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if is_vowel && !in_group {
            count += 1;
        }
        in_group = is_vowel;
    }
    if word.ends_with('e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtin_dictionary_is_populated() {
        let dict = PhoneticDictionary::builtin();
        assert!(!dict.is_empty());
        assert!(dict.contains("moon"));
        assert!(dict.contains("MOON"));
    }

    #[test]
    fn syllable_counts_from_dictionary() {
        let dict = PhoneticDictionary::builtin();
        assert_eq!(dict.syllables("moon"), 1);
        assert_eq!(dict.syllables("table"), 2);
        assert_eq!(dict.syllables("beautiful"), 3);
        assert_eq!(dict.syllables("tonight"), 2);
    }

    #[test]
    fn syllable_fallback_for_unknown_words() {
        let dict = PhoneticDictionary::builtin();
        // Not in the subset: vowel groups decide.
        assert_eq!(dict.syllables("glorbim"), 2);
        assert_eq!(dict.syllables("zzt"), 1);
    }

    #[test]
    fn silent_e_is_discounted_in_fallback() {
        assert_eq!(fallback_syllables("glorbane"), 2);
        assert_eq!(fallback_syllables("e"), 1);
    }

    #[test]
    fn rhyming_parts_match_for_rhymes() {
        let dict = PhoneticDictionary::builtin();
        assert_eq!(dict.rhyming_part("moon"), dict.rhyming_part("soon"));
        assert_eq!(dict.rhyming_part("light"), dict.rhyming_part("night"));
        assert_eq!(dict.rhyming_part("fire"), dict.rhyming_part("desire"));
        assert_ne!(dict.rhyming_part("moon"), dict.rhyming_part("night"));
    }

    #[test]
    fn unknown_word_rhyme_falls_back_to_suffix() {
        let dict = PhoneticDictionary::builtin();
        assert_eq!(dict.rhyming_part("snorfle"), "fle");
    }

    #[test]
    fn stresses_come_from_phones() {
        let dict = PhoneticDictionary::builtin();
        assert_eq!(dict.stresses("tonight").as_deref(), Some("01"));
        assert_eq!(dict.stresses("moon").as_deref(), Some("1"));
        assert_eq!(dict.stresses("snorfle"), None);
    }

    #[test]
    fn alternate_pronunciations_are_skipped() {
        let dict = PhoneticDictionary::from_text("READ R IY1 D\nREAD(2) R EH1 D\n");
        assert_eq!(dict.len(), 1);
        assert_eq!(dict.phones("read").unwrap()[1], "IY1");
    }

    #[test]
    fn vowel_phone_check() {
        assert!(PhoneticDictionary::is_vowel_phone("AY1"));
        assert!(PhoneticDictionary::is_vowel_phone("UW"));
        assert!(!PhoneticDictionary::is_vowel_phone("K"));
        assert!(!PhoneticDictionary::is_vowel_phone("NG"));
    }
}
