//! Quantitative lyric analysis.
//!
//! Rhyme-scheme labeling, meter detection, POS distribution, phonetic
//! features, vocabulary statistics and structure stats, computed per
//! section and overall. All scoring is lookup-table and counting work over
//! the phonetic dictionary and tagger collaborators.

use std::collections::{BTreeMap, HashMap, HashSet};

use regex::Regex;
use serde::Serialize;

use crate::dict::PhoneticDictionary;
use crate::error::LyricsError;
use crate::parse::LyricSheet;
use crate::tagger::{PosTag, PosTagger};

/// Splits text into word tokens (runs of alphanumerics and underscores).
pub(crate) fn tokenize(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for c in text.chars() {
        if c.is_alphanumeric() || c == '_' {
            current.push(c);
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Strips a trailing run of digits ("verse2" -> "verse").
pub(crate) fn strip_trailing_digits(name: &str) -> &str {
    name.trim_end_matches(|c: char| c.is_ascii_digit())
}

fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64
}

/// Recognized rhyme patterns within a scheme string.
#[derive(Debug, Clone, Serialize)]
pub struct RhymeTypes {
    /// AA / BB / ... pairs.
    pub couplet: bool,
    /// ABAB-style alternation.
    pub alternate: bool,
    /// ABBA-style enclosure.
    pub enclosed: bool,
    /// ABA BCB chaining.
    pub terza_rima: bool,
}

/// Rhyme-scheme analysis of a set of lines.
#[derive(Debug, Clone, Serialize)]
pub struct RhymeAnalysis {
    /// Per-line rhyme label (A, B, ..., X for unrhymable).
    pub scheme: Vec<String>,
    /// The labels joined into one string.
    pub scheme_string: String,
    /// Distinct rhyme sounds used.
    pub unique_rhymes: usize,
    /// Recognized patterns.
    pub rhyme_types: RhymeTypes,
    /// Fraction of lines carrying a rhyme label.
    pub rhyme_density: f64,
}

/// Labels the rhyme scheme of lines by suffix-matching their last words'
/// rhyming parts.
pub fn analyze_rhyme_scheme(lines: &[&str], dict: &PhoneticDictionary) -> RhymeAnalysis {
    let rhyme_parts: Vec<String> = lines
        .iter()
        .map(|line| {
            tokenize(line)
                .last()
                .map(|w| dict.rhyming_part(w))
                .unwrap_or_default()
        })
        .collect();

    let mut scheme: Vec<String> = Vec::new();
    let mut labels: HashMap<&str, char> = HashMap::new();
    let mut current = 'A';

    for part in &rhyme_parts {
        if part.is_empty() {
            scheme.push("X".to_string());
        } else if let Some(label) = labels.get(part.as_str()) {
            scheme.push(label.to_string());
        } else {
            labels.insert(part.as_str(), current);
            scheme.push(current.to_string());
            current = ((current as u8) + 1) as char;
            if current > 'Z' {
                current = 'A';
            }
        }
    }

    let scheme_string: String = scheme.concat();
    let terza = Regex::new("ABA.BCB").expect("valid terza rima pattern");
    let rhyme_types = RhymeTypes {
        couplet: ["AA", "BB", "CC", "DD"]
            .iter()
            .any(|p| scheme_string.contains(p)),
        alternate: ["ABAB", "CDCD"].iter().any(|p| scheme_string.contains(p)),
        enclosed: ["ABBA", "CDDC"].iter().any(|p| scheme_string.contains(p)),
        terza_rima: terza.is_match(&scheme_string),
    };

    let unique: HashSet<&String> = scheme.iter().filter(|s| s.as_str() != "X").collect();
    let x_count = scheme.iter().filter(|s| s.as_str() == "X").count();
    let rhyme_density = if scheme.is_empty() {
        0.0
    } else {
        1.0 - x_count as f64 / scheme.len() as f64
    };

    RhymeAnalysis {
        unique_rhymes: unique.len(),
        rhyme_types,
        rhyme_density,
        scheme_string,
        scheme,
    }
}

/// Metrical analysis of a set of lines.
#[derive(Debug, Clone, Serialize)]
pub struct MeterAnalysis {
    /// Per-line stress patterns ("0" unstressed, "1"/"2" stressed).
    pub patterns: Vec<String>,
    /// Per-line syllable counts.
    pub syllable_counts: Vec<usize>,
    /// Mean syllables per line.
    pub avg_syllables_per_line: f64,
    /// Variance of syllables per line.
    pub syllable_variance: f64,
    /// Most common detected meter.
    pub dominant_meter: String,
    /// Meter name to line count.
    pub meter_distribution: BTreeMap<String, usize>,
    /// Fraction of lines in the dominant meter.
    pub regularity: f64,
}

/// Analyzes metrical patterns: stress sequences from the dictionary, with
/// unknown words contributing unstressed syllables.
pub fn analyze_meter(lines: &[&str], dict: &PhoneticDictionary) -> MeterAnalysis {
    let mut patterns = Vec::new();
    let mut syllable_counts = Vec::new();

    for line in lines {
        let mut pattern = String::new();
        let mut syllables = 0usize;
        for word in tokenize(line) {
            match dict.stresses(&word) {
                Some(stresses) => {
                    syllables += stresses.len();
                    pattern.push_str(&stresses);
                }
                None => {
                    let count = dict.syllables(&word);
                    syllables += count;
                    pattern.push_str(&"0".repeat(count));
                }
            }
        }
        patterns.push(pattern);
        syllable_counts.push(syllables);
    }

    let meters: Vec<&'static str> = patterns.iter().map(|p| detect_meter(p)).collect();
    let mut meter_distribution: BTreeMap<String, usize> = BTreeMap::new();
    for meter in &meters {
        *meter_distribution.entry(meter.to_string()).or_insert(0) += 1;
    }

    // Dominant meter: highest count, first appearance breaking ties.
    let mut dominant = "unknown";
    let mut best = 0usize;
    for meter in &meters {
        let count = meter_distribution[*meter];
        if count > best {
            best = count;
            dominant = meter;
        }
    }

    let float_counts: Vec<f64> = syllable_counts.iter().map(|&c| c as f64).collect();
    let avg = if syllable_counts.is_empty() {
        0.0
    } else {
        float_counts.iter().sum::<f64>() / float_counts.len() as f64
    };
    let regularity = if meters.is_empty() {
        0.0
    } else {
        best as f64 / meters.len() as f64
    };

    MeterAnalysis {
        patterns,
        avg_syllables_per_line: avg,
        syllable_variance: variance(&float_counts),
        dominant_meter: dominant.to_string(),
        meter_distribution,
        regularity,
        syllable_counts,
    }
}

/// Names the closest classical meter for a stress pattern.
fn detect_meter(pattern: &str) -> &'static str {
    if pattern.is_empty() {
        return "unknown";
    }
    let simple: String = pattern
        .chars()
        .map(|c| if c == '1' || c == '2' { '1' } else { '0' })
        .collect();
    let bytes = simple.as_bytes();

    let count_feet = |foot: &[u8], step: usize| -> usize {
        let mut count = 0;
        let mut i = 0;
        while i + foot.len() <= bytes.len() {
            if &bytes[i..i + foot.len()] == foot {
                count += 1;
            }
            i += step;
        }
        count
    };

    let iambic = count_feet(b"01", 2);
    let trochaic = count_feet(b"10", 2);
    let dactylic = count_feet(b"100", 3);
    let anapestic = count_feet(b"001", 3);

    let max_meter = iambic.max(trochaic).max(dactylic).max(anapestic);
    if max_meter < 2 {
        return "free";
    }
    if iambic == max_meter {
        "iambic"
    } else if trochaic == max_meter {
        "trochaic"
    } else if dactylic == max_meter {
        "dactylic"
    } else {
        "anapestic"
    }
}

/// Part-of-speech analysis of a set of lines.
#[derive(Debug, Clone, Serialize)]
pub struct PosAnalysis {
    /// Tag name to token count.
    pub pos_distribution: BTreeMap<String, usize>,
    /// Noun token count.
    pub noun_count: usize,
    /// Verb token count.
    pub verb_count: usize,
    /// Adjective token count.
    pub adjective_count: usize,
    /// Adverb token count.
    pub adverb_count: usize,
    /// Nouns per verb.
    pub noun_verb_ratio: f64,
    /// Distinct nouns.
    pub unique_nouns: usize,
    /// Distinct verbs.
    pub unique_verbs: usize,
    /// Line count (each lyric line is treated as a sentence).
    pub sentence_count: usize,
    /// Mean words per line.
    pub avg_sentence_length: f64,
    /// Most frequent nouns with counts.
    pub top_nouns: Vec<(String, usize)>,
    /// Most frequent verbs with counts.
    pub top_verbs: Vec<(String, usize)>,
}

/// Tags every token and aggregates the distribution.
pub fn analyze_pos(lines: &[&str], tagger: &PosTagger) -> PosAnalysis {
    let mut distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut nouns: Vec<String> = Vec::new();
    let mut verbs: Vec<String> = Vec::new();
    let mut adjectives = 0usize;
    let mut adverbs = 0usize;
    let mut total_words = 0usize;

    for line in lines {
        for word in tokenize(line) {
            total_words += 1;
            let tag = tagger.tag(&word);
            *distribution.entry(tag.as_str().to_string()).or_insert(0) += 1;
            match tag {
                PosTag::Noun => nouns.push(word.to_lowercase()),
                PosTag::Verb => verbs.push(word.to_lowercase()),
                PosTag::Adj => adjectives += 1,
                PosTag::Adv => adverbs += 1,
                _ => {}
            }
        }
    }

    let noun_verb_ratio = if verbs.is_empty() {
        0.0
    } else {
        nouns.len() as f64 / verbs.len() as f64
    };
    let avg_sentence_length = if lines.is_empty() {
        0.0
    } else {
        total_words as f64 / lines.len() as f64
    };

    PosAnalysis {
        noun_count: nouns.len(),
        verb_count: verbs.len(),
        adjective_count: adjectives,
        adverb_count: adverbs,
        noun_verb_ratio,
        unique_nouns: nouns.iter().collect::<HashSet<_>>().len(),
        unique_verbs: verbs.iter().collect::<HashSet<_>>().len(),
        sentence_count: lines.len(),
        avg_sentence_length,
        top_nouns: top_counts(&nouns, 10),
        top_verbs: top_counts(&verbs, 10),
        pos_distribution: distribution,
    }
}

/// Most frequent items with counts, count descending then alphabetical.
fn top_counts(items: &[String], limit: usize) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for item in items {
        *counts.entry(item.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

/// Phonetic feature analysis of a set of lines.
#[derive(Debug, Clone, Serialize)]
pub struct PhoneticsAnalysis {
    /// Total phones across all dictionary-known words.
    pub total_phonemes: usize,
    /// Distinct phones (stress stripped).
    pub unique_phonemes: usize,
    /// Consonant phone count.
    pub consonant_count: usize,
    /// Vowel phone count.
    pub vowel_count: usize,
    /// Consonants per vowel.
    pub consonant_vowel_ratio: f64,
    /// Most frequent phones with counts.
    pub top_phonemes: Vec<(String, usize)>,
    /// Adjacent same-initial-sound word pairs.
    pub alliteration_count: usize,
}

/// Aggregates phoneme distribution, consonant/vowel balance, and
/// alliteration over dictionary-known words.
pub fn analyze_phonetics(lines: &[&str], dict: &PhoneticDictionary) -> PhoneticsAnalysis {
    let mut all_phonemes: Vec<String> = Vec::new();
    for line in lines {
        for word in tokenize(line) {
            if let Some(phones) = dict.phones(&word) {
                all_phonemes.extend(phones.iter().cloned());
            }
        }
    }

    let stripped: Vec<String> = all_phonemes
        .iter()
        .map(|p| p.chars().filter(|c| !c.is_ascii_digit()).collect())
        .collect();

    let vowel_count = all_phonemes
        .iter()
        .filter(|p| PhoneticDictionary::is_vowel_phone(p))
        .count();
    let consonant_count = all_phonemes.len() - vowel_count;
    let consonant_vowel_ratio = if vowel_count == 0 {
        0.0
    } else {
        consonant_count as f64 / vowel_count as f64
    };

    // Alliteration: adjacent dictionary-known words opening with the same
    // sound.
    let mut alliteration_count = 0usize;
    for line in lines {
        let initials: Vec<String> = tokenize(line)
            .iter()
            .filter_map(|w| dict.phones(w))
            .filter_map(|phones| phones.first())
            .map(|p| p.chars().filter(|c| !c.is_ascii_digit()).collect())
            .collect();
        for pair in initials.windows(2) {
            if !pair[0].is_empty() && pair[0] == pair[1] {
                alliteration_count += 1;
            }
        }
    }

    PhoneticsAnalysis {
        total_phonemes: all_phonemes.len(),
        unique_phonemes: stripped.iter().collect::<HashSet<_>>().len(),
        consonant_count,
        vowel_count,
        consonant_vowel_ratio,
        top_phonemes: top_counts(&stripped, 10),
        alliteration_count,
    }
}

/// Vocabulary richness analysis of a set of lines.
#[derive(Debug, Clone, Serialize)]
pub struct VocabularyAnalysis {
    /// Total word tokens.
    pub total_words: usize,
    /// Distinct words.
    pub unique_words: usize,
    /// Distinct words over total words.
    pub type_token_ratio: f64,
    /// Mean characters per word.
    pub avg_word_length: f64,
    /// Mean syllables per word.
    pub avg_syllables_per_word: f64,
    /// Words longer than eight characters.
    pub long_words: usize,
    /// Words of three or more syllables.
    pub polysyllabic_words: usize,
}

/// Vocabulary statistics over alphabetic tokens.
pub fn analyze_vocabulary(lines: &[&str], dict: &PhoneticDictionary) -> VocabularyAnalysis {
    let words: Vec<String> = lines
        .iter()
        .flat_map(|line| tokenize(line))
        .filter(|w| w.chars().all(char::is_alphabetic))
        .map(|w| w.to_lowercase())
        .collect();

    let syllable_counts: Vec<usize> = words.iter().map(|w| dict.syllables(w)).collect();
    let total = words.len();

    let (ttr, avg_len, avg_syl) = if total == 0 {
        (0.0, 0.0, 0.0)
    } else {
        (
            words.iter().collect::<HashSet<_>>().len() as f64 / total as f64,
            words.iter().map(String::len).sum::<usize>() as f64 / total as f64,
            syllable_counts.iter().sum::<usize>() as f64 / total as f64,
        )
    };

    VocabularyAnalysis {
        unique_words: words.iter().collect::<HashSet<_>>().len(),
        type_token_ratio: ttr,
        avg_word_length: avg_len,
        avg_syllables_per_word: avg_syl,
        long_words: words.iter().filter(|w| w.len() > 8).count(),
        polysyllabic_words: syllable_counts.iter().filter(|&&s| s >= 3).count(),
        total_words: total,
    }
}

/// Song-structure statistics.
#[derive(Debug, Clone, Serialize)]
pub struct StructureAnalysis {
    /// Number of sections.
    pub total_sections: usize,
    /// Distinct section types (numbering stripped), sorted.
    pub section_types: Vec<String>,
    /// Section names in order.
    pub section_order: Vec<String>,
    /// Lines per section.
    pub section_lengths: Vec<usize>,
    /// Mean lines per section.
    pub avg_section_length: f64,
    /// Whether any chorus exists.
    pub has_chorus: bool,
    /// Whether any bridge exists.
    pub has_bridge: bool,
    /// Chorus occurrences.
    pub chorus_count: usize,
    /// Verse occurrences.
    pub verse_count: usize,
}

/// Structure statistics for a sheet.
pub fn analyze_structure(sheet: &LyricSheet) -> StructureAnalysis {
    let types: Vec<&str> = sheet
        .sections
        .iter()
        .map(|s| strip_trailing_digits(&s.name))
        .collect();
    let lengths: Vec<usize> = sheet.sections.iter().map(|s| s.lines.len()).collect();
    let avg = if lengths.is_empty() {
        0.0
    } else {
        lengths.iter().sum::<usize>() as f64 / lengths.len() as f64
    };

    let mut unique_types: Vec<String> = types
        .iter()
        .collect::<HashSet<_>>()
        .into_iter()
        .map(|s| s.to_string())
        .collect();
    unique_types.sort();

    StructureAnalysis {
        total_sections: sheet.sections.len(),
        section_types: unique_types,
        section_order: sheet.section_order.clone(),
        section_lengths: lengths,
        avg_section_length: avg,
        has_chorus: types.contains(&"chorus"),
        has_bridge: types.contains(&"bridge"),
        chorus_count: types.iter().filter(|t| **t == "chorus").count(),
        verse_count: types.iter().filter(|t| **t == "verse").count(),
    }
}

/// Per-section analysis (rhyme and meter only).
#[derive(Debug, Clone, Serialize)]
pub struct SectionAnalysis {
    /// Section name.
    pub name: String,
    /// Lines in the section.
    pub line_count: usize,
    /// Section rhyme analysis.
    pub rhyme: RhymeAnalysis,
    /// Section meter analysis.
    pub meter: MeterAnalysis,
}

/// Overall analysis across all sections.
#[derive(Debug, Clone, Serialize)]
pub struct OverallAnalysis {
    /// Total lyric lines.
    pub total_lines: usize,
    /// Rhyme analysis.
    pub rhyme: RhymeAnalysis,
    /// Meter analysis.
    pub meter: MeterAnalysis,
    /// POS analysis.
    pub pos: PosAnalysis,
    /// Phonetic analysis.
    pub phonetics: PhoneticsAnalysis,
    /// Vocabulary analysis.
    pub vocabulary: VocabularyAnalysis,
    /// Structure analysis.
    pub structure: StructureAnalysis,
}

/// Complete quantitative analysis of a lyric sheet.
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    /// Whole-sheet metrics.
    pub overall: OverallAnalysis,
    /// Per-section metrics.
    pub sections: Vec<SectionAnalysis>,
}

/// Runs the full quantitative analysis over a sheet.
pub fn full_analysis(
    sheet: &LyricSheet,
    dict: &PhoneticDictionary,
    tagger: &PosTagger,
) -> Result<Analysis, LyricsError> {
    let all_lines = sheet.all_lines();
    if all_lines.is_empty() {
        return Err(LyricsError::EmptyLyrics);
    }

    let sections = sheet
        .sections
        .iter()
        .filter(|s| !s.lines.is_empty())
        .map(|s| {
            let lines: Vec<&str> = s.lines.iter().map(String::as_str).collect();
            SectionAnalysis {
                name: s.name.clone(),
                line_count: lines.len(),
                rhyme: analyze_rhyme_scheme(&lines, dict),
                meter: analyze_meter(&lines, dict),
            }
        })
        .collect();

    Ok(Analysis {
        overall: OverallAnalysis {
            total_lines: all_lines.len(),
            rhyme: analyze_rhyme_scheme(&all_lines, dict),
            meter: analyze_meter(&all_lines, dict),
            pos: analyze_pos(&all_lines, tagger),
            phonetics: analyze_phonetics(&all_lines, dict),
            vocabulary: analyze_vocabulary(&all_lines, dict),
            structure: analyze_structure(sheet),
        },
        sections,
    })
}
