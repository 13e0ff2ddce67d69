//! Model comparison.
//!
//! Scores how closely a candidate's analysis resembles a model song's,
//! component by component, and combines the components with fixed weights
//! into a 0-1 similarity score.

use std::collections::BTreeMap;
use std::collections::HashSet;

use serde::Serialize;

use crate::analysis::Analysis;

/// Component weights for the total similarity score.
const WEIGHTS: &[(&str, f64)] = &[
    ("meter_match", 0.20),
    ("syllable_similarity", 0.15),
    ("rhyme_density_similarity", 0.15),
    ("vocabulary_similarity", 0.10),
    ("structure_similarity", 0.15),
    ("pos_similarity", 0.10),
    ("phonetic_similarity", 0.15),
];

/// Similarity between a candidate and the model.
#[derive(Debug, Clone, Serialize)]
pub struct Similarity {
    /// Per-component scores in 0-1.
    pub component_scores: BTreeMap<String, f64>,
    /// Weighted total in 0-1.
    pub total_score: f64,
    /// Upper bound of the total (always 1.0).
    pub max_possible: f64,
}

/// Relative closeness of two positive quantities, clamped to 0-1.
fn relative_similarity(model: f64, candidate: f64) -> f64 {
    if model <= 0.0 {
        return if candidate == 0.0 { 1.0 } else { 0.0 };
    }
    let diff = ((model - candidate) / model).abs().min(1.0);
    (1.0 - diff).max(0.0)
}

/// Computes the weighted similarity between a model and candidate
/// analysis.
pub fn similarity_score(model: &Analysis, candidate: &Analysis) -> Similarity {
    let mut scores = BTreeMap::new();

    let model_overall = &model.overall;
    let cand_overall = &candidate.overall;

    // Meter
    let meter_match = if model_overall.meter.dominant_meter == cand_overall.meter.dominant_meter {
        1.0
    } else {
        0.0
    };
    scores.insert("meter_match".to_string(), meter_match);
    scores.insert(
        "syllable_similarity".to_string(),
        relative_similarity(
            model_overall.meter.avg_syllables_per_line,
            cand_overall.meter.avg_syllables_per_line,
        ),
    );

    // Rhyme
    scores.insert(
        "rhyme_density_similarity".to_string(),
        relative_similarity(
            model_overall.rhyme.rhyme_density,
            cand_overall.rhyme.rhyme_density,
        ),
    );

    // Vocabulary
    scores.insert(
        "vocabulary_similarity".to_string(),
        relative_similarity(
            model_overall.vocabulary.type_token_ratio,
            cand_overall.vocabulary.type_token_ratio,
        ),
    );

    // Structure: shared section types over the model's
    let model_sections: HashSet<&str> = model_overall
        .structure
        .section_types
        .iter()
        .map(String::as_str)
        .collect();
    let cand_sections: HashSet<&str> = cand_overall
        .structure
        .section_types
        .iter()
        .map(String::as_str)
        .collect();
    let structure_similarity = if model_sections.is_empty() {
        0.0
    } else {
        model_sections.intersection(&cand_sections).count() as f64 / model_sections.len() as f64
    };
    scores.insert("structure_similarity".to_string(), structure_similarity);

    // POS balance
    scores.insert(
        "pos_similarity".to_string(),
        relative_similarity(
            model_overall.pos.noun_verb_ratio,
            cand_overall.pos.noun_verb_ratio,
        ),
    );

    // Phonetics
    scores.insert(
        "phonetic_similarity".to_string(),
        relative_similarity(
            model_overall.phonetics.consonant_vowel_ratio,
            cand_overall.phonetics.consonant_vowel_ratio,
        ),
    );

    let total_score = WEIGHTS
        .iter()
        .map(|(name, weight)| scores.get(*name).copied().unwrap_or(0.0) * weight)
        .sum();

    Similarity {
        component_scores: scores,
        total_score,
        max_possible: 1.0,
    }
}
