//! Taste metrics.
//!
//! Computable proxies for lyrical quality: concreteness of vocabulary,
//! cliché density, showing-versus-telling verb balance, and sensory
//! variety, combined into a weighted 0-100 score. All four are lookups
//! against fixed tables shipped as data assets.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::analysis::tokenize;
use crate::error::LyricsError;
use crate::parse::LyricSheet;
use crate::tagger::{PosTag, PosTagger};

/// Fixed lookup tables backing the taste metrics.
///
/// Construct once at startup (embedded assets) and pass by reference.
pub struct TasteLexicons {
    concreteness: HashMap<String, f64>,
    cliches: Vec<String>,
    state_verbs: HashSet<String>,
    strong_verbs: HashSet<String>,
    sensory: BTreeMap<String, HashSet<String>>,
}

impl TasteLexicons {
    /// Builds the lexicons from the embedded assets.
    pub fn builtin() -> Self {
        Self {
            concreteness: parse_scored_words(include_str!("../assets/concreteness.tsv")),
            cliches: parse_phrases(include_str!("../assets/cliches.txt")),
            state_verbs: parse_word_set(include_str!("../assets/state_verbs.txt")),
            strong_verbs: parse_word_set(include_str!("../assets/strong_verbs.txt")),
            sensory: parse_sense_words(include_str!("../assets/sensory_words.tsv")),
        }
    }

    /// Concreteness rating for a word, if rated.
    pub fn concreteness(&self, word: &str) -> Option<f64> {
        self.concreteness.get(word).copied()
    }
}

fn data_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
}

fn parse_scored_words(text: &str) -> HashMap<String, f64> {
    data_lines(text)
        .filter_map(|line| {
            let mut parts = line.split_whitespace();
            let word = parts.next()?;
            let score: f64 = parts.next()?.parse().ok()?;
            Some((word.to_lowercase(), score))
        })
        .collect()
}

fn parse_phrases(text: &str) -> Vec<String> {
    data_lines(text).map(|l| l.to_lowercase()).collect()
}

fn parse_word_set(text: &str) -> HashSet<String> {
    data_lines(text)
        .flat_map(str::split_whitespace)
        .map(|w| w.to_lowercase())
        .collect()
}

fn parse_sense_words(text: &str) -> BTreeMap<String, HashSet<String>> {
    let mut senses: BTreeMap<String, HashSet<String>> = BTreeMap::new();
    for line in data_lines(text) {
        let mut parts = line.split_whitespace();
        let (Some(sense), Some(word)) = (parts.next(), parts.next()) else {
            continue;
        };
        senses
            .entry(sense.to_lowercase())
            .or_default()
            .insert(word.to_lowercase());
    }
    senses
}

/// Concreteness analysis over rated vocabulary.
#[derive(Debug, Clone, Serialize)]
pub struct ConcretenessAnalysis {
    /// Mean rating of rated words (0 when none rated).
    pub avg_concreteness: f64,
    /// Words found in the rating table.
    pub rated_word_count: usize,
    /// Words outside the table.
    pub unrated_word_count: usize,
    /// Rated fraction of the vocabulary.
    pub coverage: f64,
    /// Example words rated 4.5 or higher (up to 15).
    pub concrete_words: Vec<String>,
    /// Example words rated 2.5 or lower (up to 15).
    pub abstract_words: Vec<String>,
    /// Counts per rating band.
    pub concreteness_distribution: BTreeMap<String, usize>,
}

/// Scores vocabulary concreteness against the rating table.
pub fn analyze_concreteness(lines: &[&str], lexicons: &TasteLexicons) -> ConcretenessAnalysis {
    let words = alpha_words(lines);

    let mut scores: Vec<f64> = Vec::new();
    let mut unrated = 0usize;
    let mut concrete_examples: Vec<String> = Vec::new();
    let mut abstract_examples: Vec<String> = Vec::new();

    for word in &words {
        match lexicons.concreteness(word) {
            Some(score) => {
                scores.push(score);
                if score >= 4.5 && !concrete_examples.contains(word) {
                    concrete_examples.push(word.clone());
                } else if score <= 2.5 && !abstract_examples.contains(word) {
                    abstract_examples.push(word.clone());
                }
            }
            None => unrated += 1,
        }
    }

    if scores.is_empty() {
        return ConcretenessAnalysis {
            avg_concreteness: 0.0,
            rated_word_count: 0,
            unrated_word_count: unrated,
            coverage: 0.0,
            concrete_words: Vec::new(),
            abstract_words: Vec::new(),
            concreteness_distribution: BTreeMap::new(),
        };
    }

    let mut distribution = BTreeMap::new();
    distribution.insert(
        "very_concrete_4.5+".to_string(),
        scores.iter().filter(|&&s| s >= 4.5).count(),
    );
    distribution.insert(
        "concrete_3.5-4.5".to_string(),
        scores.iter().filter(|&&s| (3.5..4.5).contains(&s)).count(),
    );
    distribution.insert(
        "moderate_2.5-3.5".to_string(),
        scores.iter().filter(|&&s| (2.5..3.5).contains(&s)).count(),
    );
    distribution.insert(
        "abstract_1.5-2.5".to_string(),
        scores.iter().filter(|&&s| (1.5..2.5).contains(&s)).count(),
    );
    distribution.insert(
        "very_abstract_<1.5".to_string(),
        scores.iter().filter(|&&s| s < 1.5).count(),
    );

    concrete_examples.truncate(15);
    abstract_examples.truncate(15);
    let rated = scores.len();

    ConcretenessAnalysis {
        avg_concreteness: scores.iter().sum::<f64>() / rated as f64,
        rated_word_count: rated,
        unrated_word_count: unrated,
        coverage: rated as f64 / (rated + unrated) as f64,
        concrete_words: concrete_examples,
        abstract_words: abstract_examples,
        concreteness_distribution: distribution,
    }
}

/// One detected cliché.
#[derive(Debug, Clone, Serialize)]
pub struct ClicheHit {
    /// The matched phrase.
    pub phrase: String,
    /// Occurrences in the text.
    pub count: usize,
}

/// Cliché detection results.
#[derive(Debug, Clone, Serialize)]
pub struct ClicheAnalysis {
    /// Matched phrases, longest (worst) first.
    pub cliches_found: Vec<ClicheHit>,
    /// Distinct phrases matched.
    pub cliche_count: usize,
    /// Total occurrences across phrases.
    pub total_cliche_instances: usize,
    /// Cliché word share of the text.
    pub cliche_word_density: f64,
    /// True when nothing matched.
    pub cliche_free: bool,
}

/// Substring-searches the fixed phrase list against the joined text.
pub fn detect_cliches(lines: &[&str], lexicons: &TasteLexicons) -> ClicheAnalysis {
    let all_text = lines.join(" ").to_lowercase();

    let mut found: Vec<ClicheHit> = lexicons
        .cliches
        .iter()
        .filter_map(|phrase| {
            let count = all_text.matches(phrase.as_str()).count();
            (count > 0).then(|| ClicheHit {
                phrase: phrase.clone(),
                count,
            })
        })
        .collect();
    found.sort_by(|a, b| {
        b.phrase
            .len()
            .cmp(&a.phrase.len())
            .then_with(|| a.phrase.cmp(&b.phrase))
    });

    let total_instances: usize = found.iter().map(|c| c.count).sum();
    let cliche_words: usize = found
        .iter()
        .map(|c| c.phrase.split_whitespace().count() * c.count)
        .sum();
    let total_words = all_text.split_whitespace().count();

    ClicheAnalysis {
        cliche_count: found.len(),
        total_cliche_instances: total_instances,
        cliche_word_density: if total_words == 0 {
            0.0
        } else {
            cliche_words as f64 / total_words as f64
        },
        cliche_free: found.is_empty(),
        cliches_found: found,
    }
}

/// Showing-versus-telling verb balance.
#[derive(Debug, Clone, Serialize)]
pub struct ShowTellAnalysis {
    /// All verb tokens.
    pub total_verbs: usize,
    /// Verbs from the state (telling) set.
    pub state_verb_count: usize,
    /// Verbs from the strong (showing) set.
    pub strong_verb_count: usize,
    /// Verbs in neither set.
    pub other_verb_count: usize,
    /// Weighted showing ratio (strong full weight, other half).
    pub show_tell_ratio: f64,
    /// Example telling verbs (up to 10, deduplicated).
    pub telling_examples: Vec<String>,
    /// Example showing verbs (up to 10, deduplicated).
    pub showing_examples: Vec<String>,
    /// strong_showing / balanced / too_much_telling.
    pub verdict: String,
}

/// Classifies verbs into state and strong sets.
pub fn analyze_show_dont_tell(
    lines: &[&str],
    lexicons: &TasteLexicons,
    tagger: &PosTagger,
) -> ShowTellAnalysis {
    let verbs: Vec<String> = lines
        .iter()
        .flat_map(|line| tokenize(line))
        .filter(|w| tagger.tag(w) == PosTag::Verb)
        .map(|w| w.to_lowercase())
        .collect();

    let state_count = verbs.iter().filter(|v| lexicons.state_verbs.contains(*v)).count();
    let strong_count = verbs
        .iter()
        .filter(|v| lexicons.strong_verbs.contains(*v))
        .count();
    let other_count = verbs.len() - state_count - strong_count;

    let ratio = if verbs.is_empty() {
        0.0
    } else {
        (strong_count as f64 + other_count as f64 * 0.5) / verbs.len() as f64
    };

    let verdict = if ratio > 0.6 {
        "strong_showing"
    } else if ratio > 0.4 {
        "balanced"
    } else {
        "too_much_telling"
    };

    ShowTellAnalysis {
        total_verbs: verbs.len(),
        state_verb_count: state_count,
        strong_verb_count: strong_count,
        other_verb_count: other_count,
        show_tell_ratio: ratio,
        telling_examples: examples(&verbs, &lexicons.state_verbs),
        showing_examples: examples(&verbs, &lexicons.strong_verbs),
        verdict: verdict.to_string(),
    }
}

/// Up to ten set members from the verb stream, deduplicated in order.
fn examples(verbs: &[String], set: &HashSet<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for verb in verbs {
        if set.contains(verb) && !out.contains(verb) {
            out.push(verb.clone());
            if out.len() == 10 {
                break;
            }
        }
    }
    out
}

/// Sensory language usage by sense.
#[derive(Debug, Clone, Serialize)]
pub struct SensoryAnalysis {
    /// Distinct sensory words used.
    pub sensory_word_count: usize,
    /// Sensory words per word of text.
    pub sensory_density: f64,
    /// Hits per sense.
    pub by_sense: BTreeMap<String, usize>,
    /// Example hits per sense (up to 5, sorted).
    pub examples_by_sense: BTreeMap<String, Vec<String>>,
    /// The most-engaged sense.
    pub dominant_sense: Option<String>,
    /// Senses with at least one hit.
    pub sense_variety: usize,
}

/// Intersects the vocabulary with each sense's word set.
pub fn analyze_sensory_language(lines: &[&str], lexicons: &TasteLexicons) -> SensoryAnalysis {
    let words = alpha_words(lines);
    let word_set: HashSet<&str> = words.iter().map(String::as_str).collect();

    let mut by_sense = BTreeMap::new();
    let mut examples_by_sense = BTreeMap::new();
    for (sense, sense_words) in &lexicons.sensory {
        let mut hits: Vec<String> = sense_words
            .iter()
            .filter(|w| word_set.contains(w.as_str()))
            .cloned()
            .collect();
        hits.sort();
        by_sense.insert(sense.clone(), hits.len());
        hits.truncate(5);
        examples_by_sense.insert(sense.clone(), hits);
    }

    let total_sensory: usize = by_sense.values().sum();
    let dominant = by_sense
        .iter()
        .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(sense, _)| sense.clone());

    SensoryAnalysis {
        sensory_word_count: total_sensory,
        sensory_density: if words.is_empty() {
            0.0
        } else {
            total_sensory as f64 / words.len() as f64
        },
        sense_variety: by_sense.values().filter(|&&v| v > 0).count(),
        by_sense,
        examples_by_sense,
        dominant_sense: dominant,
    }
}

/// Component scores making up the taste score.
#[derive(Debug, Clone, Serialize)]
pub struct ComponentScores {
    /// Concreteness component (weight 0.30).
    pub concreteness: f64,
    /// Cliché-free component (weight 0.25).
    pub cliche_free: f64,
    /// Show-don't-tell component (weight 0.25).
    pub show_dont_tell: f64,
    /// Sensory richness component (weight 0.20).
    pub sensory_richness: f64,
}

/// Full taste analysis with the weighted overall score.
#[derive(Debug, Clone, Serialize)]
pub struct TasteAnalysis {
    /// Weighted score, 0-100.
    pub overall_taste_score: f64,
    /// The four component scores.
    pub component_scores: ComponentScores,
    /// Concreteness detail.
    pub concreteness: ConcretenessAnalysis,
    /// Cliché detail.
    pub cliches: ClicheAnalysis,
    /// Show-don't-tell detail.
    pub show_dont_tell: ShowTellAnalysis,
    /// Sensory detail.
    pub sensory: SensoryAnalysis,
    /// Actionable revision notes.
    pub recommendations: Vec<String>,
}

/// Runs the full taste analysis over a sheet.
pub fn full_taste_analysis(
    sheet: &LyricSheet,
    lexicons: &TasteLexicons,
    tagger: &PosTagger,
) -> Result<TasteAnalysis, LyricsError> {
    let all_lines = sheet.all_lines();
    if all_lines.is_empty() {
        return Err(LyricsError::EmptyLyrics);
    }

    let concreteness = analyze_concreteness(&all_lines, lexicons);
    let cliches = detect_cliches(&all_lines, lexicons);
    let show_tell = analyze_show_dont_tell(&all_lines, lexicons, tagger);
    let sensory = analyze_sensory_language(&all_lines, lexicons);

    // Target concreteness is 3.5+ on the 1-5 scale.
    let concreteness_score = ((concreteness.avg_concreteness - 2.0) / 2.5 * 100.0).clamp(0.0, 100.0);
    let cliche_score = (100.0 - cliches.total_cliche_instances as f64 * 20.0).max(0.0);
    let show_tell_score = (show_tell.show_tell_ratio * 150.0).min(100.0);
    let sensory_score =
        (sensory.sense_variety as f64 * 25.0 + sensory.sensory_density * 500.0).min(100.0);

    let overall = concreteness_score * 0.30
        + cliche_score * 0.25
        + show_tell_score * 0.25
        + sensory_score * 0.20;

    let recommendations = recommendations(&concreteness, &cliches, &show_tell, &sensory);

    Ok(TasteAnalysis {
        overall_taste_score: overall,
        component_scores: ComponentScores {
            concreteness: concreteness_score,
            cliche_free: cliche_score,
            show_dont_tell: show_tell_score,
            sensory_richness: sensory_score,
        },
        concreteness,
        cliches,
        show_dont_tell: show_tell,
        sensory,
        recommendations,
    })
}

fn recommendations(
    concreteness: &ConcretenessAnalysis,
    cliches: &ClicheAnalysis,
    show_tell: &ShowTellAnalysis,
    sensory: &SensoryAnalysis,
) -> Vec<String> {
    let mut recs = Vec::new();

    if concreteness.avg_concreteness < 3.5 {
        let examples = concreteness
            .abstract_words
            .iter()
            .take(5)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        recs.push(format!(
            "CONCRETENESS: Score {:.2}/5.00 is low. Replace abstract words like [{}] with physical, tangible nouns.",
            concreteness.avg_concreteness, examples
        ));
    }

    if cliches.cliche_count > 0 {
        let phrases = cliches
            .cliches_found
            .iter()
            .take(3)
            .map(|c| c.phrase.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        recs.push(format!(
            "CLICHÉS: Found {} cliché(s): [{}]. Replace with original imagery.",
            cliches.cliche_count, phrases
        ));
    }

    if show_tell.show_tell_ratio < 0.4 {
        let examples = show_tell
            .telling_examples
            .iter()
            .take(5)
            .cloned()
            .collect::<Vec<_>>()
            .join(", ");
        recs.push(format!(
            "SHOW DON'T TELL: Too many state verbs like [{}]. Replace with action verbs that demonstrate emotion through behavior.",
            examples
        ));
    }

    if sensory.sense_variety < 3 {
        let missing = sensory
            .by_sense
            .iter()
            .filter(|(_, &count)| count == 0)
            .take(2)
            .map(|(sense, _)| sense.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        recs.push(format!(
            "SENSORY: Only {} senses engaged. Add {} imagery.",
            sensory.sense_variety, missing
        ));
    }

    if recs.is_empty() {
        recs.push("Strong taste metrics across all dimensions. Minor polish only.".to_string());
    }

    recs
}

fn alpha_words(lines: &[&str]) -> Vec<String> {
    lines
        .iter()
        .flat_map(|line| tokenize(line))
        .filter(|w| w.chars().all(char::is_alphabetic))
        .map(|w| w.to_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::LyricParser;

    fn lexicons() -> TasteLexicons {
        TasteLexicons::builtin()
    }

    #[test]
    fn builtin_lexicons_are_populated() {
        let lex = lexicons();
        assert!(lex.concreteness("table").is_some());
        assert!(!lex.cliches.is_empty());
        assert!(lex.state_verbs.contains("felt"));
        assert!(lex.strong_verbs.contains("slammed"));
        assert_eq!(lex.sensory.len(), 5);
    }

    #[test]
    fn concreteness_prefers_tangible_words() {
        let lex = lexicons();
        let concrete = analyze_concreteness(&["hand table dog knife"], &lex);
        let abstract_ = analyze_concreteness(&["truth faith doubt meaning"], &lex);
        assert!(concrete.avg_concreteness > 4.5);
        assert!(abstract_.avg_concreteness < 2.5);
        assert_eq!(concrete.rated_word_count, 4);
        assert!(!concrete.concrete_words.is_empty());
        assert!(!abstract_.abstract_words.is_empty());
    }

    #[test]
    fn cliche_detection_counts_instances() {
        let lex = lexicons();
        let hit = detect_cliches(&["my broken heart at the end of the day"], &lex);
        assert!(!hit.cliche_free);
        assert!(hit
            .cliches_found
            .iter()
            .any(|c| c.phrase == "broken heart"));

        // Words chosen to dodge the single-word filler entries too.
        let clean = detect_cliches(&["rain on the tin shack wall"], &lex);
        assert!(clean.cliche_free);
        assert_eq!(clean.total_cliche_instances, 0);
    }

    #[test]
    fn longer_cliches_rank_first() {
        let lex = lexicons();
        let analysis = detect_cliches(&["it is what it is and my broken heart"], &lex);
        assert!(analysis.cliches_found.len() >= 2);
        assert!(
            analysis.cliches_found[0].phrase.len() >= analysis.cliches_found[1].phrase.len()
        );
    }

    #[test]
    fn state_verbs_pull_the_verdict_down() {
        let lex = lexicons();
        let tagger = PosTagger::builtin();
        let telling =
            analyze_show_dont_tell(&["i felt it was wrong", "i thought i knew"], &lex, &tagger);
        assert_eq!(telling.verdict, "too_much_telling");
        assert!(telling.state_verb_count >= 3);

        let showing = analyze_show_dont_tell(
            &["she slammed the door", "he grabbed the wheel and screamed"],
            &lex,
            &tagger,
        );
        assert_eq!(showing.verdict, "strong_showing");
        assert!(showing.strong_verb_count >= 3);
    }

    #[test]
    fn sensory_variety_counts_senses() {
        let lex = lexicons();
        // sight (silver), sound (whisper), touch (cold)
        let analysis = analyze_sensory_language(&["a silver whisper cold as stone"], &lex);
        assert!(analysis.sense_variety >= 3);
        assert!(analysis.by_sense["sight"] >= 1);
        assert!(analysis.by_sense["sound"] >= 1);
        assert!(analysis.by_sense["touch"] >= 1);
        assert!(analysis.dominant_sense.is_some());
    }

    #[test]
    fn taste_score_rewards_concrete_showing_lyrics() {
        let parser = LyricParser::new();
        let lex = lexicons();
        let tagger = PosTagger::builtin();

        let good = parser.parse(
            "/verse/\nshe slammed the kitchen door\nwhiskey on the table in the dark\nrain crashed against the window glass\n",
        );
        let bad = parser.parse(
            "/verse/\ni feel like it is what it is\nmy broken heart was meant to be\ni thought i knew the meaning\n",
        );

        let good_taste = full_taste_analysis(&good, &lex, &tagger).unwrap();
        let bad_taste = full_taste_analysis(&bad, &lex, &tagger).unwrap();

        assert!(good_taste.overall_taste_score > bad_taste.overall_taste_score);
        assert!(bad_taste.cliches.total_cliche_instances >= 2);
        assert!(!bad_taste.recommendations.is_empty());
    }

    #[test]
    fn component_weights_sum_into_overall() {
        let parser = LyricParser::new();
        let lex = lexicons();
        let tagger = PosTagger::builtin();
        let sheet = parser.parse("/verse/\nshe slammed the kitchen door\n");
        let taste = full_taste_analysis(&sheet, &lex, &tagger).unwrap();

        let expected = taste.component_scores.concreteness * 0.30
            + taste.component_scores.cliche_free * 0.25
            + taste.component_scores.show_dont_tell * 0.25
            + taste.component_scores.sensory_richness * 0.20;
        assert!((taste.overall_taste_score - expected).abs() < 1e-9);
    }

    #[test]
    fn empty_sheet_is_an_error() {
        let parser = LyricParser::new();
        let sheet = parser.parse("");
        let result = full_taste_analysis(&sheet, &lexicons(), &PosTagger::builtin());
        assert!(result.is_err());
    }
}
