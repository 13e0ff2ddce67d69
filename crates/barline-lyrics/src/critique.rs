//! Critique prompt generation.
//!
//! Builds a structured judge prompt for an external language model:
//! low-precision 1-5 scores per criterion, required reasoning before each
//! score, and a fixed JSON response contract. The tooling only writes the
//! prompt; running it through a model is a manual step.

use crate::parse::LyricSheet;
use crate::taste::TasteAnalysis;

/// Generates a critique prompt for the given lyrics.
///
/// When a model sheet is supplied it is included as a style/quality
/// reference; when a taste analysis is supplied its scores and
/// recommendations are embedded as context.
pub fn generate_critique_prompt(
    sheet: &LyricSheet,
    model: Option<&LyricSheet>,
    taste: Option<&TasteAnalysis>,
) -> String {
    let lyrics_text = sheet.all_lines().join("\n");

    let model_context = match model {
        Some(model_sheet) => format!(
            "\n## MODEL SONG (reference for style/quality)\n```\n{}\n```\n",
            model_sheet.all_lines().join("\n")
        ),
        None => String::new(),
    };

    let taste_context = match taste {
        Some(taste) => {
            let recommendations = taste
                .recommendations
                .iter()
                .map(|r| format!("- {}", r))
                .collect::<Vec<_>>()
                .join("\n");
            format!(
                "\n## AUTOMATED TASTE METRICS (already computed)\n\n\
                 Overall Taste Score: {:.1}/100\n\n\
                 Component Scores:\n\
                 - Concreteness: {:.1}/100\n\
                 - Cliché-Free: {:.1}/100\n\
                 - Show Don't Tell: {:.1}/100\n\
                 - Sensory Richness: {:.1}/100\n\n\
                 Automated Recommendations:\n{}\n",
                taste.overall_taste_score,
                taste.component_scores.concreteness,
                taste.component_scores.cliche_free,
                taste.component_scores.show_dont_tell,
                taste.component_scores.sensory_richness,
                recommendations
            )
        }
        None => String::new(),
    };

    format!(
        r#"# LYRICS CRITIQUE REQUEST

You are an expert lyricist and editor. Evaluate the following lyrics using the structured criteria below. You must provide reasoning before each score.
{model_context}
## CANDIDATE LYRICS (to evaluate)
```
{lyrics_text}
```
{taste_context}

---

## EVALUATION CRITERIA

For each criterion, first explain your reasoning (2-3 sentences), then assign a score.

### 1. IMAGERY & CONCRETENESS (1-5)
Does the song use specific, tangible images? Or vague abstractions?
- 5 = Rich physical imagery throughout (rain on tin roof, calloused hands, smell of diesel)
- 3 = Mixed - some concrete images, some abstract
- 1 = Mostly abstract (love, pain, feelings, things)

### 2. ORIGINALITY (1-5)
Are the phrases fresh? Or are they clichés you've heard a thousand times?
- 5 = Surprising, memorable phrases I've never heard before
- 3 = Some original moments, some familiar territory
- 1 = Wall-to-wall clichés and stock phrases

### 3. EMOTIONAL AUTHENTICITY (1-5)
Does this feel like genuine human experience? Or greeting-card sentiment?
- 5 = Raw, specific, earned emotion
- 3 = Genuine feeling but somewhat generic expression
- 1 = Hollow, sentimental, or performative

### 4. NARRATIVE COHERENCE (1-5)
Does the story/emotion build? Is there an arc?
- 5 = Clear progression with earned resolution/revelation
- 3 = Some structure but meandering or unclear
- 1 = Disconnected ideas, no through-line

### 5. CRAFT (1-5)
Technical skill: meter, rhyme, line breaks, word choice
- 5 = Masterful control of form, every word earns its place
- 3 = Competent but some awkward moments
- 1 = Forced rhymes, broken meter, filler words

### 6. SINGABILITY (1-5)
Would these words feel natural in someone's mouth when sung?
- 5 = Natural phrasing, good vowels on stressed notes
- 3 = Mostly singable with a few awkward spots
- 1 = Tongue-twisters, harsh consonant clusters, unnatural stress

---

## REQUIRED OUTPUT FORMAT

You MUST respond with valid JSON in exactly this format:

```json
{{
  "imagery_concreteness": {{
    "reasoning": "Your 2-3 sentence explanation here",
    "score": 4,
    "examples": ["specific good/bad examples from the lyrics"]
  }},
  "originality": {{
    "reasoning": "Your 2-3 sentence explanation here",
    "score": 3,
    "cliches_found": ["any clichés you noticed"],
    "fresh_phrases": ["any notably original phrases"]
  }},
  "emotional_authenticity": {{
    "reasoning": "Your 2-3 sentence explanation here",
    "score": 4
  }},
  "narrative_coherence": {{
    "reasoning": "Your 2-3 sentence explanation here",
    "score": 3,
    "arc_description": "Brief description of the narrative arc"
  }},
  "craft": {{
    "reasoning": "Your 2-3 sentence explanation here",
    "score": 4,
    "weak_spots": ["any awkward lines or forced rhymes"]
  }},
  "singability": {{
    "reasoning": "Your 2-3 sentence explanation here",
    "score": 4
  }},
  "overall_score": 3.7,
  "verdict": "REVISE|POLISH|READY",
  "top_3_improvements": [
    "Most important revision needed",
    "Second priority",
    "Third priority"
  ],
  "strongest_lines": ["Quote 1-3 of the best lines"],
  "weakest_lines": ["Quote 1-3 lines that need the most work"]
}}
```

Verdict meanings:
- REVISE = Major issues, needs significant rewriting
- POLISH = Good bones, needs line-level improvements
- READY = Publication quality, only minor tweaks if any

Now evaluate the candidate lyrics above.
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::LyricParser;
    use crate::tagger::PosTagger;
    use crate::taste::{full_taste_analysis, TasteLexicons};

    #[test]
    fn prompt_embeds_candidate_lyrics() {
        let parser = LyricParser::new();
        let sheet = parser.parse("/verse/\nthe kitchen light still burns\n");
        let prompt = generate_critique_prompt(&sheet, None, None);

        assert!(prompt.contains("the kitchen light still burns"));
        assert!(prompt.contains("IMAGERY & CONCRETENESS"));
        assert!(prompt.contains("REVISE|POLISH|READY"));
        assert!(!prompt.contains("MODEL SONG"));
        assert!(!prompt.contains("AUTOMATED TASTE METRICS"));
    }

    #[test]
    fn prompt_includes_model_when_given() {
        let parser = LyricParser::new();
        let sheet = parser.parse("/verse/\nnew line here\n");
        let model = parser.parse("/verse/\nmodel line here\n");
        let prompt = generate_critique_prompt(&sheet, Some(&model), None);

        assert!(prompt.contains("MODEL SONG"));
        assert!(prompt.contains("model line here"));
    }

    #[test]
    fn prompt_includes_taste_metrics_when_given() {
        let parser = LyricParser::new();
        let lexicons = TasteLexicons::builtin();
        let tagger = PosTagger::builtin();
        let sheet = parser.parse("/verse/\nshe slammed the kitchen door\n");
        let taste = full_taste_analysis(&sheet, &lexicons, &tagger).unwrap();

        let prompt = generate_critique_prompt(&sheet, None, Some(&taste));
        assert!(prompt.contains("AUTOMATED TASTE METRICS"));
        assert!(prompt.contains("Overall Taste Score:"));
    }
}
