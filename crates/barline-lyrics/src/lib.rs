//! Barline Lyrics Pipeline
//!
//! Parsing and craft analysis for song lyrics: structure detection from
//! raw text, quantitative metrics (rhyme, meter, POS, phonetics,
//! vocabulary), taste scoring against fixed lookup tables, similarity
//! ranking against a model song, critique prompt generation, and
//! cross-file lyric consistency checks.
//!
//! Linguistic knowledge comes from external data consumed at startup: a
//! CMU-format pronouncing dictionary, a POS lexicon, and the taste tables
//! under `assets/`. All of them are plain lookup collaborators — no
//! model inference happens here.
//!
//! # Modules
//!
//! - [`parse`]: raw text to structured [`parse::LyricSheet`]
//! - [`dict`]: phonetic dictionary (syllables, stresses, rhyming parts)
//! - [`tagger`]: lexicon-backed POS tagging
//! - [`analysis`]: quantitative analysis
//! - [`taste`]: taste metrics and the weighted 0-100 score
//! - [`compare`]: similarity scoring against a model song
//! - [`critique`]: judge prompt generation
//! - [`check`]: lyric consistency across generated song files

pub mod analysis;
pub mod check;
pub mod compare;
pub mod critique;
pub mod dict;
pub mod error;
pub mod parse;
pub mod tagger;
pub mod taste;

// Re-export commonly used types at the crate root
pub use analysis::{full_analysis, Analysis};
pub use check::{validate_song_lyrics, LyricsCheckReport};
pub use compare::{similarity_score, Similarity};
pub use critique::generate_critique_prompt;
pub use dict::PhoneticDictionary;
pub use error::LyricsError;
pub use parse::{LyricParser, LyricSection, LyricSheet};
pub use tagger::{PosTag, PosTagger};
pub use taste::{full_taste_analysis, TasteAnalysis, TasteLexicons};
