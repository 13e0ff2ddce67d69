//! Barline CLI - Command-line interface for song construction and validation
//!
//! This binary provides commands for counting bars, validating and
//! combining ABC notation files, generating song trees from YAML
//! descriptors, and analyzing lyrics.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use barline_cli::commands;

/// Barline - Song Construction and Validation Tools
#[derive(Parser)]
#[command(name = "barline")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count the bars in an ABC file (first voice only)
    Count {
        /// Path to the ABC file
        #[arg(short, long)]
        file: String,
    },

    /// Validate an ABC file through the abc2midi renderer
    Validate {
        /// Path to the ABC file
        #[arg(short, long)]
        file: String,
    },

    /// Verify all instrument files in a song directory agree on bar count
    Verify {
        /// Song directory containing per-instrument ABC files
        #[arg(short, long)]
        song_dir: String,

        /// Output machine-readable JSON instead of the text report
        #[arg(long)]
        json: bool,
    },

    /// Create a section template with the correct number of bars
    Template {
        /// Path to structure.yaml
        #[arg(long)]
        structure: String,

        /// Section name (intro, verse, chorus, ...)
        #[arg(short, long)]
        section: String,

        /// Instrument name
        #[arg(short, long)]
        instrument: String,

        /// Output file path (default: sections/{section}-{instrument}.abc)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Validate a section file's bar count against the structure
    ValidateSection {
        /// Path to structure.yaml
        #[arg(long)]
        structure: String,

        /// Section name
        #[arg(short, long)]
        section: String,

        /// Instrument name
        #[arg(short, long)]
        instrument: String,

        /// Section ABC file to check
        #[arg(short, long)]
        file: String,
    },

    /// Validate every section file for a song
    ValidateAll {
        /// Song directory containing structure.yaml and sections/
        #[arg(short, long)]
        song_dir: String,
    },

    /// Generate all missing section templates for a song
    GenerateAll {
        /// Song directory containing structure.yaml
        #[arg(short, long)]
        song_dir: String,
    },

    /// Build per-instrument tracks from section files and verify them
    Build {
        /// Song directory holding the sections/ folder
        #[arg(short, long)]
        song_dir: String,

        /// Structure file (default: {song_dir}/structure.yaml)
        #[arg(long)]
        structure: Option<String>,
    },

    /// Generate the full song tree from the source descriptor
    Generate {
        /// Song directory (descriptor expected at .source/song.yaml)
        #[arg(short, long)]
        song_dir: String,

        /// Skip MIDI generation
        #[arg(long)]
        skip_midi: bool,
    },

    /// Check system dependencies and configuration
    Doctor,

    /// Lyric parsing and craft analysis
    Lyrics {
        #[command(subcommand)]
        command: LyricsCommands,
    },
}

#[derive(Subcommand)]
enum LyricsCommands {
    /// Parse raw lyrics into structured YAML
    Parse {
        /// Input lyrics file (raw text)
        #[arg(short, long)]
        input: String,

        /// Output YAML file (default: input with .yaml extension)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Analyze lyrics quantitatively (rhyme, meter, POS, vocabulary)
    Analyze {
        /// Input lyrics file (YAML or raw text)
        #[arg(short, long)]
        input: String,

        /// Output analysis JSON file (default: input with .analysis.json)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Compute taste metrics and the 0-100 quality score
    Taste {
        /// Input lyrics file (YAML or raw text)
        #[arg(short, long)]
        input: String,

        /// Output taste JSON file (default: input with .taste.json)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Compare candidate lyrics against a model song
    Compare {
        /// Model lyrics file
        #[arg(short, long)]
        model: String,

        /// Candidate lyrics files
        #[arg(short, long, num_args = 1.., required = true)]
        candidates: Vec<String>,

        /// Output report JSON file (default: comparison_report.json)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate an AI critique prompt for lyrics
    Critique {
        /// Input lyrics file to critique
        #[arg(short, long)]
        input: String,

        /// Optional model lyrics for comparison
        #[arg(short, long)]
        model: Option<String>,

        /// Output markdown file (default: input with .critique.md)
        #[arg(short, long)]
        output: Option<String>,

        /// Include automated taste metrics in the prompt
        #[arg(short = 't', long)]
        include_taste: bool,
    },

    /// Check lyric consistency across a song's generated files
    Check {
        /// Song directory holding lyrics.yaml and chords.yaml
        #[arg(short, long)]
        song_dir: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Count { file } => commands::count::run(&file),
        Commands::Validate { file } => commands::validate::run(&file),
        Commands::Verify { song_dir, json } => commands::verify::run(&song_dir, json),
        Commands::Template {
            structure,
            section,
            instrument,
            output,
        } => commands::template::run(&structure, &section, &instrument, output.as_deref()),
        Commands::ValidateSection {
            structure,
            section,
            instrument,
            file,
        } => commands::validate_section::run(&structure, &section, &instrument, &file),
        Commands::ValidateAll { song_dir } => commands::validate_all::run(&song_dir),
        Commands::GenerateAll { song_dir } => commands::generate_all::run(&song_dir),
        Commands::Build {
            song_dir,
            structure,
        } => commands::build::run(&song_dir, structure.as_deref()),
        Commands::Generate {
            song_dir,
            skip_midi,
        } => commands::generate::run(&song_dir, skip_midi),
        Commands::Doctor => commands::doctor::run(),
        Commands::Lyrics { command } => match command {
            LyricsCommands::Parse { input, output } => {
                commands::lyrics::parse::run(&input, output.as_deref())
            }
            LyricsCommands::Analyze { input, output } => {
                commands::lyrics::analyze::run(&input, output.as_deref())
            }
            LyricsCommands::Taste { input, output } => {
                commands::lyrics::taste::run(&input, output.as_deref())
            }
            LyricsCommands::Compare {
                model,
                candidates,
                output,
            } => commands::lyrics::compare::run(&model, &candidates, output.as_deref()),
            LyricsCommands::Critique {
                input,
                model,
                output,
                include_taste,
            } => commands::lyrics::critique::run(
                &input,
                model.as_deref(),
                output.as_deref(),
                include_taste,
            ),
            LyricsCommands::Check { song_dir } => commands::lyrics::check::run(&song_dir),
        },
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_count() {
        let cli = Cli::try_parse_from(["barline", "count", "--file", "bass.abc"]).unwrap();
        match cli.command {
            Commands::Count { file } => assert_eq!(file, "bass.abc"),
            _ => panic!("expected count command"),
        }
    }

    #[test]
    fn test_cli_requires_file_for_count() {
        let err = Cli::try_parse_from(["barline", "count"]).err().unwrap();
        assert!(err.to_string().contains("--file"));
    }

    #[test]
    fn test_cli_parses_validate() {
        let cli = Cli::try_parse_from(["barline", "validate", "-f", "bass.abc"]).unwrap();
        match cli.command {
            Commands::Validate { file } => assert_eq!(file, "bass.abc"),
            _ => panic!("expected validate command"),
        }
    }

    #[test]
    fn test_cli_parses_verify() {
        let cli = Cli::try_parse_from(["barline", "verify", "--song-dir", "songs/one"]).unwrap();
        match cli.command {
            Commands::Verify { song_dir, json } => {
                assert_eq!(song_dir, "songs/one");
                assert!(!json);
            }
            _ => panic!("expected verify command"),
        }
    }

    #[test]
    fn test_cli_parses_verify_with_json() {
        let cli =
            Cli::try_parse_from(["barline", "verify", "--song-dir", "songs/one", "--json"])
                .unwrap();
        match cli.command {
            Commands::Verify { json, .. } => assert!(json),
            _ => panic!("expected verify command"),
        }
    }

    #[test]
    fn test_cli_parses_template() {
        let cli = Cli::try_parse_from([
            "barline",
            "template",
            "--structure",
            "structure.yaml",
            "--section",
            "intro",
            "--instrument",
            "bass",
        ])
        .unwrap();
        match cli.command {
            Commands::Template {
                structure,
                section,
                instrument,
                output,
            } => {
                assert_eq!(structure, "structure.yaml");
                assert_eq!(section, "intro");
                assert_eq!(instrument, "bass");
                assert!(output.is_none());
            }
            _ => panic!("expected template command"),
        }
    }

    #[test]
    fn test_cli_parses_validate_section() {
        let cli = Cli::try_parse_from([
            "barline",
            "validate-section",
            "--structure",
            "structure.yaml",
            "-s",
            "verse",
            "-i",
            "vocal",
            "-f",
            "sections/verse-vocal.abc",
        ])
        .unwrap();
        match cli.command {
            Commands::ValidateSection {
                structure,
                section,
                instrument,
                file,
            } => {
                assert_eq!(structure, "structure.yaml");
                assert_eq!(section, "verse");
                assert_eq!(instrument, "vocal");
                assert_eq!(file, "sections/verse-vocal.abc");
            }
            _ => panic!("expected validate-section command"),
        }
    }

    #[test]
    fn test_cli_parses_build_with_structure_override() {
        let cli = Cli::try_parse_from([
            "barline",
            "build",
            "--song-dir",
            "songs/one",
            "--structure",
            "alt.yaml",
        ])
        .unwrap();
        match cli.command {
            Commands::Build {
                song_dir,
                structure,
            } => {
                assert_eq!(song_dir, "songs/one");
                assert_eq!(structure.as_deref(), Some("alt.yaml"));
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_parses_generate_with_skip_midi() {
        let cli = Cli::try_parse_from([
            "barline",
            "generate",
            "--song-dir",
            "songs/one",
            "--skip-midi",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                song_dir,
                skip_midi,
            } => {
                assert_eq!(song_dir, "songs/one");
                assert!(skip_midi);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_doctor() {
        let cli = Cli::try_parse_from(["barline", "doctor"]).unwrap();
        assert!(matches!(cli.command, Commands::Doctor));
    }

    #[test]
    fn test_cli_parses_lyrics_parse() {
        let cli =
            Cli::try_parse_from(["barline", "lyrics", "parse", "--input", "raw.txt"]).unwrap();
        match cli.command {
            Commands::Lyrics { command } => match command {
                LyricsCommands::Parse { input, output } => {
                    assert_eq!(input, "raw.txt");
                    assert!(output.is_none());
                }
                _ => panic!("expected lyrics parse"),
            },
            _ => panic!("expected lyrics command"),
        }
    }

    #[test]
    fn test_cli_parses_lyrics_compare_with_candidates() {
        let cli = Cli::try_parse_from([
            "barline", "lyrics", "compare", "--model", "model.txt", "--candidates", "a.txt",
            "b.txt",
        ])
        .unwrap();
        match cli.command {
            Commands::Lyrics { command } => match command {
                LyricsCommands::Compare {
                    model,
                    candidates,
                    output,
                } => {
                    assert_eq!(model, "model.txt");
                    assert_eq!(candidates, vec!["a.txt", "b.txt"]);
                    assert!(output.is_none());
                }
                _ => panic!("expected lyrics compare"),
            },
            _ => panic!("expected lyrics command"),
        }
    }

    #[test]
    fn test_cli_requires_candidates_for_compare() {
        let err = Cli::try_parse_from(["barline", "lyrics", "compare", "--model", "model.txt"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("--candidates"));
    }

    #[test]
    fn test_cli_parses_lyrics_critique_with_taste() {
        let cli = Cli::try_parse_from([
            "barline",
            "lyrics",
            "critique",
            "--input",
            "lyrics.yaml",
            "--include-taste",
        ])
        .unwrap();
        match cli.command {
            Commands::Lyrics { command } => match command {
                LyricsCommands::Critique {
                    input,
                    model,
                    output,
                    include_taste,
                } => {
                    assert_eq!(input, "lyrics.yaml");
                    assert!(model.is_none());
                    assert!(output.is_none());
                    assert!(include_taste);
                }
                _ => panic!("expected lyrics critique"),
            },
            _ => panic!("expected lyrics command"),
        }
    }

    #[test]
    fn test_cli_parses_lyrics_check() {
        let cli =
            Cli::try_parse_from(["barline", "lyrics", "check", "--song-dir", "songs/one"])
                .unwrap();
        match cli.command {
            Commands::Lyrics { command } => match command {
                LyricsCommands::Check { song_dir } => assert_eq!(song_dir, "songs/one"),
                _ => panic!("expected lyrics check"),
            },
            _ => panic!("expected lyrics command"),
        }
    }
}
