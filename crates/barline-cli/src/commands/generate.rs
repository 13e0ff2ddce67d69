//! Generate command implementation
//!
//! Generates the full song tree from the hand-written descriptor at
//! `.source/song.yaml`: structure/lyrics/chords YAML mirrors, section ABC
//! fragments, combined per-instrument tracks, human-readable text files,
//! and MIDI via the external renderer.

use anyhow::{Context, Result};
use barline_abc::{combine_sections, title_case, Renderer, TrackSettings};
use barline_spec::{validate_song, SectionNotation, SongSpec, Structure};
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use walkdir::WalkDir;

/// Generated lyrics.yaml layout.
#[derive(Serialize)]
struct LyricsDoc {
    song: LyricsMeta,
    sections: BTreeMap<String, Vec<String>>,
}

#[derive(Serialize)]
struct LyricsMeta {
    title: String,
    composer: String,
}

/// Generated chords.yaml layout.
#[derive(Serialize)]
struct ChordsDoc {
    song: ChordsMeta,
    sections: BTreeMap<String, Vec<ChordLine>>,
}

#[derive(Serialize)]
struct ChordsMeta {
    title: String,
    composer: String,
    key: String,
    tempo: u32,
    time: String,
}

#[derive(Serialize)]
struct ChordLine {
    chords: Vec<String>,
    lyrics: String,
}

/// Run the generate command
///
/// # Arguments
/// * `song_dir` - Song directory; the descriptor is read from
///   `.source/song.yaml` and outputs land in `.generated/`
/// * `skip_midi` - Skip the MIDI rendering step
///
/// # Returns
/// Exit code: 0 on success, 1 when the descriptor is missing or invalid
pub fn run(song_dir: &str, skip_midi: bool) -> Result<ExitCode> {
    let dir = Path::new(song_dir);
    let config_file = dir.join(".source").join("song.yaml");
    if !config_file.exists() {
        anyhow::bail!(
            "Song descriptor not found: {} (expected hand-written source at .source/song.yaml)",
            config_file.display()
        );
    }

    println!(
        "{} {}",
        "Loading configuration from".cyan(),
        config_file.display()
    );
    let song = SongSpec::from_yaml_file(&config_file)
        .with_context(|| format!("Failed to load: {}", config_file.display()))?;

    let validation = validate_song(&song);
    for warning in &validation.warnings {
        println!("  {} {}", "!".yellow(), warning);
    }
    if !validation.is_ok() {
        println!("\n{}", "Errors:".red().bold());
        for error in &validation.errors {
            println!("  {} {}", "x".red(), error);
        }
        println!(
            "\n{} Descriptor has {} error(s)",
            "FAILED".red().bold(),
            validation.errors.len()
        );
        return Ok(ExitCode::from(1));
    }

    let generated = dir.join(".generated");
    let sections_dir = generated.join("sections");
    std::fs::create_dir_all(&sections_dir)
        .with_context(|| format!("Failed to create: {}", sections_dir.display()))?;

    println!();
    println!("{}", "======================================================================".cyan());
    println!("{} {}", "Generating song:".cyan().bold(), song.song.title);
    println!("{}", "======================================================================".cyan());
    println!();

    generate_structure_yaml(&song, &generated)?;
    generate_lyrics_yaml(&song, &generated)?;
    generate_chords_yaml(&song, &generated)?;
    generate_section_files(&song, &sections_dir)?;
    generate_complete_files(&song, &generated, &sections_dir)?;
    generate_text_files(&song, dir)?;

    if !skip_midi {
        println!();
        generate_midi_files(&generated);
    }

    println!();
    println!("{}", "======================================================================".cyan());
    println!("{}", "Generation complete".green().bold());
    println!("{}", "======================================================================".cyan());
    println!();
    println!("Source (hand-written):   {}", dir.join(".source").display());
    println!("Generated (do not edit): {}", generated.display());
    println!("Human-readable:          {}/*.txt", dir.display());

    Ok(ExitCode::SUCCESS)
}

fn generate_structure_yaml(song: &SongSpec, generated: &Path) -> Result<()> {
    let structure = Structure::from_song(song)
        .context("arrangement references an undefined section")?;
    let yaml = structure.to_yaml().context("Failed to serialize structure")?;
    std::fs::write(generated.join("structure.yaml"), yaml)
        .context("Failed to write structure.yaml")?;
    println!("{} structure.yaml", "Generated:".green());
    Ok(())
}

fn generate_lyrics_yaml(song: &SongSpec, generated: &Path) -> Result<()> {
    let doc = LyricsDoc {
        song: LyricsMeta {
            title: song.song.title.clone(),
            composer: song.composer().to_string(),
        },
        sections: lyric_blocks(song)
            .into_iter()
            .map(|(name, lines)| (name, lines.iter().map(|l| l.0.clone()).collect()))
            .collect(),
    };
    let yaml = serde_yaml::to_string(&doc).context("Failed to serialize lyrics")?;
    std::fs::write(generated.join("lyrics.yaml"), yaml).context("Failed to write lyrics.yaml")?;
    println!("{} lyrics.yaml", "Generated:".green());
    Ok(())
}

fn generate_chords_yaml(song: &SongSpec, generated: &Path) -> Result<()> {
    let doc = ChordsDoc {
        song: ChordsMeta {
            title: song.song.title.clone(),
            composer: song.composer().to_string(),
            key: song.song.key.clone(),
            tempo: song.song.tempo,
            time: song.song.time.clone(),
        },
        sections: lyric_blocks(song)
            .into_iter()
            .map(|(name, lines)| {
                (
                    name,
                    lines
                        .into_iter()
                        .map(|(line, chords)| ChordLine {
                            chords,
                            lyrics: line,
                        })
                        .collect(),
                )
            })
            .collect(),
    };
    let yaml = serde_yaml::to_string(&doc).context("Failed to serialize chords")?;
    std::fs::write(generated.join("chords.yaml"), yaml).context("Failed to write chords.yaml")?;
    println!("{} chords.yaml", "Generated:".green());
    Ok(())
}

/// Flattens all lyric blocks: lyric section name to (line, chords) pairs.
fn lyric_blocks(song: &SongSpec) -> BTreeMap<String, Vec<(String, Vec<String>)>> {
    let mut blocks = BTreeMap::new();
    for section in song.sections.values() {
        if let Some(lyrics) = &section.lyrics {
            for (name, lines) in lyrics {
                blocks.insert(
                    name.clone(),
                    lines
                        .iter()
                        .map(|l| (l.line.clone(), l.chords.clone()))
                        .collect(),
                );
            }
        }
    }
    blocks
}

fn generate_section_files(song: &SongSpec, sections_dir: &Path) -> Result<()> {
    let mut count = 0usize;
    for (section_name, section) in &song.sections {
        let Some(instruments) = &section.instruments else {
            continue;
        };
        for (instrument, notation) in instruments {
            let content = section_fragment(song, section_name, instrument, notation);
            let path = sections_dir.join(format!("{}-{}.abc", section_name, instrument));
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write: {}", path.display()))?;
            count += 1;
        }
    }
    println!("{} {} section files", "Generated:".green(), count);
    Ok(())
}

/// Builds one section fragment file: single-voice for melodic notation,
/// two-voice (kick on `V:1`, snare on `V:2`) for percussion.
fn section_fragment(
    song: &SongSpec,
    section_name: &str,
    instrument: &str,
    notation: &SectionNotation,
) -> String {
    let meta = &song.song;
    let title = format!(
        "{} - {} - {}",
        meta.title,
        title_case(section_name),
        title_case(instrument)
    );

    match notation {
        SectionNotation::Melodic { abc } => format!(
            "X:1\nT:{}\nM:{}\nL:1/8\nK:{}\n{}\n",
            title,
            meta.time,
            meta.key,
            abc.trim_end()
        ),
        SectionNotation::Drums(parts) => {
            let mut content =
                format!("X:1\nT:{}\nM:{}\nL:1/8\nK:C perc\n", title, meta.time);

            // Kick leads voice 1; snare (or the next available part) is
            // voice 2. Further parts are dropped with a note.
            let voice1 = parts
                .get_key_value("kick")
                .or_else(|| parts.iter().next());
            let v1_name = voice1.map(|(name, _)| name.as_str());
            let voice2 = parts
                .get_key_value("snare")
                .filter(|(name, _)| Some(name.as_str()) != v1_name)
                .or_else(|| {
                    parts
                        .iter()
                        .find(|(name, _)| Some(name.as_str()) != v1_name)
                });

            if let Some((name, abc)) = voice1 {
                content.push_str(&format!("V:1 name=\"{}\"\n", title_case(name)));
                content.push_str(abc.trim_end());
                content.push('\n');
            }
            if let Some((name, abc)) = voice2 {
                content.push_str(&format!("V:2 name=\"{}\"\n", title_case(name)));
                content.push_str(abc.trim_end());
                content.push('\n');
            }

            for name in parts.keys() {
                let used = voice1.map(|(v, _)| v) == Some(name)
                    || voice2.map(|(v, _)| v) == Some(name);
                if !used {
                    println!(
                        "{} Drum part '{}' in section '{}' has no voice slot; skipped",
                        "!".yellow(),
                        name,
                        section_name
                    );
                }
            }

            content
        }
    }
}

fn generate_complete_files(
    song: &SongSpec,
    generated: &Path,
    sections_dir: &Path,
) -> Result<()> {
    for (instrument, spec) in &song.instruments {
        let settings = TrackSettings {
            title: song.song.title.clone(),
            composer: song.composer().to_string(),
            tempo: song.song.tempo,
            time: song.song.time.clone(),
            key: song.song.key.clone(),
            midi_program: spec.program.unwrap_or(0),
            percussion: spec.percussion,
        };

        let sections: Vec<(String, PathBuf)> = song
            .song
            .structure
            .iter()
            .map(|section| {
                (
                    section.clone(),
                    sections_dir.join(format!("{}-{}.abc", section, instrument)),
                )
            })
            .collect();

        let output = generated.join(format!("{}.abc", instrument));
        let outcome = combine_sections(&sections, &output, &settings)
            .with_context(|| format!("Failed to combine sections for '{}'", instrument))?;

        for missing in &outcome.missing {
            println!(
                "{} Missing section file: {}",
                "!".yellow(),
                missing.display()
            );
        }
        println!("{} {}.abc", "Generated:".green(), instrument);
    }
    Ok(())
}

fn generate_text_files(song: &SongSpec, song_dir: &Path) -> Result<()> {
    let blocks = lyric_blocks(song);

    // lyrics.txt
    let mut lyrics_lines = vec!["# LYRICS".to_string()];
    for (name, lines) in &blocks {
        lyrics_lines.push(String::new());
        lyrics_lines.push(name.to_uppercase());
        for (line, _) in lines {
            lyrics_lines.push(line.clone());
        }
    }
    std::fs::write(song_dir.join("lyrics.txt"), lyrics_lines.join("\n"))
        .context("Failed to write lyrics.txt")?;
    println!("{} lyrics.txt", "Generated:".green());

    // chords.txt
    let mut chords_lines = vec!["# CHORDS".to_string()];
    for (name, lines) in &blocks {
        chords_lines.push(String::new());
        chords_lines.push(name.to_uppercase());
        for (line, chords) in lines {
            chords_lines.push(chords.join("  "));
            chords_lines.push(line.clone());
        }
    }
    std::fs::write(song_dir.join("chords.txt"), chords_lines.join("\n"))
        .context("Failed to write chords.txt")?;
    println!("{} chords.txt", "Generated:".green());

    // arrangement.txt
    if let Some(arrangement) = &song.arrangement {
        let mut arr_lines = vec![
            format!("TEMPO: {} bpm", song.song.tempo),
            format!("TIME: {}", song.song.time),
            format!("KEY: {}", song.song.key),
        ];
        for (section, notes) in arrangement {
            arr_lines.push(String::new());
            arr_lines.push(section.to_uppercase());
            arr_lines.push(notes.clone());
        }
        std::fs::write(song_dir.join("arrangement.txt"), arr_lines.join("\n"))
            .context("Failed to write arrangement.txt")?;
        println!("{} arrangement.txt", "Generated:".green());
    }

    Ok(())
}

/// Renders every generated ABC file to MIDI. Failures are reported per
/// file; a missing renderer skips the step with a warning.
fn generate_midi_files(generated: &Path) {
    let renderer = Renderer::new();
    if renderer.locate().is_err() {
        println!(
            "{} abc2midi not found - skipping MIDI generation",
            "!".yellow()
        );
        return;
    }

    let mut abc_files: Vec<PathBuf> = WalkDir::new(generated)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .map(|e| e.path().to_path_buf())
        .filter(|p| p.extension().is_some_and(|ext| ext == "abc"))
        .collect();
    abc_files.sort();

    for abc_file in abc_files {
        let midi_file = abc_file.with_extension("mid");
        let name = midi_file
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        match renderer.render(&abc_file, &midi_file) {
            Ok(()) => println!("{} {}", "Generated:".green(), name),
            Err(e) => {
                println!("{} Failed to generate {}", "!".yellow(), name);
                let detail = e.to_string();
                let cut = detail.chars().take(200).collect::<String>();
                println!("  {}", cut.dimmed());
            }
        }
    }
}
