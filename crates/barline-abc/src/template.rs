//! Section template generation.
//!
//! Templates give authors a fragment with exactly the right number of
//! placeholder bars for a (section, instrument) pair, so the bar-count
//! contract is satisfied from the first save.

use barline_spec::{SpecError, Structure};

/// Placeholder bar for melodic instruments: a whole bar of rest.
const MELODIC_BAR: &str = "z8";

/// Placeholder kick pattern for percussion voice 1.
const KICK_BAR: &str = "C4 C4";

/// Placeholder snare pattern for percussion voice 2.
const SNARE_BAR: &str = "z4 E4";

/// Generates a template ABC fragment for a section/instrument pair.
///
/// The template has the section's expected bar count, a two-voice body for
/// percussion instruments, and a trailing comment stating the expected
/// count. Counting the template's bars returns exactly that count.
pub fn section_template(
    structure: &Structure,
    section: &str,
    instrument: &str,
) -> Result<String, SpecError> {
    let expected_bars = structure.section_bars(section)?;
    let is_percussion = structure.is_percussion(instrument);

    let key = if is_percussion {
        "C perc"
    } else {
        structure.key.as_str()
    };
    let mut content = format!(
        "X:1\n\
         T:{} - {} - {}\n\
         M:{}\n\
         L:1/8\n\
         K:{}\n",
        structure.title,
        title_case(section),
        title_case(instrument),
        structure.time,
        key
    );

    if is_percussion {
        content.push_str("V:1 name=\"Kick\"\n");
        content.push_str(&placeholder_line(KICK_BAR, expected_bars));
        content.push_str("\nV:2 name=\"Snare\"\n");
        content.push_str(&placeholder_line(SNARE_BAR, expected_bars));
    } else {
        content.push_str(&placeholder_line(MELODIC_BAR, expected_bars));
    }

    content.push_str(&format!("\n% Expected: {} bars\n", expected_bars));

    Ok(content)
}

/// Builds `bars` copies of a placeholder joined by bar separators.
fn placeholder_line(pattern: &str, bars: u32) -> String {
    let mut line = vec![pattern; bars as usize].join(" | ");
    line.push_str(" |");
    line
}

/// Capitalizes the first letter of each whitespace-separated word. Used
/// for the generated fragment titles.
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
