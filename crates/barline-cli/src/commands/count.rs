//! Count command implementation
//!
//! Counts the bars in a single ABC file.

use anyhow::{Context, Result};
use barline_abc::count_bars;
use std::path::Path;
use std::process::ExitCode;

/// Run the count command
///
/// # Arguments
/// * `file` - Path to the ABC file
///
/// # Returns
/// Exit code: 0 on success, 1 if the file is missing
pub fn run(file: &str) -> Result<ExitCode> {
    let path = Path::new(file);
    if !path.exists() {
        anyhow::bail!("ABC file does not exist: {}", file);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read ABC file: {}", file))?;
    let bars = count_bars(&content);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string());
    println!("{}: {} bars", name, bars);

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_bars_in_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("test.abc");
        std::fs::write(&path, "X:1\nK:C\nC8 | C8 | C8 |\n").unwrap();

        let code = run(path.to_str().unwrap()).unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(run("/nonexistent/test.abc").is_err());
    }
}
