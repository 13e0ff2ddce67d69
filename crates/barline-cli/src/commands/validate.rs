//! Validate command implementation
//!
//! Validates a single ABC file through the external renderer.

use anyhow::Result;
use barline_abc::Renderer;
use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;

/// Run the validate command
///
/// # Arguments
/// * `file` - Path to the ABC file
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid or the renderer is unavailable
pub fn run(file: &str) -> Result<ExitCode> {
    let path = Path::new(file);
    if !path.exists() {
        anyhow::bail!("ABC file does not exist: {}", file);
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| file.to_string());

    let renderer = Renderer::new();
    match renderer.validate(path) {
        Ok(validation) if validation.ok => {
            println!("{} {} {}", "ok".green(), name, "VALID".green().bold());
            Ok(ExitCode::SUCCESS)
        }
        Ok(validation) => {
            println!("{} {} {}", "x".red(), name, "INVALID".red().bold());
            println!("{}", validation.message.trim().dimmed());
            Ok(ExitCode::from(1))
        }
        Err(e) => {
            // Renderer missing or timed out: a validation failure, not a crash.
            println!("{} {} {}", "x".red(), name, "INVALID".red().bold());
            println!("{}", e.to_string().dimmed());
            Ok(ExitCode::from(1))
        }
    }
}
