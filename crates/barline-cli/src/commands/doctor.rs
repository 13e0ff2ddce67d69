//! Doctor command implementation
//!
//! Checks system dependencies and configuration.

use anyhow::Result;
use barline_abc::Renderer;
use colored::Colorize;
use std::env;
use std::process::{Command, ExitCode};

/// Run the doctor command
///
/// Checks:
/// - abc2midi installation
/// - Output directory permissions
/// - Version information
///
/// # Returns
/// Exit code: 0 if all checks pass, 1 if any fail
pub fn run() -> Result<ExitCode> {
    println!("{}", "Barline Doctor".cyan().bold());
    println!("{}", "==============".cyan());
    println!();

    let mut all_ok = true;

    // Check 1: Barline version
    println!("{}", "Versions:".bold());
    println!(
        "  {} barline-cli v{}",
        "->".green(),
        env!("CARGO_PKG_VERSION")
    );

    match get_rustc_version() {
        Some(version) => {
            println!("  {} rustc {}", "->".green(), version);
        }
        None => {
            println!("  {} rustc (not found)", "->".yellow());
        }
    }

    println!();

    // Check 2: Renderer installation
    println!("{}", "Dependencies:".bold());
    let renderer = Renderer::new();
    match renderer.locate() {
        Ok(path) => {
            let version = get_renderer_version(&path).unwrap_or_else(|| "unknown".to_string());
            println!(
                "  {} abc2midi {} ({})",
                "ok".green(),
                version,
                path.display()
            );
        }
        Err(_) => {
            println!("  {} abc2midi not found in PATH", "!!".yellow());
            println!(
                "     {}",
                "abc2midi is required for MIDI generation and ABC validation.".dimmed()
            );
            println!(
                "     {}",
                "Install the abcmidi package, or set ABC2MIDI_PATH.".dimmed()
            );
            // Not a hard failure - bar counting works without the renderer
        }
    }

    println!();

    // Check 3: Output directory permissions
    println!("{}", "Permissions:".bold());
    match env::current_dir() {
        Ok(dir) => {
            let test_file = dir.join(".barline_write_test");
            match std::fs::write(&test_file, "test") {
                Ok(_) => {
                    let _ = std::fs::remove_file(&test_file);
                    println!(
                        "  {} Current directory is writable ({})",
                        "ok".green(),
                        dir.display()
                    );
                }
                Err(e) => {
                    println!("  {} Cannot write to current directory: {}", "!!".red(), e);
                    all_ok = false;
                }
            }
        }
        Err(e) => {
            println!("  {} Cannot determine current directory: {}", "!!".red(), e);
            all_ok = false;
        }
    }

    println!();

    if all_ok {
        println!("{} All checks passed!", "SUCCESS".green().bold());
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "{} Some checks failed. See above for details.",
            "WARNING".yellow().bold()
        );
        Ok(ExitCode::from(1))
    }
}

/// Ask abc2midi for its version string (`abc2midi -ver`).
fn get_renderer_version(path: &std::path::Path) -> Option<String> {
    let output = Command::new(path).arg("-ver").output().ok()?;
    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .lines()
        .next()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
}

fn parse_rustc_version(output: &str) -> Option<String> {
    // Parse "rustc 1.75.0 (..."
    output.split_whitespace().nth(1).map(|s| s.to_string())
}

/// Get the rustc version
fn get_rustc_version() -> Option<String> {
    let output = Command::new("rustc").arg("--version").output().ok()?;

    if output.status.success() {
        let stdout = String::from_utf8_lossy(&output.stdout);
        parse_rustc_version(&stdout)
    } else {
        None
    }
}
