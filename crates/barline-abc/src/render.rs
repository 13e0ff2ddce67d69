//! Renderer subprocess orchestration.
//!
//! The ABC to MIDI conversion is delegated to the external `abc2midi` tool,
//! treated as a black box: we spawn it with a timeout, capture stderr, and
//! scan the text for its failure markers. Its diagnostics distinguish hard
//! errors from benign warnings by the literal substrings "Error", and
//! "Bar" together with "time units" (a bar-length mismatch report). That
//! string contract is relied on throughout and must not change.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::{Duration, Instant};

use serde::Serialize;

use crate::error::{AbcError, AbcResult};

/// Default timeout for renderer execution.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Configuration for the renderer orchestrator.
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Path to the abc2midi executable. Resolved automatically when unset.
    pub renderer_path: Option<PathBuf>,
    /// Timeout for renderer execution.
    pub timeout: Duration,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            renderer_path: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl RendererConfig {
    /// Sets the renderer executable path.
    pub fn renderer_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.renderer_path = Some(path.into());
        self
    }

    /// Sets the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }
}

/// Outcome of validating one ABC file through the renderer.
#[derive(Debug, Clone, Serialize)]
pub struct Validation {
    /// Whether the renderer accepted the file without error markers.
    pub ok: bool,
    /// Renderer diagnostics on failure, or a fixed note on success.
    pub message: String,
}

impl Validation {
    fn passed() -> Self {
        Self {
            ok: true,
            message: "Valid ABC file".to_string(),
        }
    }

    fn failed(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// The renderer subprocess orchestrator.
pub struct Renderer {
    config: RendererConfig,
}

impl Renderer {
    /// Creates a new renderer with default configuration.
    pub fn new() -> Self {
        Self {
            config: RendererConfig::default(),
        }
    }

    /// Creates a new renderer with the given configuration.
    pub fn with_config(config: RendererConfig) -> Self {
        Self { config }
    }

    /// Finds the renderer executable path.
    pub fn locate(&self) -> AbcResult<PathBuf> {
        // Check config override first
        if let Some(ref path) = self.config.renderer_path {
            if path.exists() {
                return Ok(path.clone());
            }
        }

        // Check ABC2MIDI_PATH environment variable
        if let Ok(path) = std::env::var("ABC2MIDI_PATH") {
            let path = PathBuf::from(path);
            if path.exists() {
                return Ok(path);
            }
        }

        // Try to find abc2midi in PATH
        let renderer_names = if cfg!(windows) {
            vec!["abc2midi.exe", "abc2midi"]
        } else {
            vec!["abc2midi"]
        };

        for name in renderer_names {
            if let Ok(path) = which::which(name) {
                return Ok(path);
            }
        }

        // Try common installation paths
        let common_paths = [
            "/usr/bin/abc2midi",
            "/usr/local/bin/abc2midi",
            "/opt/homebrew/bin/abc2midi",
        ];
        for path_str in common_paths {
            let path = PathBuf::from(path_str);
            if path.exists() {
                return Ok(path);
            }
        }

        Err(AbcError::RendererNotFound)
    }

    /// Renders an ABC file to MIDI: `abc2midi <abc> -o <midi>`.
    ///
    /// Fails on spawn error, timeout, or non-zero exit.
    pub fn render(&self, abc_path: &Path, midi_path: &Path) -> AbcResult<()> {
        let (status, stderr) = self.run(abc_path, midi_path)?;

        if !status.success() {
            let exit_code = status.code().unwrap_or(-1);
            return Err(AbcError::process_failed(exit_code, stderr));
        }

        Ok(())
    }

    /// Validates an ABC file by rendering it to a scratch MIDI file and
    /// scanning the renderer's stderr for its failure markers.
    ///
    /// Warnings that do not match the markers leave the file valid; the
    /// exit status is not consulted, only the diagnostic text.
    pub fn validate(&self, abc_path: &Path) -> AbcResult<Validation> {
        let scratch = tempfile::Builder::new()
            .prefix("barline_validate_")
            .suffix(".mid")
            .tempfile()?;

        let (_status, stderr) = self.run(abc_path, scratch.path())?;

        // Hard errors (not warnings)
        if stderr.contains("Error") {
            return Ok(Validation::failed(stderr));
        }

        // Timing errors (bar length mismatches)
        if stderr.contains("Bar") && stderr.contains("time units") {
            return Ok(Validation::failed(stderr));
        }

        Ok(Validation::passed())
    }

    fn run(&self, abc_path: &Path, midi_path: &Path) -> AbcResult<(ExitStatus, String)> {
        let renderer_path = self.locate()?;

        let mut cmd = Command::new(&renderer_path);
        cmd.arg(abc_path).arg("-o").arg(midi_path);
        // Only stderr is surfaced; keep stdout unpiped to reduce the risk of
        // subprocess deadlocks caused by a filled stdout pipe.
        cmd.stdout(Stdio::null()).stderr(Stdio::piped());

        let child = cmd.spawn().map_err(AbcError::SpawnFailed)?;

        wait_with_timeout(child, self.config.timeout)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn wait_with_timeout(mut child: Child, timeout: Duration) -> AbcResult<(ExitStatus, String)> {
    let start = Instant::now();

    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if start.elapsed() > timeout {
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(AbcError::Timeout {
                        timeout_secs: timeout.as_secs(),
                    });
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(e) => return Err(AbcError::SpawnFailed(e)),
        }
    };

    let stderr = {
        let mut buf = String::new();
        if let Some(mut err) = child.stderr.take() {
            let _ = err.read_to_string(&mut buf);
        }
        buf
    };

    Ok((status, stderr))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = RendererConfig::default()
            .renderer_path("/usr/bin/abc2midi")
            .timeout_secs(30);

        assert_eq!(
            config.renderer_path,
            Some(PathBuf::from("/usr/bin/abc2midi"))
        );
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_default_timeout() {
        let config = RendererConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_wait_with_timeout_captures_stderr() {
        let mut cmd = if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", "echo hello 1>&2"]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", "echo hello 1>&2"]);
            cmd
        };

        cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        let child = cmd.spawn().unwrap();

        let (status, stderr) = wait_with_timeout(child, Duration::from_secs(2)).unwrap();
        assert!(status.success());
        assert!(stderr.to_lowercase().contains("hello"));
    }

    #[test]
    fn test_wait_with_timeout_kills_slow_process() {
        if cfg!(windows) {
            return;
        }
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "sleep 5"]);
        cmd.stdout(Stdio::null()).stderr(Stdio::piped());
        let child = cmd.spawn().unwrap();

        let result = wait_with_timeout(child, Duration::from_millis(200));
        assert!(matches!(result, Err(AbcError::Timeout { .. })));
    }
}
