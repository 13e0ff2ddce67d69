//! Error types for song descriptor validation and processing.

use thiserror::Error;

/// Error codes for song descriptor validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// E001: No sections declared
    NoSections,
    /// E002: No instruments declared
    NoInstruments,
    /// E003: Structure references an undefined section
    UnknownSection,
    /// E004: Section declares zero bars
    ZeroBars,
    /// E005: Melodic instrument missing MIDI program
    MissingProgram,
    /// E006: Tempo is zero
    InvalidTempo,
    /// E007: Empty structure order
    EmptyStructure,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "E001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::NoSections => "E001",
            ErrorCode::NoInstruments => "E002",
            ErrorCode::UnknownSection => "E003",
            ErrorCode::ZeroBars => "E004",
            ErrorCode::MissingProgram => "E005",
            ErrorCode::InvalidTempo => "E006",
            ErrorCode::EmptyStructure => "E007",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Warning codes for song descriptor validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WarningCode {
    /// W001: Missing composer
    MissingComposer,
    /// W002: Section defined but never arranged
    UnusedSection,
    /// W003: Instrument with no notation in any section
    SilentInstrument,
}

impl WarningCode {
    /// Returns the warning code string (e.g., "W001").
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::MissingComposer => "W001",
            WarningCode::UnusedSection => "W002",
            WarningCode::SilentInstrument => "W003",
        }
    }
}

impl std::fmt::Display for WarningCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A validation error with code, message, and optional YAML path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// The error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// YAML path to the problematic field (e.g., "sections.verse.bars").
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation error with a YAML path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

/// A validation warning with code, message, and optional YAML path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The warning code.
    pub code: WarningCode,
    /// Human-readable warning message.
    pub message: String,
    /// YAML path to the problematic field.
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a new validation warning.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a new validation warning with a YAML path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref path) = self.path {
            write!(f, "{}: {} (at {})", self.code, self.message, path)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

/// Top-level error type for descriptor operations.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Descriptor validation failed with one or more errors.
    #[error("song validation failed with {0} error(s)")]
    ValidationFailed(usize),

    /// YAML parsing error.
    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    /// A named section is not defined in the structure.
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// A named instrument is not defined in the structure.
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of song descriptor validation.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether validation passed (no errors).
    pub ok: bool,
    /// List of validation errors.
    pub errors: Vec<ValidationError>,
    /// List of validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    /// Creates a successful validation result.
    pub fn success() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Creates a failed validation result.
    pub fn failure(errors: Vec<ValidationError>) -> Self {
        Self {
            ok: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// Adds an error to the result.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
        self.ok = false;
    }

    /// Adds a warning to the result.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Returns true if there are no errors.
    pub fn is_ok(&self) -> bool {
        self.ok
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::success()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::NoSections.code(), "E001");
        assert_eq!(ErrorCode::UnknownSection.code(), "E003");
        assert_eq!(ErrorCode::EmptyStructure.code(), "E007");
    }

    #[test]
    fn test_warning_codes() {
        assert_eq!(WarningCode::MissingComposer.code(), "W001");
        assert_eq!(WarningCode::SilentInstrument.code(), "W003");
    }

    #[test]
    fn test_validation_error_display() {
        let err = ValidationError::new(ErrorCode::InvalidTempo, "tempo must be positive");
        assert_eq!(err.to_string(), "E006: tempo must be positive");

        let err_with_path = ValidationError::with_path(
            ErrorCode::ZeroBars,
            "section has zero bars",
            "sections.intro.bars",
        );
        assert_eq!(
            err_with_path.to_string(),
            "E004: section has zero bars (at sections.intro.bars)"
        );
    }

    #[test]
    fn test_validation_result() {
        let mut result = ValidationResult::success();
        assert!(result.is_ok());

        result.add_error(ValidationError::new(ErrorCode::NoSections, "no sections"));
        assert!(!result.is_ok());
        assert_eq!(result.errors.len(), 1);
    }
}
