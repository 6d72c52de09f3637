//! Error types for tincture-core

use std::fmt::Write;
use thiserror::Error;

/// Actionable remediation guidance for an error
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Remediation {
    /// One-line summary of how to fix the issue
    pub summary: String,
    /// Example inputs that are accepted
    pub examples: Vec<String>,
    /// Additional alternative guidance
    pub alternatives: Vec<String>,
}

impl Remediation {
    /// Create a new remediation with a summary
    #[must_use]
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            examples: Vec::new(),
            alternatives: Vec::new(),
        }
    }

    /// Add an accepted example input
    #[must_use]
    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Add an alternative suggestion
    #[must_use]
    pub fn alternative(mut self, alternative: impl Into<String>) -> Self {
        self.alternatives.push(alternative.into());
        self
    }

    /// Render remediation text for human-readable output
    #[must_use]
    pub fn render_plain(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "To fix:");
        let _ = writeln!(output, "  {}", self.summary);

        if !self.examples.is_empty() {
            let _ = writeln!(output, "  Examples:");
            for example in &self.examples {
                let _ = writeln!(output, "    - {example}");
            }
        }

        if !self.alternatives.is_empty() {
            let _ = writeln!(output, "  Alternatives:");
            for alt in &self.alternatives {
                let _ = writeln!(output, "    - {alt}");
            }
        }

        output
    }
}

/// Result type alias using the library's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tincture-core
#[derive(Error, Debug)]
pub enum Error {
    /// Conversion that has no implementation (LAB in both directions)
    #[error("Not implemented: {0}")]
    NotImplemented(String),

    /// Input that does not describe a color
    #[error("Malformed format: {0}")]
    MalformedFormat(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedFormat(message.into())
    }

    pub(crate) fn not_implemented(message: impl Into<String>) -> Self {
        Self::NotImplemented(message.into())
    }

    /// Return remediation guidance when available.
    #[must_use]
    pub fn remediation(&self) -> Option<Remediation> {
        match self {
            Self::NotImplemented(_) => Some(
                Remediation::new("LAB conversion is not available. Use another color space.")
                    .example("hsv(0.5, 0.4, 0.9)")
                    .example("cmyk(0, 0.2, 0.1, 0.8)"),
            ),
            Self::MalformedFormat(_) => Some(
                Remediation::new("Use one of the accepted color notations.")
                    .example("#a0c")
                    .example("rgb(0, 10, 100)")
                    .example("rgba(50%, 20%, 0%, 100%)")
                    .example("fa(0.1, 0.1, 0.5, 1.0)")
                    .example("random(\"#a00\", \"rgb(0, 100, 100)\")")
                    .alternative("Pass a JSON object such as {\"r\": 10, \"g\": 20, \"b\": 30}."),
            ),
            Self::Config(err) => Some(err.remediation()),
            Self::Io(_) => Some(
                Remediation::new("Check filesystem permissions and paths, then retry.")
                    .alternative("Verify the file exists and is readable."),
            ),
            Self::Json(_) => Some(
                Remediation::new("Validate the JSON input and retry.")
                    .alternative("Check for trailing commas or invalid UTF-8."),
            ),
        }
    }
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read config file {0}: {1}")]
    ReadFailed(String, String),

    #[error("Failed to parse config: {0}")]
    ParseFailed(String),

    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ConfigError {
    #[must_use]
    pub fn remediation(&self) -> Remediation {
        match self {
            Self::FileNotFound(path) => Remediation::new(format!(
                "Config file not found: {path}. Verify the path and retry."
            ))
            .alternative("Pass --config with the correct path."),
            Self::ReadFailed(path, _) => Remediation::new(format!(
                "Failed to read config file: {path}. Check permissions."
            ))
            .alternative("Ensure the file is readable by the current user."),
            Self::ParseFailed(_) => Remediation::new("Config parse failed. Fix the syntax and retry.")
                .example("[conversion]\nprecision = 4"),
            Self::ValidationError(_) => {
                Remediation::new("Config validation failed. Adjust the offending value.")
                    .alternative("Precision must be between 0 and 15 decimal digits.")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_format_has_examples() {
        let err = Error::malformed("Format was not recognized. Input: nope");
        assert_eq!(
            err.to_string(),
            "Malformed format: Format was not recognized. Input: nope"
        );
        let remediation = err.remediation().unwrap();
        assert!(remediation.examples.iter().any(|e| e.starts_with("rgb(")));
    }

    #[test]
    fn render_plain_lists_sections() {
        let text = Remediation::new("Do the thing.")
            .example("#fff")
            .alternative("Or the other thing.")
            .render_plain();
        assert!(text.starts_with("To fix:\n  Do the thing.\n"));
        assert!(text.contains("  Examples:\n    - #fff\n"));
        assert!(text.contains("  Alternatives:\n    - Or the other thing.\n"));
    }

    #[test]
    fn config_error_converts() {
        let err: Error = ConfigError::ValidationError("precision 99".to_string()).into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.remediation().is_some());
    }
}
