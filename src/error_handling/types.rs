//! Error type definitions.
//!
//! This module defines the error and skip types used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Errors raised while accepting a link or publishing its result.
#[derive(Error, Debug)]
pub enum CheckError {
    /// Input is longer than the accepted maximum.
    #[error("URL exceeds maximum length ({length} > {max})")]
    TooLong { length: usize, max: usize },

    /// Input is empty after trimming.
    #[error("URL is empty")]
    Empty,

    /// Input could not be parsed as a URL.
    #[error("Invalid URL '{0}'")]
    InvalidUrl(String),

    /// URL parsed but does not use http or https.
    #[error("Unsupported scheme '{scheme}' in URL '{url}'")]
    UnsupportedScheme { scheme: String, url: String },

    /// URL has no host component.
    #[error("URL '{0}' has no host")]
    MissingHost(String),

    /// Writing a rendered result card failed.
    #[error("Failed to write result card to {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons a link did not produce a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum SkipReason {
    /// The input was rejected during URL validation
    InvalidUrl,
    /// A newer request or shutdown cancelled the check
    Cancelled,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::InvalidUrl => "Invalid URL",
            SkipReason::Cancelled => "Cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_check_error_messages() {
        let err = CheckError::TooLong {
            length: 3000,
            max: 2048,
        };
        assert_eq!(err.to_string(), "URL exceeds maximum length (3000 > 2048)");

        let err = CheckError::UnsupportedScheme {
            scheme: "ftp".to_string(),
            url: "ftp://example.com".to_string(),
        };
        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_skip_reason_strings_are_distinct() {
        let names: Vec<&str> = SkipReason::iter().map(|r| r.as_str()).collect();
        assert_eq!(names, vec!["Invalid URL", "Cancelled"]);
    }
}
