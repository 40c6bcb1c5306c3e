//! Error types for the segmentation engine
//!
//! Only configuration problems and unavailable tools surface to callers.
//! Subprocess and I/O instabilities are absorbed inside the parsers.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors, raised while building a [`crate::ParserConfig`]
/// or reading a language file. Never raised mid-parse.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A regex fragment did not compile
    #[error("Invalid {field} pattern '{pattern}': {source}")]
    InvalidPattern {
        /// Name of the offending setting
        field: &'static str,
        /// The fragment as supplied
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// A required setting was empty
    #[error("Missing required setting: {0}")]
    MissingField(&'static str),

    /// The language file could not be read
    #[error("Failed to read file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The language file is not valid TOML for the expected shape
    #[error("Failed to parse TOML from '{path}': {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Errors returned by [`crate::Parser::parse`]
#[derive(Debug, Error)]
pub enum ParseError {
    /// The strategy wraps a binary that is not installed
    #[error("Parser '{parser}' is unavailable: {message}")]
    Unavailable { parser: String, message: String },
}

/// Recoverable failures of an external tool invocation.
///
/// These are logged and turned into an empty result by the caller.
#[derive(Debug, Error)]
pub(crate) enum ToolError {
    #[error("failed to launch '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while talking to the tool: {0}")]
    Io(#[from] std::io::Error),

    #[error("tool exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("tool did not finish within {0:?}")]
    Timeout(std::time::Duration),
}

/// Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_error_display() {
        let err = ParseError::Unavailable {
            parser: "jieba".to_string(),
            message: "Binary 'jieba' not found in PATH".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Parser 'jieba' is unavailable: Binary 'jieba' not found in PATH"
        );
    }

    #[test]
    fn test_invalid_pattern_display_names_field() {
        let source = regex::Regex::new("[a-").unwrap_err();
        let err = ConfigError::InvalidPattern {
            field: "word_characters",
            pattern: "a-".to_string(),
            source,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("Invalid word_characters pattern 'a-'"));
    }

    #[test]
    fn test_missing_field_display() {
        let err = ConfigError::MissingField("word_characters");
        assert_eq!(err.to_string(), "Missing required setting: word_characters");
    }
}
