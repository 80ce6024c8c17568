//! Error types for the blocksite core library.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias using `CoreError`.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error types for blocksite.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration loading or parsing error.
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// File system I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic configuration crate error.
    #[error("Config crate error: {0}")]
    ConfigCrate(#[from] config::ConfigError),
}

impl CoreError {
    /// Create a new configuration error with a message.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source.
    pub fn config_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Failures while loading the record source document.
///
/// Both variants are raised before anything is rendered or written.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The source document does not exist.
    #[error("source document not found: {}", path.display())]
    Missing { path: PathBuf },

    /// The source document exists but is not a non-empty array of records.
    #[error("source document {} is invalid: {message}", path.display())]
    Invalid { path: PathBuf, message: String },

    /// The source document could not be read.
    #[error("failed to read source document {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SourceError {
    /// Create a new invalid-source error.
    pub fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error() {
        let err = CoreError::config("missing field");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("missing field"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CoreError = io_err.into();
        assert!(err.to_string().contains("IO error"));
    }

    #[test]
    fn test_source_missing_names_path() {
        let err = SourceError::Missing {
            path: PathBuf::from("data/blocks.json"),
        };
        assert!(err.to_string().contains("not found"));
        assert!(err.to_string().contains("data/blocks.json"));
    }

    #[test]
    fn test_source_invalid_message() {
        let err = SourceError::invalid("blocks.json", "array is empty");
        let msg = err.to_string();
        assert!(msg.contains("blocks.json"));
        assert!(msg.contains("array is empty"));
    }
}
