//! Error types for configuration loading and persistence.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the configuration store and its document codec.
///
/// Parse and I/O failures during loading are absorbed by the codec and never
/// reach the caller of a store constructor. Everything here that a caller
/// does see comes from a write path (`set`, `save`, `remove`) or from parsing
/// user input.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse document {}: {message}", display_path(.path))]
    DocumentParse {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("No document path for the {layer} layer")]
    MissingPath { layer: String },

    #[error("Invalid config layer '{0}' (expected system, runner or game)")]
    InvalidLayer(String),

    #[error("The {layer} document must be a mapping")]
    NotAMapping { layer: String },

    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML serialization failed: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    pub fn missing_path(layer: impl ToString) -> Self {
        Self::MissingPath {
            layer: layer.to_string(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(p) => p.display().to_string(),
        None => "<inline>".to_string(),
    }
}

/// Result type for configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_message_names_layer() {
        let err = ConfigError::missing_path("runner");
        assert_eq!(err.to_string(), "No document path for the runner layer");
    }

    #[test]
    fn test_parse_error_without_path() {
        let err = ConfigError::DocumentParse {
            path: None,
            message: "bad indent".into(),
        };
        assert!(err.to_string().contains("<inline>"));
        assert!(err.to_string().contains("bad indent"));
    }
}
