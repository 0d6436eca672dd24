//! YAML document codec.
//!
//! A document is a top-level YAML mapping. Reading is forgiving: a missing
//! file, an unreadable file or malformed YAML all produce an empty document
//! (the failure is logged). Writing is strict and reports every error.

use crate::error::{ConfigError, ConfigResult};
use serde_yaml::{Mapping, Value};
use std::path::Path;
use tracing::{debug, error};

/// A configuration document: an insertion-ordered YAML mapping.
pub type Document = Mapping;

/// Parse YAML text into a document.
///
/// Empty text and an explicit `null` both yield an empty document. A valid
/// YAML value that is not a mapping (a list, a bare scalar) is rejected.
pub fn parse_document(text: &str) -> ConfigResult<Document> {
    parse_with_path(text, None)
}

fn parse_with_path(text: &str, path: Option<&Path>) -> ConfigResult<Document> {
    let parse_error = |message: String| ConfigError::DocumentParse {
        path: path.map(Path::to_path_buf),
        message,
    };

    let value: Value = serde_yaml::from_str(text).map_err(|e| parse_error(e.to_string()))?;
    match value {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        other => Err(parse_error(format!(
            "expected a mapping at the top level, found {}",
            value_kind(&other)
        ))),
    }
}

/// Read a document from disk, substituting an empty document on any failure.
pub fn read_document(path: Option<&Path>) -> Document {
    let Some(path) = path else {
        return Mapping::new();
    };
    if !path.exists() {
        debug!(path = %path.display(), "No document on disk");
        return Mapping::new();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error reading config document");
            return Mapping::new();
        }
    };

    match parse_with_path(&content, Some(path)) {
        Ok(doc) => doc,
        Err(e) => {
            error!(path = %path.display(), error = %e, "Error parsing config document");
            Mapping::new()
        }
    }
}

/// Render a document as block-style YAML.
pub fn render_document(doc: &Document) -> ConfigResult<String> {
    if doc.is_empty() {
        // serde_yaml renders an empty mapping in flow style.
        return Ok(String::new());
    }
    Ok(serde_yaml::to_string(doc)?)
}

/// Write a document to disk, replacing any existing file.
///
/// The parent directory is created when missing.
pub fn write_document(path: Option<&Path>, doc: &Document) -> ConfigResult<()> {
    let path = path.ok_or_else(|| ConfigError::missing_path("document"))?;
    let yaml = render_document(doc)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::io(parent, e))?;
    }
    std::fs::write(path, yaml).map_err(|e| ConfigError::io(path, e))
}

/// Short human name for the kind of a YAML value.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}
