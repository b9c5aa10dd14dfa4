//! Get and set command implementations
//!
//! `ruleplan get` prints the value found at a path inside a JSON document.
//! `ruleplan set` writes a JSON value at a path, creating intermediate
//! containers, and saves the document back.

use crate::cli::common::{EXIT_ERROR, EXIT_FAILURE, EXIT_SUCCESS};
use crate::error::PathError;
use crate::path::{get_nested, set_nested};
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Run the get command
///
/// # Returns
///
/// Exit code:
/// - 0: The path resolved; the value is printed as JSON
/// - 1: Nothing exists at the path
/// - 2: The document could not be read or parsed
pub fn run_get(file: &Path, path: &str) -> i32 {
    match get_value(file, path) {
        Ok(Some(value)) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{}", text);
                EXIT_SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                EXIT_ERROR
            }
        },
        Ok(None) => {
            eprintln!("No value at '{}'", path);
            EXIT_FAILURE
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

/// Run the set command
///
/// A missing document starts out as an empty object.
///
/// # Returns
///
/// Exit code:
/// - 0: The value was written
/// - 2: The document or value could not be read, parsed or written
pub fn run_set(file: &Path, path: &str, value: &str) -> i32 {
    match set_value(file, path, value) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    }
}

/// Read the document and look up `path`
pub(crate) fn get_value(file: &Path, path: &str) -> Result<Option<Value>, PathError> {
    let document = read_document(file)?;
    Ok(get_nested(&document, path).cloned())
}

/// Parse `value`, write it at `path` and save the document
pub(crate) fn set_value(file: &Path, path: &str, value: &str) -> Result<(), PathError> {
    let value: Value = serde_json::from_str(value).map_err(|source| PathError::Json {
        context: "value argument".to_string(),
        source,
    })?;

    let mut document = if file.exists() {
        read_document(file)?
    } else {
        debug!(file = %file.display(), "Document not found, starting from an empty object");
        Value::Object(serde_json::Map::new())
    };

    set_nested(&mut document, path, value);

    let mut text = serde_json::to_string_pretty(&document).map_err(|source| PathError::Json {
        context: file.display().to_string(),
        source,
    })?;
    text.push('\n');
    fs::write(file, text).map_err(|source| PathError::Io {
        file: file.to_path_buf(),
        source,
    })
}

fn read_document(file: &Path) -> Result<Value, PathError> {
    let content = fs::read_to_string(file).map_err(|source| PathError::Io {
        file: file.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| PathError::Json {
        context: file.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_get_value() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("doc.json");
        fs::write(&file, r#"{"user": {"tags": ["a", "b"]}}"#).unwrap();

        assert_eq!(get_value(&file, "user.tags[1]").unwrap(), Some(json!("b")));
        assert_eq!(get_value(&file, "user.missing").unwrap(), None);
    }

    #[test]
    fn test_get_value_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = get_value(&dir.path().join("absent.json"), "a");
        assert!(matches!(result, Err(PathError::Io { .. })));
    }

    #[test]
    fn test_get_value_invalid_json() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("doc.json");
        fs::write(&file, "{not json").unwrap();
        assert!(matches!(get_value(&file, "a"), Err(PathError::Json { .. })));
    }

    #[test]
    fn test_set_value_creates_document() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("doc.json");

        set_value(&file, "addresses[1].city", r#""Paris""#).unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(written, json!({"addresses": [null, {"city": "Paris"}]}));
    }

    #[test]
    fn test_set_value_updates_existing_document() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("doc.json");
        fs::write(&file, r#"{"name": "x", "meta": {"a": 1}}"#).unwrap();

        set_value(&file, "meta.b", "2").unwrap();

        let written: Value = serde_json::from_str(&fs::read_to_string(&file).unwrap()).unwrap();
        assert_eq!(written, json!({"name": "x", "meta": {"a": 1, "b": 2}}));
    }

    #[test]
    fn test_set_value_rejects_invalid_value() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("doc.json");
        let result = set_value(&file, "a", "Paris");
        assert!(matches!(result, Err(PathError::Json { ref context, .. }) if context == "value argument"));
        assert!(!file.exists());
    }
}
