//! Loading scripts from disk.

use std::path::{Path, PathBuf};

use grimoire_core::error::DomainError;
use serde_json::Value;
use tracing::{info, instrument};

use crate::domain::script::{Script, parse_script};

/// Decodes a script document. The document must be a JSON array; individual
/// malformed records inside it are dropped by [`parse_script`].
///
/// # Errors
///
/// Returns `DomainError::MalformedScript` if the text is not a JSON array.
pub fn parse_script_str(text: &str) -> Result<Script, DomainError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| DomainError::MalformedScript(format!("invalid JSON: {e}")))?;
    match value {
        Value::Array(entries) => Ok(parse_script(&entries)),
        other => Err(DomainError::MalformedScript(format!(
            "expected a list of role records, found {}",
            json_type_name(&other)
        ))),
    }
}

/// Reads and parses the script at `path`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the file cannot be read and
/// `DomainError::MalformedScript` if it is not a JSON array.
#[instrument(skip(path), fields(path = %path.display()))]
pub async fn load_script(path: &Path) -> Result<Script, DomainError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        DomainError::Infrastructure(format!("failed to read {}: {e}", path.display()))
    })?;
    let script = parse_script_str(&text)?;
    info!(
        roles = script.roles.len(),
        first_night = script.night_order.first_night.len(),
        other_night = script.night_order.other_night.len(),
        "script loaded"
    );
    Ok(script)
}

/// A directory of `*.json` script files.
#[derive(Debug, Clone)]
pub struct ScriptLibrary {
    dir: PathBuf,
}

impl ScriptLibrary {
    /// Creates a library rooted at `dir`.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Lists the script file names in the library, sorted. A missing or
    /// unreadable directory lists as empty.
    pub async fn list(&self) -> Vec<String> {
        let Ok(mut entries) = tokio::fs::read_dir(&self.dir).await else {
            return Vec::new();
        };
        let mut names = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.to_lowercase().ends_with(".json") {
                names.push(name);
            }
        }
        names.sort();
        names
    }

    /// Resolves `name` against the library; absolute paths are kept as is.
    #[must_use]
    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.dir.join(path)
        }
    }

    /// Loads the script called `name`.
    ///
    /// # Errors
    ///
    /// See [`load_script`].
    pub async fn load(&self, name: &str) -> Result<Script, DomainError> {
        load_script(&self.resolve(name)).await
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    const SCRIPT: &str = r#"[
        { "id": "_meta", "name": "Test Script" },
        { "id": "imp", "name": "Imp", "team": "demon", "otherNight": 24 }
    ]"#;

    fn scratch_dir() -> PathBuf {
        std::env::temp_dir().join(format!("grimoire-script-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_parse_script_str_rejects_non_array_document() {
        let result = parse_script_str(r#"{ "id": "imp" }"#);

        match result {
            Err(DomainError::MalformedScript(msg)) => assert!(msg.contains("an object")),
            other => panic!("expected MalformedScript, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_script_str_rejects_invalid_json() {
        assert!(matches!(
            parse_script_str("[{"),
            Err(DomainError::MalformedScript(_))
        ));
    }

    #[tokio::test]
    async fn test_library_lists_and_loads_json_scripts() {
        // Arrange
        let dir = scratch_dir();
        tokio::fs::create_dir_all(&dir).await.unwrap();
        tokio::fs::write(dir.join("b.json"), SCRIPT).await.unwrap();
        tokio::fs::write(dir.join("A.JSON"), SCRIPT).await.unwrap();
        tokio::fs::write(dir.join("notes.txt"), "ignore me").await.unwrap();
        let library = ScriptLibrary::new(&dir);

        // Act
        let names = library.list().await;
        let script = library.load("b.json").await.unwrap();

        // Assert
        assert_eq!(names, vec!["A.JSON".to_owned(), "b.json".to_owned()]);
        assert_eq!(script.meta.name.as_deref(), Some("Test Script"));
        assert_eq!(script.night_order.other_night.len(), 1);

        tokio::fs::remove_dir_all(&dir).await.unwrap();
    }

    #[tokio::test]
    async fn test_library_on_missing_directory_lists_nothing() {
        let library = ScriptLibrary::new(scratch_dir());

        assert!(library.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_script_reports_missing_file_as_infrastructure_error() {
        let result = load_script(&scratch_dir().join("missing.json")).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
