//! YAML parsing with rich diagnostics

pub mod diagnostics;

pub use diagnostics::{YamlError, YamlSyntaxError};

use serde::de::DeserializeOwned;
use std::path::Path;

/// Parse a YAML file into the given type, attaching source diagnostics on failure
pub fn parse_yaml_file<T: DeserializeOwned + 'static>(path: &Path) -> Result<T, YamlError> {
    let content = std::fs::read_to_string(path)?;
    serde_yml::from_str(&content).map_err(|e| {
        YamlSyntaxError::from_serde_error(&e, &content, &path.to_string_lossy()).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_yaml_file_ok() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "name: probe\ncount: 3").unwrap();

        let value: serde_json::Value = parse_yaml_file(file.path()).unwrap();
        assert_eq!(value["count"], 3);
    }

    #[test]
    fn test_parse_yaml_file_syntax_error() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "name: [unclosed").unwrap();

        let err = parse_yaml_file::<serde_json::Value>(file.path()).unwrap_err();
        assert!(matches!(err, YamlError::Syntax(_)));
    }

    #[test]
    fn test_parse_yaml_file_missing() {
        let err =
            parse_yaml_file::<serde_json::Value>(Path::new("/nonexistent/file.yaml")).unwrap_err();
        assert!(matches!(err, YamlError::Io(_)));
    }
}
