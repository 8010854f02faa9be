//! # Payload Input
//!
//! Reads a payload file into a JSON value. The format follows the file
//! extension (`.yaml`/`.yml` is YAML, anything else JSON) unless
//! `--format` overrides it.

use std::path::Path;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde_json::Value;

/// Payload file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// JSON.
    Json,
    /// YAML.
    Yaml,
}

impl InputFormat {
    /// Guess the format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Read and parse the payload at `path`.
pub fn load_payload(path: &Path, format: Option<InputFormat>) -> Result<Value> {
    let format = format.unwrap_or_else(|| InputFormat::from_path(path));
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    tracing::debug!(path = %path.display(), ?format, "loading payload");
    match format {
        InputFormat::Json => serde_json::from_str(&content)
            .with_context(|| format!("{} is not valid JSON", path.display())),
        InputFormat::Yaml => serde_yaml::from_str(&content)
            .with_context(|| format!("{} is not valid YAML", path.display())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a.yaml")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.YML")), InputFormat::Yaml);
        assert_eq!(InputFormat::from_path(Path::new("a.json")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("payload")), InputFormat::Json);
    }

    #[test]
    fn loads_json_and_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("p.json");
        std::fs::write(&json_path, r#"{"title": "CAD"}"#).unwrap();
        let yaml_path = dir.path().join("p.yaml");
        std::fs::write(&yaml_path, "title: CAD\n").unwrap();

        assert_eq!(load_payload(&json_path, None).unwrap(), json!({"title": "CAD"}));
        assert_eq!(load_payload(&yaml_path, None).unwrap(), json!({"title": "CAD"}));
    }

    #[test]
    fn format_override_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payload.txt");
        std::fs::write(&path, "title: CAD\n").unwrap();
        assert!(load_payload(&path, None).is_err());
        assert_eq!(
            load_payload(&path, Some(InputFormat::Yaml)).unwrap(),
            json!({"title": "CAD"})
        );
    }

    #[test]
    fn missing_file_names_path() {
        let err = load_payload(Path::new("/nonexistent/payload.json"), None).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/payload.json"));
    }
}
