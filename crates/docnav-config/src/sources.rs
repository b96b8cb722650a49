//! Reading the content manifest and sidebar declarations.
//!
//! Both files are picked up by extension:
//! - `.yaml` / `.yml` - YAML
//! - `.json` - JSON
//! - `.toml` - TOML (the manifest then needs a top-level `entries` key)

use std::collections::BTreeMap;
use std::path::Path;

use docnav_site::{ContentEntry, Node};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::ConfigError;

/// Manifest layout: a bare list, or a table with an `entries` list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestDocument {
    List(Vec<ContentEntry>),
    Table { entries: Vec<ContentEntry> },
}

impl From<ManifestDocument> for Vec<ContentEntry> {
    fn from(doc: ManifestDocument) -> Self {
        match doc {
            ManifestDocument::List(entries) | ManifestDocument::Table { entries } => entries,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
    Toml,
}

impl Format {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Parse `content` in the given format, attributing errors to `path`.
fn parse<T: DeserializeOwned>(content: &str, format: Format, path: &Path) -> Result<T, ConfigError> {
    let source_error = |message: String| ConfigError::Source {
        path: path.to_path_buf(),
        message,
    };
    match format {
        Format::Yaml => serde_yaml::from_str(content).map_err(|e| source_error(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| source_error(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| source_error(e.to_string())),
    }
}

fn read_source<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let format = Format::from_path(path)?;
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path)?;
    parse(&content, format, path)
}

/// Read the content manifest.
///
/// # Errors
///
/// Returns an error if the file is missing, has an unknown extension, or
/// cannot be parsed.
pub(crate) fn read_manifest(path: &Path) -> Result<Vec<ContentEntry>, ConfigError> {
    let entries: Vec<ContentEntry> = read_source::<ManifestDocument>(path)?.into();
    tracing::debug!(path = %path.display(), entries = entries.len(), "Read content manifest");
    Ok(entries)
}

/// Read sidebar declarations keyed by sidebar name.
///
/// # Errors
///
/// Returns an error if the file is missing, has an unknown extension, or
/// cannot be parsed.
pub(crate) fn read_sidebars(path: &Path) -> Result<BTreeMap<String, Vec<Node>>, ConfigError> {
    let sidebars: BTreeMap<String, Vec<Node>> = read_source(path)?;
    tracing::debug!(path = %path.display(), sidebars = sidebars.len(), "Read sidebar declarations");
    Ok(sidebars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_read_yaml_manifest_list() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "manifest.yaml",
            "- intro\n- id: deployment\n  label: Deploying\n",
        );

        let entries = read_manifest(&path).unwrap();

        assert_eq!(
            entries,
            vec![
                ContentEntry::new("intro"),
                ContentEntry::new("deployment").with_label("Deploying"),
            ]
        );
    }

    #[test]
    fn test_read_json_manifest_table() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "manifest.json", r#"{"entries": ["intro", "setup"]}"#);

        let entries = read_manifest(&path).unwrap();

        assert_eq!(entries, vec![ContentEntry::new("intro"), ContentEntry::new("setup")]);
    }

    #[test]
    fn test_read_toml_manifest_requires_entries_key() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "manifest.toml", "entries = [\"intro\"]\n");

        let entries = read_manifest(&path).unwrap();

        assert_eq!(entries, vec![ContentEntry::new("intro")]);
    }

    #[test]
    fn test_manifest_keeps_duplicates_for_validation() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "manifest.yaml", "- intro\n- intro\n");

        let entries = read_manifest(&path).unwrap();

        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_read_yaml_sidebars() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "sidebars.yaml",
            r"
patternsSidebar:
  - intro
  - type: category
    label: Core Patterns
    items:
      - distributed-systems-core
      - data-management
  - contributing
",
        );

        let sidebars = read_sidebars(&path).unwrap();

        assert_eq!(
            sidebars["patternsSidebar"],
            vec![
                Node::doc("intro"),
                Node::category(
                    "Core Patterns",
                    vec![Node::doc("distributed-systems-core"), Node::doc("data-management")],
                ),
                Node::doc("contributing"),
            ]
        );
    }

    #[test]
    fn test_read_toml_sidebars_with_mixed_items() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "sidebars.toml",
            r#"docs = ["intro", { type = "category", label = "Guides", items = ["setup"] }]"#,
        );

        let sidebars = read_sidebars(&path).unwrap();

        assert_eq!(
            sidebars["docs"],
            vec![Node::doc("intro"), Node::category("Guides", vec![Node::doc("setup")])]
        );
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "manifest.txt", "intro");

        let err = read_manifest(&path).unwrap_err();

        assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_missing_file_reported() {
        let dir = TempDir::new().unwrap();

        let err = read_sidebars(&dir.path().join("sidebars.yaml")).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_malformed_source_names_file() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "sidebars.json", "{not json");

        let err = read_sidebars(&path).unwrap_err();

        assert!(matches!(err, ConfigError::Source { .. }));
        assert!(err.to_string().contains("sidebars.json"));
    }
}
