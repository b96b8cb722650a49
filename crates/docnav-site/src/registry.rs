//! Registry of declared content identifiers.
//!
//! Built once from the content manifest and read-only afterwards. Navigation
//! and settings validation look ids up here to decide whether a reference
//! resolves.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A content document declared in the manifest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ManifestItem")]
pub struct ContentEntry {
    /// Unique, case-sensitive identifier.
    pub id: String,
    /// Optional display label used when a sidebar does not provide one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ContentEntry {
    /// Create an entry without a display label.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: None,
        }
    }

    /// Set the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// Manifest item as written: either a bare id or a table.
#[derive(Deserialize)]
#[serde(untagged)]
enum ManifestItem {
    Id(String),
    Entry {
        id: String,
        #[serde(default)]
        label: Option<String>,
    },
}

impl From<ManifestItem> for ContentEntry {
    fn from(item: ManifestItem) -> Self {
        match item {
            ManifestItem::Id(id) => Self { id, label: None },
            ManifestItem::Entry { id, label } => Self { id, label },
        }
    }
}

/// Error returned by [`Registry::try_build`].
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The manifest declares the same id twice.
    #[error("Duplicate content identifier: {0}")]
    Duplicate(String),
}

/// Lookup structure over declared content entries.
///
/// Entries keep manifest order; lookups are O(1) by id.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    entries: Vec<ContentEntry>,
    index: HashMap<String, usize>,
}

impl Registry {
    /// Build a registry, reporting every duplicate id.
    ///
    /// The first declaration of a duplicated id is kept so validation of
    /// references can continue against a usable registry.
    pub fn build<I>(entries: I) -> (Self, Vec<ValidationError>)
    where
        I: IntoIterator<Item = ContentEntry>,
    {
        let mut registry = Self::default();
        let mut errors = Vec::new();

        for entry in entries {
            if registry.index.contains_key(&entry.id) {
                tracing::warn!(id = %entry.id, "Duplicate content identifier in manifest");
                errors.push(ValidationError::duplicate_identifier(&entry.id));
                continue;
            }
            registry.insert(entry);
        }

        (registry, errors)
    }

    /// Build a registry, failing on the first duplicate id.
    pub fn try_build<I>(entries: I) -> Result<Self, RegistryError>
    where
        I: IntoIterator<Item = ContentEntry>,
    {
        let mut registry = Self::default();
        for entry in entries {
            if registry.index.contains_key(&entry.id) {
                return Err(RegistryError::Duplicate(entry.id));
            }
            registry.insert(entry);
        }
        Ok(registry)
    }

    fn insert(&mut self, entry: ContentEntry) {
        self.index.insert(entry.id.clone(), self.entries.len());
        self.entries.push(entry);
    }

    /// Whether `id` is declared. Case-sensitive.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Get a declared entry by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ContentEntry> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    /// Declared ids in manifest order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.id.as_str())
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;

    fn entries(ids: &[&str]) -> Vec<ContentEntry> {
        ids.iter().map(|id| ContentEntry::new(*id)).collect()
    }

    #[test]
    fn test_empty_manifest_produces_empty_registry() {
        let (registry, errors) = Registry::build(Vec::new());

        assert!(registry.is_empty());
        assert!(errors.is_empty());
        assert!(!registry.contains("intro"));
    }

    #[test]
    fn test_declared_ids_are_found() {
        let (registry, errors) = Registry::build(entries(&["intro", "deployment"]));

        assert!(errors.is_empty());
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("intro"));
        assert!(registry.contains("deployment"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let (registry, _) = Registry::build(entries(&["intro"]));

        assert!(!registry.contains("Intro"));
    }

    #[test]
    fn test_duplicate_id_reports_error() {
        let (registry, errors) = Registry::build(entries(&["intro", "intro"]));

        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ValidationErrorKind::DuplicateIdentifier);
        assert_eq!(errors[0].reference.as_deref(), Some("intro"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_keeps_first_declaration() {
        let manifest = vec![
            ContentEntry::new("intro").with_label("First"),
            ContentEntry::new("intro").with_label("Second"),
        ];

        let (registry, _) = Registry::build(manifest);

        assert_eq!(
            registry.get("intro").and_then(|e| e.label.as_deref()),
            Some("First")
        );
    }

    #[test]
    fn test_each_repetition_is_reported() {
        let (_, errors) = Registry::build(entries(&["a", "a", "b", "a"]));

        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_differently_cased_ids_are_distinct() {
        let (registry, errors) = Registry::build(entries(&["intro", "Intro"]));

        assert!(errors.is_empty());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_try_build_fails_on_duplicate() {
        let err = Registry::try_build(entries(&["intro", "intro"])).unwrap_err();

        assert!(matches!(err, RegistryError::Duplicate(ref id) if id == "intro"));
        assert!(err.to_string().contains("intro"));
    }

    #[test]
    fn test_try_build_succeeds_on_unique_ids() {
        let registry = Registry::try_build(entries(&["intro", "deployment"])).unwrap();

        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_ids_preserve_manifest_order() {
        let (registry, _) = Registry::build(entries(&["zeta", "alpha", "mid"]));

        let ids: Vec<_> = registry.ids().collect();

        assert_eq!(ids, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_manifest_item_accepts_bare_id_and_table() {
        let json = r#"["intro", {"id": "deployment", "label": "Deploying"}]"#;

        let manifest: Vec<ContentEntry> = serde_json::from_str(json).unwrap();

        assert_eq!(manifest[0], ContentEntry::new("intro"));
        assert_eq!(
            manifest[1],
            ContentEntry::new("deployment").with_label("Deploying")
        );
    }
}
