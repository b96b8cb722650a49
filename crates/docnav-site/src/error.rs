//! Validation error types.
//!
//! Every structural problem found while resolving a site is reported as a
//! [`ValidationError`]. Errors are accumulated by each component and handed to
//! the reporter; nothing in this crate aborts on the first problem.

use std::fmt;

use serde::Serialize;

/// Category of a structural configuration problem.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// The manifest declares the same content id more than once.
    DuplicateIdentifier,
    /// A category has no items.
    EmptyCategory,
    /// A reference (content id or sidebar name) does not resolve.
    UnresolvedReference,
    /// A category label recurs on its own ancestor path.
    CyclicCategory,
    /// Search settings are present but lack a required field.
    IncompleteSearchConfig,
    /// A required setting is empty.
    MissingField,
    /// A setting has a malformed value.
    InvalidSetting,
}

impl ValidationErrorKind {
    /// Stable identifier used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DuplicateIdentifier => "duplicate_identifier",
            Self::EmptyCategory => "empty_category",
            Self::UnresolvedReference => "unresolved_reference",
            Self::CyclicCategory => "cyclic_category",
            Self::IncompleteSearchConfig => "incomplete_search_config",
            Self::MissingField => "missing_field",
            Self::InvalidSetting => "invalid_setting",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single structural problem and where it was found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{kind} at {path}: {message}")]
pub struct ValidationError {
    /// Problem category.
    pub kind: ValidationErrorKind,
    /// Dotted breadcrumb of the offending location (e.g. `docs.Core Patterns`).
    pub path: String,
    /// Human-readable description.
    pub message: String,
    /// Offending identifier, when the problem is about a specific id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
}

impl ValidationError {
    /// Create an error without an associated identifier.
    pub fn new(
        kind: ValidationErrorKind,
        path: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
            reference: None,
        }
    }

    /// Attach the offending identifier.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    pub(crate) fn duplicate_identifier(id: &str) -> Self {
        Self::new(
            ValidationErrorKind::DuplicateIdentifier,
            "manifest",
            format!("content id '{id}' is declared more than once"),
        )
        .with_reference(id)
    }

    pub(crate) fn empty_category(path: impl Into<String>, label: &str) -> Self {
        Self::new(
            ValidationErrorKind::EmptyCategory,
            path,
            format!("category '{label}' has no items"),
        )
    }

    pub(crate) fn unresolved_reference(
        path: impl Into<String>,
        what: &str,
        id: &str,
    ) -> Self {
        Self::new(
            ValidationErrorKind::UnresolvedReference,
            path,
            format!("{what} '{id}' does not exist"),
        )
        .with_reference(id)
    }

    pub(crate) fn cyclic_category(path: impl Into<String>, label: &str) -> Self {
        Self::new(
            ValidationErrorKind::CyclicCategory,
            path,
            format!("category '{label}' contains itself"),
        )
    }

    pub(crate) fn incomplete_search_config(missing: &[&str]) -> Self {
        Self::new(
            ValidationErrorKind::IncompleteSearchConfig,
            "settings.search",
            format!("search settings are missing {}", missing.join(", ")),
        )
    }

    pub(crate) fn missing_field(path: impl Into<String>) -> Self {
        let path = path.into();
        let message = format!("{path} cannot be empty");
        Self::new(ValidationErrorKind::MissingField, path, message)
    }

    pub(crate) fn invalid_setting(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::InvalidSetting, path, message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_kind_path_and_message() {
        let err = ValidationError::empty_category("docs.Core", "Core");

        assert_eq!(
            err.to_string(),
            "empty_category at docs.Core: category 'Core' has no items"
        );
    }

    #[test]
    fn test_unresolved_reference_records_id() {
        let err = ValidationError::unresolved_reference("docs", "content id", "missing-doc");

        assert_eq!(err.kind, ValidationErrorKind::UnresolvedReference);
        assert_eq!(err.reference.as_deref(), Some("missing-doc"));
    }

    #[test]
    fn test_missing_field_message_names_path() {
        let err = ValidationError::missing_field("settings.title");

        assert_eq!(err.path, "settings.title");
        assert!(err.message.contains("cannot be empty"));
    }

    #[test]
    fn test_serialization_skips_absent_reference() {
        let err = ValidationError::cyclic_category("docs.A", "A");

        let json = serde_json::to_value(&err).unwrap();

        assert_eq!(json["kind"], "cyclic_category");
        assert_eq!(json["path"], "docs.A");
        assert!(json.get("reference").is_none());
    }
}
