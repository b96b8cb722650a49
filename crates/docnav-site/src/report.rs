//! Validation reporting.
//!
//! Combines the error lists produced by the registry, the tree builder and the
//! settings merger into a single outcome.

use std::fmt;

use serde::Serialize;

use crate::error::{ValidationError, ValidationErrorKind};
use crate::navigation::Sidebars;
use crate::settings::SiteSettings;

/// Validated, render-ready site configuration.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteConfiguration {
    /// Sidebars keyed by name.
    pub navigation: Sidebars,
    /// Merged site settings.
    pub settings: SiteSettings,
}

/// Non-empty, ordered list of validation errors.
///
/// Also carries the configuration assembled despite the errors, so the
/// invoking layer can apply its own policy (e.g. treat broken links as
/// warnings) without running validation again.
#[derive(Debug)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
    partial: Box<SiteConfiguration>,
}

impl ValidationErrors {
    /// Errors in discovery order.
    #[must_use]
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false`: [`collect`] is the only constructor and it returns
    /// `Ok` when there are no errors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Whether every error is of the given kind.
    #[must_use]
    pub fn all_of_kind(&self, kind: ValidationErrorKind) -> bool {
        self.errors.iter().all(|e| e.kind == kind)
    }

    /// Best-effort configuration: unresolved and cyclic items are dropped.
    #[must_use]
    pub fn partial(&self) -> &SiteConfiguration {
        &self.partial
    }

    /// Split into the errors and the best-effort configuration.
    #[must_use]
    pub fn into_parts(self) -> (Vec<ValidationError>, SiteConfiguration) {
        (self.errors, *self.partial)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.errors.len();
        let noun = if count == 1 { "error" } else { "errors" };
        write!(f, "site configuration has {count} validation {noun}")?;
        for err in &self.errors {
            write!(f, "\n  - {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Combine error lists into a final outcome.
///
/// Lists are concatenated in the order given, so callers pass them in
/// discovery order (registry, navigation, settings, references).
///
/// # Errors
///
/// Returns [`ValidationErrors`] with the full list if any list is non-empty.
pub fn collect<I>(
    navigation: Sidebars,
    settings: SiteSettings,
    error_lists: I,
) -> Result<SiteConfiguration, ValidationErrors>
where
    I: IntoIterator<Item = Vec<ValidationError>>,
{
    let errors: Vec<ValidationError> = error_lists.into_iter().flatten().collect();
    let configuration = SiteConfiguration {
        navigation,
        settings,
    };

    if errors.is_empty() {
        Ok(configuration)
    } else {
        Err(ValidationErrors {
            errors,
            partial: Box::new(configuration),
        })
    }
}
