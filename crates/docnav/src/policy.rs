//! Deciding which validation errors fail the build.
//!
//! The resolver reports every problem; this module applies the site's
//! `on_broken_links` policy. Unresolved references follow that policy, every
//! other kind of problem is always fatal. `--strict` makes everything fatal.

use docnav_site::{
    BrokenLinkPolicy, SiteConfiguration, ValidationError, ValidationErrorKind, ValidationErrors,
};

/// Outcome of applying the policy to a resolve result.
#[derive(Debug)]
pub(crate) enum Verdict {
    /// No problems.
    Valid(SiteConfiguration),
    /// Only tolerated problems; the configuration is usable.
    Degraded {
        configuration: SiteConfiguration,
        warnings: Vec<ValidationError>,
    },
    /// At least one fatal problem. Carries every problem for display.
    Invalid(Vec<ValidationError>),
}

/// Apply the broken link policy to a resolve result.
pub(crate) fn apply(result: Result<SiteConfiguration, ValidationErrors>, strict: bool) -> Verdict {
    let errors = match result {
        Ok(configuration) => return Verdict::Valid(configuration),
        Err(errors) => errors,
    };

    let policy = errors.partial().settings.on_broken_links;
    let only_broken_links = errors.all_of_kind(ValidationErrorKind::UnresolvedReference);
    let (errors, configuration) = errors.into_parts();

    if strict || !only_broken_links {
        return Verdict::Invalid(errors);
    }

    match policy {
        BrokenLinkPolicy::Throw => Verdict::Invalid(errors),
        BrokenLinkPolicy::Warn => Verdict::Degraded {
            configuration,
            warnings: errors,
        },
        BrokenLinkPolicy::Ignore => Verdict::Degraded {
            configuration,
            warnings: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docnav_site::{SiteSettings, Sidebars, collect};
    use pretty_assertions::assert_eq;

    fn failing(
        kinds: &[ValidationErrorKind],
        policy: BrokenLinkPolicy,
    ) -> Result<SiteConfiguration, ValidationErrors> {
        let settings = SiteSettings {
            on_broken_links: policy,
            ..SiteSettings::default()
        };
        let errors: Vec<ValidationError> = kinds
            .iter()
            .map(|kind| ValidationError::new(*kind, "docs", "problem"))
            .collect();
        collect(Sidebars::new(), settings, [errors])
    }

    #[test]
    fn test_valid_result_passes_through() {
        let result = collect(Sidebars::new(), SiteSettings::default(), Vec::new());

        assert!(matches!(apply(result, false), Verdict::Valid(_)));
    }

    #[test]
    fn test_broken_links_warn_by_default() {
        let result = failing(&[ValidationErrorKind::UnresolvedReference], BrokenLinkPolicy::Warn);

        let Verdict::Degraded { warnings, .. } = apply(result, false) else {
            panic!("expected degraded verdict");
        };
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_broken_links_ignored_silently() {
        let result = failing(&[ValidationErrorKind::UnresolvedReference], BrokenLinkPolicy::Ignore);

        let Verdict::Degraded { warnings, .. } = apply(result, false) else {
            panic!("expected degraded verdict");
        };
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_broken_links_throw_is_fatal() {
        let result = failing(&[ValidationErrorKind::UnresolvedReference], BrokenLinkPolicy::Throw);

        assert!(matches!(apply(result, false), Verdict::Invalid(_)));
    }

    #[test]
    fn test_strict_makes_warnings_fatal() {
        let result = failing(&[ValidationErrorKind::UnresolvedReference], BrokenLinkPolicy::Warn);

        assert!(matches!(apply(result, true), Verdict::Invalid(_)));
    }

    #[test]
    fn test_structural_errors_always_fatal() {
        let result = failing(
            &[
                ValidationErrorKind::UnresolvedReference,
                ValidationErrorKind::EmptyCategory,
            ],
            BrokenLinkPolicy::Ignore,
        );

        let Verdict::Invalid(errors) = apply(result, false) else {
            panic!("expected invalid verdict");
        };
        assert_eq!(errors.len(), 2);
    }
}
