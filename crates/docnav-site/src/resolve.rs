//! End-to-end site resolution.
//!
//! Runs every component in order and hands the combined result to
//! [`collect`](crate::report::collect):
//!
//! 1. Build the identifier registry from the manifest.
//! 2. Build every sidebar against the registry.
//! 3. Merge user settings over defaults.
//! 4. Check settings references against the registry and sidebars.

use std::collections::BTreeMap;

use crate::links::validate_references;
use crate::merge::{SiteSettingsOverride, merge};
use crate::navigation::{Node, build_sidebars};
use crate::registry::{ContentEntry, Registry};
use crate::report::{SiteConfiguration, ValidationErrors, collect};
use crate::settings::SiteSettings;

/// Everything needed to resolve a site.
#[derive(Clone, Debug, Default)]
pub struct ResolveInput {
    /// Declared content entries, in manifest order.
    pub manifest: Vec<ContentEntry>,
    /// Sidebar declarations keyed by name.
    pub sidebars: BTreeMap<String, Vec<Node>>,
    /// User-supplied settings.
    pub settings: SiteSettingsOverride,
    /// Baseline settings the user settings are merged over.
    pub defaults: SiteSettings,
}

/// Resolve a site into a validated configuration.
///
/// # Errors
///
/// Returns every problem found across all stages, in discovery order.
pub fn resolve(input: ResolveInput) -> Result<SiteConfiguration, ValidationErrors> {
    let ResolveInput {
        manifest,
        sidebars,
        settings,
        defaults,
    } = input;

    let (registry, registry_errors) = Registry::build(manifest);
    tracing::debug!(
        entries = registry.len(),
        errors = registry_errors.len(),
        "Built content registry"
    );

    let (navigation, tree_errors) = build_sidebars(&sidebars, &registry);
    tracing::debug!(
        sidebars = navigation.len(),
        errors = tree_errors.len(),
        "Built navigation"
    );

    let (settings, settings_errors) = merge(&settings, &defaults);
    let reference_errors = validate_references(&settings, &registry, &navigation);
    tracing::debug!(
        errors = settings_errors.len() + reference_errors.len(),
        "Merged site settings"
    );

    let result = collect(
        navigation,
        settings,
        [registry_errors, tree_errors, settings_errors, reference_errors],
    );
    match &result {
        Ok(_) => tracing::info!("Site configuration is valid"),
        Err(errors) => tracing::info!(errors = errors.len(), "Site configuration has errors"),
    }
    result
}
