//! Cross-reference checks between settings and content.
//!
//! Footer links may point at content ids and navbar items at sidebars. These
//! are validated after the registry and sidebars are built.

use crate::error::ValidationError;
use crate::navigation::Sidebars;
use crate::registry::Registry;
use crate::settings::{NavbarItem, SiteSettings};

/// Normalize an internal link target to a content id.
///
/// Footer targets are written relative to the docs root, so a leading `/` is
/// accepted and ignored.
fn target_id(to: &str) -> &str {
    to.trim_start_matches('/')
}

/// Check every footer and navbar reference.
///
/// # Returns
///
/// One error per unresolved reference or malformed link, in settings order
/// (navbar first, then footer groups).
#[must_use]
pub fn validate_references(
    settings: &SiteSettings,
    registry: &Registry,
    sidebars: &Sidebars,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for item in &settings.navbar.items {
        match item {
            NavbarItem::DocSidebar { sidebar_id, .. } => {
                if !sidebars.contains_key(sidebar_id) {
                    errors.push(ValidationError::unresolved_reference(
                        "settings.navbar",
                        "sidebar",
                        sidebar_id,
                    ));
                }
            }
            NavbarItem::Link { label, href, .. } => {
                if href.trim().is_empty() {
                    errors.push(ValidationError::invalid_setting(
                        "settings.navbar",
                        format!("link '{label}' has an empty href"),
                    ));
                }
            }
        }
    }

    for group in &settings.footer.groups {
        let path = format!("settings.footer.{}", group.title);
        for link in &group.items {
            match (&link.to, &link.href) {
                (Some(to), None) => {
                    let id = target_id(to);
                    if !registry.contains(id) {
                        errors.push(ValidationError::unresolved_reference(
                            path.clone(),
                            "content id",
                            id,
                        ));
                    }
                }
                (None, Some(_)) => {}
                (Some(_), Some(_)) => errors.push(ValidationError::invalid_setting(
                    path.clone(),
                    format!("link '{}' sets both 'to' and 'href'", link.label),
                )),
                (None, None) => errors.push(ValidationError::invalid_setting(
                    path.clone(),
                    format!("link '{}' needs either 'to' or 'href'", link.label),
                )),
            }
        }
    }

    errors
}
