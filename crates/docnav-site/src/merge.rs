//! Merging user settings over defaults.
//!
//! User settings arrive as a [`SiteSettingsOverride`] where every field is
//! optional. [`merge`] applies them field by field on top of a default
//! [`SiteSettings`] and validates the result.
//!
//! Merge rules:
//! - Scalar fields: present user value replaces the default.
//! - Nested sections (organization, i18n, theme, navbar, footer): merged per field.
//! - Footer groups: merged by title; a user group replaces the default group of
//!   the same title wholesale and keeps its position, new groups are appended.
//! - Search: replaced as a unit.
//! - Extra fields: merged per key, at the top level and inside each section.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::settings::{
    BrokenLinkPolicy, ColorMode, DEFAULT_SEARCH_PROVIDER, FooterGroup, FooterSettings,
    FooterStyle, I18nSettings, NavbarItem, NavbarLogo, NavbarSettings, OrganizationSettings,
    SearchSettings, SiteSettings, ThemeSettings,
};

/// User-supplied site settings. Absent fields fall back to defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteSettingsOverride {
    /// Site title.
    pub title: Option<String>,
    /// Tagline.
    pub tagline: Option<String>,
    /// Production URL.
    pub url: Option<String>,
    /// Base path.
    pub base_url: Option<String>,
    /// Favicon path.
    pub favicon: Option<String>,
    /// Trailing slash policy.
    pub trailing_slash: Option<bool>,
    /// Broken link policy.
    pub on_broken_links: Option<BrokenLinkPolicy>,
    /// Organization metadata.
    pub organization: Option<OrganizationSettings>,
    /// Locale passthrough.
    pub i18n: Option<I18nOverride>,
    /// Theme palette.
    pub theme: Option<ThemeOverride>,
    /// Navbar.
    pub navbar: Option<NavbarOverride>,
    /// Footer.
    pub footer: Option<FooterOverride>,
    /// Search integration.
    pub search: Option<SearchOverride>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Locale overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct I18nOverride {
    /// Default locale.
    pub default_locale: Option<String>,
    /// Locales list.
    pub locales: Option<Vec<String>>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Theme overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ThemeOverride {
    /// Initial palette.
    pub color_mode: Option<ColorMode>,
    /// Light code theme.
    pub light_code_theme: Option<String>,
    /// Dark code theme.
    pub dark_code_theme: Option<String>,
    /// Custom stylesheet.
    pub custom_css: Option<String>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Navbar overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NavbarOverride {
    /// Navbar title.
    pub title: Option<String>,
    /// Logo.
    pub logo: Option<NavbarLogo>,
    /// Items; replaces the default list when present.
    pub items: Option<Vec<NavbarItem>>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Footer overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FooterOverride {
    /// Color style.
    pub style: Option<FooterStyle>,
    /// Link groups, merged by title.
    pub groups: Vec<FooterGroup>,
    /// Copyright line.
    pub copyright: Option<String>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Search settings as written by the user; required fields may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchOverride {
    /// Provider identifier.
    pub provider: Option<String>,
    /// Application id.
    pub app_id: Option<String>,
    /// Search API key.
    pub api_key: Option<String>,
    /// Index name.
    pub index_name: Option<String>,
    /// Contextual search flag.
    pub contextual_search: Option<bool>,
    /// Search page path.
    pub search_page_path: Option<String>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl From<&SearchOverride> for SearchSettings {
    fn from(raw: &SearchOverride) -> Self {
        Self {
            provider: raw
                .provider
                .clone()
                .unwrap_or_else(|| DEFAULT_SEARCH_PROVIDER.to_owned()),
            app_id: raw.app_id.clone().unwrap_or_default(),
            api_key: raw.api_key.clone().unwrap_or_default(),
            index_name: raw.index_name.clone().unwrap_or_default(),
            contextual_search: raw.contextual_search.unwrap_or(true),
            search_page_path: raw.search_page_path.clone(),
            extra: raw.extra.clone(),
        }
    }
}

/// Pick the override value if present, otherwise clone the default.
fn pick<T: Clone>(value: Option<&T>, default: &T) -> T {
    value.unwrap_or(default).clone()
}

fn pick_opt<T: Clone>(value: Option<&T>, default: Option<&T>) -> Option<T> {
    value.or(default).cloned()
}

/// Merge unrecognized fields per key; user keys win.
fn merge_extra(
    user: &Map<String, Value>,
    defaults: &Map<String, Value>,
) -> Map<String, Value> {
    let mut extra = defaults.clone();
    extra.extend(user.iter().map(|(k, v)| (k.clone(), v.clone())));
    extra
}

fn merge_organization(
    user: Option<&OrganizationSettings>,
    defaults: &OrganizationSettings,
) -> OrganizationSettings {
    let Some(user) = user else {
        return defaults.clone();
    };
    OrganizationSettings {
        name: pick_opt(user.name.as_ref(), defaults.name.as_ref()),
        project: pick_opt(user.project.as_ref(), defaults.project.as_ref()),
        deployment_branch: pick_opt(
            user.deployment_branch.as_ref(),
            defaults.deployment_branch.as_ref(),
        ),
        edit_url: pick_opt(user.edit_url.as_ref(), defaults.edit_url.as_ref()),
        extra: merge_extra(&user.extra, &defaults.extra),
    }
}

fn merge_i18n(user: Option<&I18nOverride>, defaults: &I18nSettings) -> I18nSettings {
    let Some(user) = user else {
        return defaults.clone();
    };
    I18nSettings {
        default_locale: pick(user.default_locale.as_ref(), &defaults.default_locale),
        locales: pick(user.locales.as_ref(), &defaults.locales),
        extra: merge_extra(&user.extra, &defaults.extra),
    }
}

fn merge_theme(user: Option<&ThemeOverride>, defaults: &ThemeSettings) -> ThemeSettings {
    let Some(user) = user else {
        return defaults.clone();
    };
    ThemeSettings {
        color_mode: user.color_mode.unwrap_or(defaults.color_mode),
        light_code_theme: pick(user.light_code_theme.as_ref(), &defaults.light_code_theme),
        dark_code_theme: pick(user.dark_code_theme.as_ref(), &defaults.dark_code_theme),
        custom_css: pick_opt(user.custom_css.as_ref(), defaults.custom_css.as_ref()),
        extra: merge_extra(&user.extra, &defaults.extra),
    }
}

fn merge_navbar(user: Option<&NavbarOverride>, defaults: &NavbarSettings) -> NavbarSettings {
    let Some(user) = user else {
        return defaults.clone();
    };
    NavbarSettings {
        title: pick_opt(user.title.as_ref(), defaults.title.as_ref()),
        logo: pick_opt(user.logo.as_ref(), defaults.logo.as_ref()),
        items: pick(user.items.as_ref(), &defaults.items),
        extra: merge_extra(&user.extra, &defaults.extra),
    }
}

/// Merge footer groups by title.
///
/// A user group replaces the default group with the same title wholesale,
/// keeping the default's position. Groups without a default counterpart are
/// appended in user order.
fn merge_footer_groups(user: &[FooterGroup], defaults: &[FooterGroup]) -> Vec<FooterGroup> {
    let mut merged: Vec<FooterGroup> = defaults.to_vec();
    for group in user {
        match merged.iter_mut().find(|existing| existing.title == group.title) {
            Some(existing) => existing.clone_from(group),
            None => merged.push(group.clone()),
        }
    }
    merged
}

fn merge_footer(user: Option<&FooterOverride>, defaults: &FooterSettings) -> FooterSettings {
    let Some(user) = user else {
        return defaults.clone();
    };
    FooterSettings {
        style: user.style.unwrap_or(defaults.style),
        groups: merge_footer_groups(&user.groups, &defaults.groups),
        copyright: pick_opt(user.copyright.as_ref(), defaults.copyright.as_ref()),
        extra: merge_extra(&user.extra, &defaults.extra),
    }
}

/// Merge user settings over defaults and validate the result.
///
/// # Arguments
///
/// * `user` - User-supplied partial settings
/// * `defaults` - Baseline settings
///
/// # Returns
///
/// The merged settings together with every validation problem found. Merging
/// an empty override returns `defaults` unchanged.
#[must_use]
pub fn merge(
    user: &SiteSettingsOverride,
    defaults: &SiteSettings,
) -> (SiteSettings, Vec<ValidationError>) {
    let settings = SiteSettings {
        title: pick(user.title.as_ref(), &defaults.title),
        tagline: pick(user.tagline.as_ref(), &defaults.tagline),
        url: pick(user.url.as_ref(), &defaults.url),
        base_url: pick(user.base_url.as_ref(), &defaults.base_url),
        favicon: pick_opt(user.favicon.as_ref(), defaults.favicon.as_ref()),
        trailing_slash: user.trailing_slash.or(defaults.trailing_slash),
        on_broken_links: user.on_broken_links.unwrap_or(defaults.on_broken_links),
        organization: merge_organization(user.organization.as_ref(), &defaults.organization),
        i18n: merge_i18n(user.i18n.as_ref(), &defaults.i18n),
        theme: merge_theme(user.theme.as_ref(), &defaults.theme),
        navbar: merge_navbar(user.navbar.as_ref(), &defaults.navbar),
        footer: merge_footer(user.footer.as_ref(), &defaults.footer),
        search: match &user.search {
            Some(search) => Some(SearchSettings::from(search)),
            None => defaults.search.clone(),
        },
        extra: merge_extra(&user.extra, &defaults.extra),
    };

    let errors = validate_settings(&settings);
    (settings, errors)
}

/// Validate required fields and value formats of merged settings.
#[must_use]
pub fn validate_settings(settings: &SiteSettings) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if settings.title.trim().is_empty() {
        errors.push(ValidationError::missing_field("settings.title"));
    }

    if settings.url.trim().is_empty() {
        errors.push(ValidationError::missing_field("settings.url"));
    } else if !settings.url.starts_with("http://") && !settings.url.starts_with("https://") {
        errors.push(ValidationError::invalid_setting(
            "settings.url",
            "settings.url must start with http:// or https://",
        ));
    }

    if !settings.base_url.starts_with('/') || !settings.base_url.ends_with('/') {
        errors.push(ValidationError::invalid_setting(
            "settings.base_url",
            format!(
                "settings.base_url must start and end with '/', got '{}'",
                settings.base_url
            ),
        ));
    }

    if let Some(search) = &settings.search {
        let missing = search.missing_fields();
        if !missing.is_empty() {
            errors.push(ValidationError::incomplete_search_config(&missing));
        }
    }

    errors
}
