//! Site-wide settings.
//!
//! [`SiteSettings`] is the fully-resolved form handed to the rendering layer.
//! Every field has a default; see [`crate::merge`] for how user overrides are
//! applied on top of them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// What the invoking layer should do about unresolved references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    /// Drop them silently.
    Ignore,
    /// Report them without failing.
    #[default]
    Warn,
    /// Fail the build.
    Throw,
}

/// Default color palette.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Light palette.
    #[default]
    Light,
    /// Dark palette.
    Dark,
}

/// Footer color style.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    /// Light footer.
    #[default]
    Light,
    /// Dark footer.
    Dark,
}

/// Side of the navbar an item is placed on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavbarPosition {
    /// Left side.
    #[default]
    Left,
    /// Right side.
    Right,
}

/// Organization and deployment metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrganizationSettings {
    /// Organization or user name owning the site.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Project (repository) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    /// Branch the site is deployed from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_branch: Option<String>,
    /// Base URL for "edit this page" links.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edit_url: Option<String>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Locale passthrough values. Not interpreted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct I18nSettings {
    /// Default locale.
    pub default_locale: String,
    /// All locales the site is built for.
    pub locales: Vec<String>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            default_locale: "en".to_owned(),
            locales: vec!["en".to_owned()],
            extra: Map::new(),
        }
    }
}

/// Theme palette selection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ThemeSettings {
    /// Palette used on first visit.
    pub color_mode: ColorMode,
    /// Code highlighting theme for the light palette.
    pub light_code_theme: String,
    /// Code highlighting theme for the dark palette.
    pub dark_code_theme: String,
    /// Custom stylesheet path, passed to the asset pipeline untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Light,
            light_code_theme: "github".to_owned(),
            dark_code_theme: "dracula".to_owned(),
            custom_css: None,
            extra: Map::new(),
        }
    }
}

/// Navbar logo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavbarLogo {
    /// Alternative text.
    pub alt: String,
    /// Image path.
    pub src: String,
}

/// Navbar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", from = "RawNavbarItem")]
pub enum NavbarItem {
    /// Link to the first document of a sidebar.
    DocSidebar {
        /// Sidebar name; must match a declared sidebar.
        sidebar_id: String,
        /// Display label.
        label: String,
        /// Placement.
        #[serde(default)]
        position: NavbarPosition,
    },
    /// Link to an arbitrary URL.
    Link {
        /// Display label.
        label: String,
        /// Link target.
        href: String,
        /// Placement.
        #[serde(default)]
        position: NavbarPosition,
    },
}

/// Navbar declaration: an item without `type` is a plain link.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNavbarItem {
    Tagged(TaggedNavbarItem),
    Link {
        label: String,
        href: String,
        #[serde(default)]
        position: NavbarPosition,
    },
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TaggedNavbarItem {
    #[serde(alias = "docSidebar")]
    DocSidebar {
        #[serde(alias = "sidebarId")]
        sidebar_id: String,
        label: String,
        #[serde(default)]
        position: NavbarPosition,
    },
    Link {
        label: String,
        href: String,
        #[serde(default)]
        position: NavbarPosition,
    },
}

impl From<RawNavbarItem> for NavbarItem {
    fn from(raw: RawNavbarItem) -> Self {
        match raw {
            RawNavbarItem::Tagged(TaggedNavbarItem::DocSidebar {
                sidebar_id,
                label,
                position,
            }) => Self::DocSidebar {
                sidebar_id,
                label,
                position,
            },
            RawNavbarItem::Tagged(TaggedNavbarItem::Link {
                label,
                href,
                position,
            })
            | RawNavbarItem::Link {
                label,
                href,
                position,
            } => Self::Link {
                label,
                href,
                position,
            },
        }
    }
}

/// Navbar settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavbarSettings {
    /// Navbar title; the site title is used when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Logo image.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<NavbarLogo>,
    /// Items in display order.
    pub items: Vec<NavbarItem>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Link inside a footer group.
///
/// Exactly one of `to` (content id) and `href` (external URL) must be set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterLink {
    /// Display label.
    pub label: String,
    /// Internal target: a content id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    /// External target.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl FooterLink {
    /// Link to a content entry.
    pub fn to(label: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            to: Some(id.into()),
            href: None,
        }
    }

    /// Link to an external URL.
    pub fn href(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            to: None,
            href: Some(url.into()),
        }
    }
}

/// Named list of footer links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FooterGroup {
    /// Group title; groups are merged by title.
    #[serde(alias = "name")]
    pub title: String,
    /// Links in display order.
    #[serde(default)]
    pub items: Vec<FooterLink>,
}

/// Footer settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FooterSettings {
    /// Color style.
    pub style: FooterStyle,
    /// Link groups in display order.
    pub groups: Vec<FooterGroup>,
    /// Copyright line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
    /// Unrecognized fields.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Third-party search integration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchSettings {
    /// Search provider identifier.
    pub provider: String,
    /// Application id. Required.
    pub app_id: String,
    /// Public search API key. Required.
    pub api_key: String,
    /// Index name. Required.
    pub index_name: String,
    /// Scope results to the current locale and version.
    pub contextual_search: bool,
    /// Path of the dedicated search page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search_page_path: Option<String>,
    /// Provider-specific options such as `search_parameters`.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Default search provider.
pub const DEFAULT_SEARCH_PROVIDER: &str = "algolia";

impl SearchSettings {
    /// Names of required fields that are empty.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("app_id", &self.app_id),
            ("api_key", &self.api_key),
            ("index_name", &self.index_name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Fully-resolved site settings.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteSettings {
    /// Site title.
    pub title: String,
    /// Short tagline.
    pub tagline: String,
    /// Production URL (scheme and host).
    pub url: String,
    /// Path the site is served under; starts and ends with `/`.
    pub base_url: String,
    /// Favicon path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favicon: Option<String>,
    /// Trailing slash policy for generated URLs; `None` leaves URLs untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trailing_slash: Option<bool>,
    /// How the invoking layer treats unresolved references.
    pub on_broken_links: BrokenLinkPolicy,
    /// Organization metadata.
    pub organization: OrganizationSettings,
    /// Locale passthrough.
    pub i18n: I18nSettings,
    /// Theme palette.
    pub theme: ThemeSettings,
    /// Navbar.
    pub navbar: NavbarSettings,
    /// Footer.
    pub footer: FooterSettings,
    /// Search integration; disabled when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchSettings>,
    /// Unrecognized fields, kept opaquely for third-party integrations.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            tagline: String::new(),
            url: "http://localhost".to_owned(),
            base_url: "/".to_owned(),
            favicon: None,
            trailing_slash: None,
            on_broken_links: BrokenLinkPolicy::default(),
            organization: OrganizationSettings::default(),
            i18n: I18nSettings::default(),
            theme: ThemeSettings::default(),
            navbar: NavbarSettings::default(),
            footer: FooterSettings::default(),
            search: None,
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(app_id: &str, api_key: &str, index_name: &str) -> SearchSettings {
        SearchSettings {
            provider: DEFAULT_SEARCH_PROVIDER.to_owned(),
            app_id: app_id.to_owned(),
            api_key: api_key.to_owned(),
            index_name: index_name.to_owned(),
            contextual_search: true,
            search_page_path: None,
            extra: Map::new(),
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = SiteSettings::default();

        assert_eq!(settings.base_url, "/");
        assert_eq!(settings.on_broken_links, BrokenLinkPolicy::Warn);
        assert_eq!(settings.i18n.default_locale, "en");
        assert_eq!(settings.theme.light_code_theme, "github");
        assert_eq!(settings.theme.dark_code_theme, "dracula");
        assert!(settings.search.is_none());
        assert!(settings.footer.groups.is_empty());
    }

    #[test]
    fn test_complete_search_has_no_missing_fields() {
        assert!(search("app", "key", "index").missing_fields().is_empty());
    }

    #[test]
    fn test_missing_search_fields_listed_in_order() {
        assert_eq!(
            search("", "key", " ").missing_fields(),
            vec!["app_id", "index_name"]
        );
    }

    #[test]
    fn test_footer_group_accepts_name_alias() {
        let group: FooterGroup =
            serde_json::from_str(r#"{"name": "A", "items": [{"label": "x", "to": "intro"}]}"#)
                .unwrap();

        assert_eq!(group.title, "A");
        assert_eq!(group.items, vec![FooterLink::to("x", "intro")]);
    }

    #[test]
    fn test_navbar_item_parses_doc_sidebar() {
        let item: NavbarItem = serde_json::from_str(
            r#"{"type": "doc_sidebar", "sidebar_id": "patterns", "label": "Patterns"}"#,
        )
        .unwrap();

        assert_eq!(
            item,
            NavbarItem::DocSidebar {
                sidebar_id: "patterns".to_owned(),
                label: "Patterns".to_owned(),
                position: NavbarPosition::Left,
            }
        );
    }

    #[test]
    fn test_navbar_item_accepts_camel_case_doc_sidebar() {
        let item: NavbarItem = serde_json::from_str(
            r#"{"type": "docSidebar", "sidebarId": "patterns", "label": "Patterns"}"#,
        )
        .unwrap();

        assert_eq!(
            item,
            NavbarItem::DocSidebar {
                sidebar_id: "patterns".to_owned(),
                label: "Patterns".to_owned(),
                position: NavbarPosition::Left,
            }
        );
    }

    #[test]
    fn test_navbar_item_without_type_is_link() {
        let item: NavbarItem = serde_json::from_str(
            r#"{"href": "https://github.com/acme/docs", "label": "GitHub", "position": "right"}"#,
        )
        .unwrap();

        assert_eq!(
            item,
            NavbarItem::Link {
                label: "GitHub".to_owned(),
                href: "https://github.com/acme/docs".to_owned(),
                position: NavbarPosition::Right,
            }
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "link");
    }

    #[test]
    fn test_extra_fields_flattened_on_serialization() {
        let mut settings = SiteSettings::default();
        settings
            .extra
            .insert("analytics".to_owned(), Value::from("G-123"));

        let json = serde_json::to_value(&settings).unwrap();

        assert_eq!(json["analytics"], "G-123");
        assert_eq!(json["base_url"], "/");
        assert!(json.get("search").is_none());
    }
}
