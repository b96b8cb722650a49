//! Navigation tree and site settings resolution for docnav.
//!
//! This crate provides:
//! - [`Registry`]: declared content ids with duplicate detection
//! - Navigation tree building for sidebars ([`build_tree`], [`build_sidebars`])
//! - Settings merging over defaults ([`merge`])
//! - Error collection into a [`SiteConfiguration`] ([`collect`], [`resolve`])
//!
//! Every component accumulates [`ValidationError`]s instead of stopping at the
//! first problem. Whether errors are fatal is up to the caller.
//!
//! # Quick Start
//!
//! ```
//! use std::collections::BTreeMap;
//! use docnav_site::{ContentEntry, Node, ResolveInput, resolve};
//!
//! let mut sidebars = BTreeMap::new();
//! sidebars.insert(
//!     "docs".to_owned(),
//!     vec![Node::doc("intro"), Node::category("Guides", vec![Node::doc("setup")])],
//! );
//!
//! let input = ResolveInput {
//!     manifest: vec![ContentEntry::new("intro"), ContentEntry::new("setup")],
//!     sidebars,
//!     ..Default::default()
//! };
//!
//! let config = resolve(input).unwrap();
//! assert_eq!(config.navigation["docs"].doc_ids(), vec!["intro", "setup"]);
//! ```

mod error;
mod links;
mod merge;
mod navigation;
mod registry;
mod report;
mod resolve;
mod settings;

pub use error::{ValidationError, ValidationErrorKind};
pub use links::validate_references;
pub use merge::{
    FooterOverride, I18nOverride, NavbarOverride, SearchOverride, SiteSettingsOverride,
    ThemeOverride, merge, validate_settings,
};
pub use navigation::{NavNode, NavigationTree, Node, Sidebars, build_sidebars, build_tree};
pub use registry::{ContentEntry, Registry, RegistryError};
pub use report::{SiteConfiguration, ValidationErrors, collect};
pub use resolve::{ResolveInput, resolve};
pub use settings::{
    BrokenLinkPolicy, ColorMode, DEFAULT_SEARCH_PROVIDER, FooterGroup, FooterLink,
    FooterSettings, FooterStyle, I18nSettings, NavbarItem, NavbarLogo, NavbarPosition,
    NavbarSettings, OrganizationSettings, SearchSettings, SiteSettings, ThemeSettings,
};
