//! Configuration management for docnav.
//!
//! Parses `docnav.toml` project files with serde and provides auto-discovery
//! of the config file in parent directories. The project file points at the
//! content manifest and the sidebar declarations, and carries the user site
//! settings under `[site]`.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `site.search.app_id`
//! - `site.search.api_key`
//! - `site.search.index_name`

mod expand;
mod sources;

use std::path::{Path, PathBuf};

use docnav_site::{ResolveInput, SiteSettings, SiteSettingsOverride};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override content manifest path.
    pub manifest: Option<PathBuf>,
    /// Override sidebar declarations path.
    pub sidebars: Option<PathBuf>,
    /// Override site base path.
    pub base_url: Option<String>,
    /// Override site production URL.
    pub url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Default manifest filename, relative to the config directory.
const DEFAULT_MANIFEST: &str = "manifest.yaml";

/// Default sidebars filename, relative to the config directory.
const DEFAULT_SIDEBARS: &str = "sidebars.yaml";

/// Project configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manifest path as written in TOML.
    manifest: Option<String>,
    /// Sidebars path as written in TOML.
    sidebars: Option<String>,
    /// User site settings, merged over defaults by the resolver.
    pub site: SiteSettingsOverride,

    /// Resolved source paths (set after loading).
    #[serde(skip)]
    pub sources: SourcesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Resolved input file locations with absolute paths.
#[derive(Debug, Default)]
pub struct SourcesConfig {
    /// Content manifest file.
    pub manifest: PathBuf,
    /// Sidebar declarations file.
    pub sidebars: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error in the project file.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Manifest or sidebars file could not be parsed.
    #[error("Failed to parse {}: {message}", .path.display())]
    Source {
        /// Offending file.
        path: PathBuf,
        /// Parser message.
        message: String,
    },
    /// Manifest or sidebars file has an unrecognized extension.
    #[error("Unsupported file format: {} (expected .yaml, .yml, .json or .toml)", .0.display())]
    UnsupportedFormat(PathBuf),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.search.api_key`").
        field: String,
        /// Error message (e.g., "${`SEARCH_API_KEY`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            tracing::debug!(path = %discovered.display(), "Discovered configuration file");
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No configuration file found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(manifest) = &settings.manifest {
            self.sources.manifest.clone_from(manifest);
        }
        if let Some(sidebars) = &settings.sidebars {
            self.sources.sidebars.clone_from(sidebars);
        }
        if let Some(base_url) = &settings.base_url {
            self.site.base_url = Some(base_url.clone());
        }
        if let Some(url) = &settings.url {
            self.site.url = Some(url.clone());
        }
    }

    /// Read the manifest and sidebar files and assemble resolver input.
    ///
    /// Defaults are [`SiteSettings::default`].
    ///
    /// # Errors
    ///
    /// Returns an error if either source file is missing or malformed.
    pub fn resolve_input(&self) -> Result<ResolveInput, ConfigError> {
        Ok(ResolveInput {
            manifest: sources::read_manifest(&self.sources.manifest)?,
            sidebars: sources::read_sidebars(&self.sources.sidebars)?,
            settings: self.site.clone(),
            defaults: SiteSettings::default(),
        })
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            manifest: None,
            sidebars: None,
            site: SiteSettingsOverride::default(),
            sources: SourcesConfig {
                manifest: base.join(DEFAULT_MANIFEST),
                sidebars: base.join(DEFAULT_SIDEBARS),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before validation
        config.expand_env_vars()?;
        config.validate()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Only checks what the project file itself owns. Site settings are
    /// validated by the resolver so that all problems are reported together.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if a source path is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(manifest) = &self.manifest {
            require_non_empty(manifest, "manifest")?;
        }
        if let Some(sidebars) = &self.sidebars {
            require_non_empty(sidebars, "sidebars")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        expand::expand_opt(&mut self.site.url, "site.url")?;

        if let Some(ref mut search) = self.site.search {
            expand::expand_opt(&mut search.app_id, "site.search.app_id")?;
            expand::expand_opt(&mut search.api_key, "site.search.api_key")?;
            expand::expand_opt(&mut search.index_name, "site.search.index_name")?;
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.sources = SourcesConfig {
            manifest: resolve(self.manifest.as_deref(), DEFAULT_MANIFEST),
            sidebars: resolve(self.sidebars.as_deref(), DEFAULT_SIDEBARS),
        };
    }
}
