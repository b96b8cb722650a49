//! CLI command implementations.

pub(crate) mod build;
pub(crate) mod check;

use std::path::PathBuf;

use clap::Args;
use docnav_config::{CliSettings, Config};
use docnav_site::resolve;

use crate::error::CliError;
use crate::output::Output;
use crate::policy::{self, Verdict};

pub(crate) use build::BuildArgs;
pub(crate) use check::CheckArgs;

/// Input and policy arguments shared by all commands.
#[derive(Args)]
pub(crate) struct SourceArgs {
    /// Path to configuration file (default: auto-discover docnav.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Content manifest file (overrides config).
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Sidebar declarations file (overrides config).
    #[arg(long)]
    sidebars: Option<PathBuf>,

    /// Site base path (overrides config).
    #[arg(long, env = "DOCNAV_BASE_URL")]
    base_url: Option<String>,

    /// Site production URL (overrides config).
    #[arg(long, env = "DOCNAV_URL")]
    url: Option<String>,

    /// Treat every problem as fatal, including broken links.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl SourceArgs {
    /// Config-file overrides given on the command line.
    fn cli_settings(&self) -> CliSettings {
        CliSettings {
            manifest: self.manifest.clone(),
            sidebars: self.sidebars.clone(),
            base_url: self.base_url.clone(),
            url: self.url.clone(),
        }
    }

    /// Load configuration, resolve the site and apply the broken link policy.
    ///
    /// Problems are printed as they are classified.
    fn resolve(self, output: &Output) -> Result<Verdict, CliError> {
        let cli_settings = self.cli_settings();
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        if let Some(path) = &config.config_path {
            output.info(&format!("Config: {}", path.display()));
        }
        tracing::info!(
            manifest = %config.sources.manifest.display(),
            sidebars = %config.sources.sidebars.display(),
            "Resolving site"
        );

        let input = config.resolve_input()?;
        let verdict = policy::apply(resolve(input), self.strict);

        match &verdict {
            Verdict::Valid(_) => {}
            Verdict::Degraded { warnings, .. } => {
                if !warnings.is_empty() {
                    output.warning(&format!("{} broken link(s):", warnings.len()));
                    for warning in warnings {
                        output.problem(warning, false);
                    }
                }
            }
            Verdict::Invalid(errors) => {
                output.error(&format!("{} problem(s) found:", errors.len()));
                for error in errors {
                    output.problem(error, true);
                }
            }
        }

        Ok(verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    struct TestCli {
        #[command(flatten)]
        source: SourceArgs,
    }

    #[test]
    fn test_url_flag_overrides_config() {
        let cli = TestCli::try_parse_from([
            "docnav",
            "--url",
            "https://docs.example.com",
            "--base-url",
            "/guide/",
        ])
        .unwrap();

        let settings = cli.source.cli_settings();

        assert_eq!(settings.url.as_deref(), Some("https://docs.example.com"));
        assert_eq!(settings.base_url.as_deref(), Some("/guide/"));
        assert!(settings.manifest.is_none());
    }

    #[test]
    fn test_manifest_and_sidebars_flags_pass_through() {
        let cli = TestCli::try_parse_from([
            "docnav",
            "--manifest",
            "content/manifest.json",
            "--sidebars",
            "nav.yaml",
            "--strict",
        ])
        .unwrap();

        let settings = cli.source.cli_settings();

        assert_eq!(settings.manifest, Some(PathBuf::from("content/manifest.json")));
        assert_eq!(settings.sidebars, Some(PathBuf::from("nav.yaml")));
        assert!(cli.source.strict);
    }
}
