//! `docnav check` command implementation.

use clap::Args;
use docnav_site::SiteConfiguration;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::policy::Verdict;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or validation fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        match self.source.resolve(&output)? {
            Verdict::Valid(configuration) => {
                output.success(&summary(&configuration));
                Ok(())
            }
            Verdict::Degraded { configuration, .. } => {
                output.info(&summary(&configuration));
                Ok(())
            }
            Verdict::Invalid(errors) => Err(CliError::Invalid {
                count: errors.len(),
            }),
        }
    }
}

/// One-line description of a resolved site.
fn summary(configuration: &SiteConfiguration) -> String {
    let docs: usize = configuration
        .navigation
        .values()
        .map(|tree| tree.doc_ids().len())
        .sum();
    format!(
        "{}: {} sidebar(s), {} navigation entries",
        configuration.settings.title,
        configuration.navigation.len(),
        docs
    )
}
