//! `docnav build` command implementation.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;

use super::SourceArgs;
use crate::error::CliError;
use crate::output::Output;
use crate::policy::Verdict;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Write the configuration to this file instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails or the output cannot be written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let configuration = match self.source.resolve(&output)? {
            Verdict::Valid(configuration) | Verdict::Degraded { configuration, .. } => {
                configuration
            }
            Verdict::Invalid(errors) => {
                return Err(CliError::Invalid {
                    count: errors.len(),
                });
            }
        };

        let json = serde_json::to_string_pretty(&configuration)?;
        match &self.output {
            Some(path) => {
                if let Some(parent) = path.parent()
                    && !parent.as_os_str().is_empty()
                {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, json)?;
                output.success(&format!("Wrote {}", path.display()));
            }
            None => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(json.as_bytes())?;
                stdout.write_all(b"\n")?;
            }
        }

        Ok(())
    }
}
