//! Info command implementation
//!
//! Prints the format and dimensions of each input file.

use clap::ArgMatches;
use log::{debug, warn};

use crate::api;
use crate::size::errors::SizeResult;
use crate::size::registry::ExtractorRegistry;
use crate::utils::logger::Logger;

use super::command_traits::Command;

/// Command for reporting image sizes
pub struct InfoCommand<'a> {
    /// Files to inspect
    inputs: Vec<String>,
    /// Extractors to dispatch with
    registry: ExtractorRegistry,
    /// Report sink
    logger: &'a Logger,
}

impl<'a> InfoCommand<'a> {
    /// Create a new info command from CLI arguments
    pub fn new(args: &ArgMatches, registry: ExtractorRegistry, logger: &'a Logger) -> SizeResult<Self> {
        let inputs: Vec<String> = args
            .get_many::<String>("input")
            .map(|values| values.cloned().collect())
            .unwrap_or_default();

        if inputs.is_empty() {
            return Err("At least one input file is required".to_string().into());
        }

        Ok(Self::with_inputs(inputs, registry, logger))
    }

    /// Create a command for an explicit list of inputs
    pub fn with_inputs(inputs: Vec<String>, registry: ExtractorRegistry, logger: &'a Logger) -> Self {
        InfoCommand {
            inputs,
            registry,
            logger,
        }
    }

    /// Formats the report line for one input
    fn describe(&self, input: &str) -> (String, bool) {
        match api::extract_file_info(&self.registry, input) {
            Ok(info) => (format!("{}: {}", input, info), true),
            Err(e) => {
                warn!("Failed to read {}: {}", input, e);
                let line = e.to_string().replace('\n', "; ");
                (format!("{}: error: {}", input, line), false)
            }
        }
    }
}

impl<'a> Command for InfoCommand<'a> {
    fn execute(&self) -> SizeResult<()> {
        debug!("Inspecting {} input(s)", self.inputs.len());

        let mut failed = 0;
        for input in &self.inputs {
            let (line, ok) = self.describe(input);
            self.logger.log(&line)?;
            if !ok {
                failed += 1;
            }
        }

        if failed > 0 {
            return Err(format!(
                "{} of {} input(s) could not be read",
                failed,
                self.inputs.len()
            )
            .into());
        }
        Ok(())
    }
}
