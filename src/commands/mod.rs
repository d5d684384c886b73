//! CLI command implementations
//!
//! This module contains implementations of the commands
//! supported by the CLI application using the Command pattern.

pub mod command_traits;
pub mod info_command;
pub mod list_formats_command;

pub use command_traits::{Command, CommandFactory};
pub use info_command::InfoCommand;
pub use list_formats_command::ListFormatsCommand;

use clap::ArgMatches;
use log::debug;
use crate::utils::logger::Logger;
use crate::size::errors::SizeResult;
use crate::size::registry::ExtractorRegistry;

/// Builds the extractor registry described by the CLI arguments
///
/// `--formats gif,png` keeps only the extractors for those tags.
pub fn registry_from_args(args: &ArgMatches) -> SizeResult<ExtractorRegistry> {
    let mut registry = ExtractorRegistry::with_defaults();

    if let Some(list) = args.get_one::<String>("formats") {
        let wanted: Vec<&str> = list
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        registry.retain_formats(&wanted);
        debug!("Restricted extractors to {:?}", registry.names());

        if registry.is_empty() {
            return Err(format!("No extractor supports formats: {}", list).into());
        }
    }

    Ok(registry)
}

/// Factory for creating command instances based on CLI arguments
pub struct SizekitCommandFactory;

impl SizekitCommandFactory {
    /// Create a new factory instance
    pub fn new() -> Self {
        SizekitCommandFactory
    }
}

impl Default for SizekitCommandFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CommandFactory<'a> for SizekitCommandFactory {
    fn create_command(&self, args: &ArgMatches, logger: &'a Logger) -> SizeResult<Box<dyn Command + 'a>> {
        let registry = registry_from_args(args)?;

        if args.get_flag("list-formats") {
            Ok(Box::new(ListFormatsCommand::new(registry, logger)))
        } else {
            Ok(Box::new(InfoCommand::new(args, registry, logger)?))
        }
    }
}
