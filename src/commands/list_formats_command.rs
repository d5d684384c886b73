//! Lists the registered extractors in dispatch order

use crate::size::errors::SizeResult;
use crate::size::registry::ExtractorRegistry;
use crate::utils::logger::Logger;

use super::command_traits::Command;

/// Command for printing the extractor order
pub struct ListFormatsCommand<'a> {
    registry: ExtractorRegistry,
    logger: &'a Logger,
}

impl<'a> ListFormatsCommand<'a> {
    /// Create a new list command
    pub fn new(registry: ExtractorRegistry, logger: &'a Logger) -> Self {
        ListFormatsCommand { registry, logger }
    }
}

impl<'a> Command for ListFormatsCommand<'a> {
    fn execute(&self) -> SizeResult<()> {
        for (i, extractor) in self.registry.iter().enumerate() {
            let formats = extractor.formats().join(", ");
            self.logger.log(&format!("{}. {} ({})", i + 1, extractor.name(), formats))?;
        }
        Ok(())
    }
}
