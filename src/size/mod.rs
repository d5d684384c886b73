//! Image size detection core
//!
//! This module holds the result types, the error type, and the registry
//! that sniffs a stream and dispatches it to the matching format extractor.

pub mod errors;
pub mod types;
pub mod sniff;
pub mod registry;
#[cfg(test)]
mod tests;

pub use errors::{SizeError, SizeResult};
pub use registry::ExtractorRegistry;
pub use types::{ImageInfo, ImageSize};
