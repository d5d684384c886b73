//! Per-format header extractors
//!
//! Each image format is a strategy implementing [`SizeExtractor`]: how many
//! bytes it needs to recognize itself, the signature test, and the routine
//! that reads width and height from the stream.

mod gif;
mod jpeg;
mod png;
mod webp;
mod heif;
#[cfg(test)]
mod tests;

pub use gif::GifExtractor;
pub use heif::HeifExtractor;
pub use jpeg::JpegExtractor;
pub use png::PngExtractor;
pub use webp::{WebpExtractor, WEBP_DIMENSION_BIAS};

use crate::io::seekable::SeekableReader;
use crate::size::errors::SizeResult;
use crate::size::types::ImageSize;

/// Strategy trait for extracting dimensions from one image format
pub trait SizeExtractor: Send + Sync {
    /// Short name of the extractor, used for listing and filtering
    fn name(&self) -> &'static str;

    /// Format tags this extractor can report
    fn formats(&self) -> &'static [&'static str] {
        &[]
    }

    /// Number of leading bytes the signature test needs
    fn buf_size(&self) -> usize;

    /// Tests the sniff buffer for this format's signature
    ///
    /// The buffer may be shorter than [`SizeExtractor::buf_size`] when the
    /// source itself is shorter. Returns the format tag on a match.
    fn match_format(&self, buf: &[u8]) -> Option<&'static str>;

    /// Reads width and height from a stream positioned at the image start
    ///
    /// Offsets are absolute; the routine may leave the cursor anywhere.
    fn extract_size(&self, reader: &mut dyn SeekableReader) -> SizeResult<ImageSize>;
}

/// Built-in extractors in dispatch order
pub fn default_extractors() -> Vec<Box<dyn SizeExtractor>> {
    vec![
        Box::new(JpegExtractor),
        Box::new(GifExtractor),
        Box::new(WebpExtractor),
        Box::new(PngExtractor),
        Box::new(HeifExtractor),
    ]
}
