//! Caller-owned extractor registry and format dispatch
//!
//! The registry is an ordered list of [`SizeExtractor`] strategies; the
//! first whose signature matches the sniff buffer decides the outcome.

use log::{debug, info};
use std::io::SeekFrom;

use crate::formats::{self, SizeExtractor};
use crate::io::seekable::SeekableReader;
use crate::size::errors::{SizeError, SizeResult};
use crate::size::sniff::SniffBuffer;
use crate::size::types::ImageInfo;

/// Initial number of bytes read before any signature test
const INITIAL_SNIFF_LEN: usize = 4;

/// Ordered set of size extractors
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn SizeExtractor>>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ExtractorRegistry {
    /// Creates a registry with no extractors
    pub fn new() -> Self {
        ExtractorRegistry {
            extractors: Vec::new(),
        }
    }

    /// Creates a registry with the built-in extractors
    ///
    /// Order: JPEG, GIF, WEBP, PNG, HEIF.
    pub fn with_defaults() -> Self {
        ExtractorRegistry {
            extractors: formats::default_extractors(),
        }
    }

    /// Appends an extractor; it is tried after all existing ones
    pub fn register(&mut self, extractor: Box<dyn SizeExtractor>) -> &mut Self {
        debug!("Registering size extractor: {}", extractor.name());
        self.extractors.push(extractor);
        self
    }

    /// Keeps only extractors that report one of `formats` or are named by it
    pub fn retain_formats(&mut self, formats: &[&str]) -> &mut Self {
        self.extractors.retain(|e| {
            formats.contains(&e.name()) || e.formats().iter().any(|f| formats.contains(f))
        });
        self
    }

    /// Names of the registered extractors in dispatch order
    pub fn names(&self) -> Vec<&'static str> {
        self.extractors.iter().map(|e| e.name()).collect()
    }

    /// Registered extractors in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = &dyn SizeExtractor> {
        self.extractors.iter().map(|e| e.as_ref())
    }

    /// Number of registered extractors
    pub fn len(&self) -> usize {
        self.extractors.len()
    }

    /// True when no extractor is registered
    pub fn is_empty(&self) -> bool {
        self.extractors.is_empty()
    }

    /// Detects the format of `reader` and extracts its dimensions
    ///
    /// The image is expected to start at offset 0. Whatever the outcome, the
    /// reader is moved back to where it was on entry; a failure to do so is
    /// joined with the extraction error.
    pub fn extract(&self, reader: &mut dyn SeekableReader) -> SizeResult<ImageInfo> {
        let restore_point = RestorePoint::capture(reader)?;
        let outcome = self.dispatch(reader);
        restore_point.restore(reader, outcome)
    }

    fn dispatch(&self, reader: &mut dyn SeekableReader) -> SizeResult<ImageInfo> {
        reader.seek(SeekFrom::Start(0))?;
        let mut sniff = SniffBuffer::with_capacity(INITIAL_SNIFF_LEN * 2);
        sniff.fill_to(reader, INITIAL_SNIFF_LEN)?;

        for extractor in &self.extractors {
            // The reader is still right after the buffered bytes here
            sniff.fill_to(reader, extractor.buf_size())?;

            let format = match extractor.match_format(sniff.as_bytes()) {
                Some(format) => format,
                None => continue,
            };
            debug!("Signature matched {} extractor ({})", extractor.name(), format);

            reader.seek(SeekFrom::Start(0))?;
            let size = extractor.extract_size(reader)?;
            info!("Detected {} image {}", format, size);
            return Ok(ImageInfo::new(format, size));
        }

        debug!("No extractor matched {} sniffed bytes", sniff.len());
        Err(SizeError::UnknownFormat)
    }
}

/// Stream position to return to once extraction finishes
struct RestorePoint {
    position: u64,
}

impl RestorePoint {
    fn capture(reader: &mut dyn SeekableReader) -> SizeResult<Self> {
        Ok(RestorePoint {
            position: reader.stream_position()?,
        })
    }

    /// Seeks back and folds any seek failure into `outcome`
    fn restore<T>(self, reader: &mut dyn SeekableReader, outcome: SizeResult<T>) -> SizeResult<T> {
        let restored = reader
            .seek(SeekFrom::Start(self.position))
            .err()
            .map(SizeError::from);
        match (outcome, restored) {
            (outcome, None) => outcome,
            (Ok(_), Some(seek)) => Err(seek),
            (Err(e), seek) => Err(e.join_with(seek)),
        }
    }
}
