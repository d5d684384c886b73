use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use log::info;

use crate::formats::SizeExtractor;
use crate::io::seekable::{ReadAt, SectionReader};
use crate::size::errors::SizeResult;
use crate::size::registry::ExtractorRegistry;
use crate::size::types::ImageInfo;

/// Opens `path` and extracts its image info
///
/// The file is closed before returning on every path.
pub fn extract_file_info<P: AsRef<Path>>(registry: &ExtractorRegistry, path: P) -> SizeResult<ImageInfo> {
    let path = path.as_ref();
    info!("Reading image header: {}", path.display());
    let mut file = File::open(path)?;
    extract_info(registry, &mut file)
}

/// Extracts image info from an in-memory buffer
pub fn extract_blob_info(registry: &ExtractorRegistry, bytes: &[u8]) -> SizeResult<ImageInfo> {
    extract_info(registry, &mut Cursor::new(bytes))
}

/// Extracts image info from a seekable stream
///
/// The stream is returned to its entry position afterwards.
pub fn extract_info<R: Read + Seek>(registry: &ExtractorRegistry, reader: &mut R) -> SizeResult<ImageInfo> {
    registry.extract(reader)
}

/// Extracts image info from a positional source without a cursor of its own
///
/// The source is viewed as a section starting at offset 0 with no upper bound.
pub fn extract_info_at<R: ReadAt>(registry: &ExtractorRegistry, source: R) -> SizeResult<ImageInfo> {
    let mut section = SectionReader::unbounded(source);
    registry.extract(&mut section)
}

/// Main interface to the SizeKit library
///
/// Owns an extractor registry and forwards every entry point to it.
pub struct SizeKit {
    registry: ExtractorRegistry,
}

impl Default for SizeKit {
    fn default() -> Self {
        Self::new()
    }
}

impl SizeKit {
    /// Create a SizeKit with the built-in extractors
    pub fn new() -> Self {
        SizeKit {
            registry: ExtractorRegistry::with_defaults(),
        }
    }

    /// Create a SizeKit around an existing registry
    pub fn with_registry(registry: ExtractorRegistry) -> Self {
        SizeKit { registry }
    }

    /// Add an extractor, tried after the ones already registered
    pub fn register(&mut self, extractor: Box<dyn SizeExtractor>) -> &mut Self {
        self.registry.register(extractor);
        self
    }

    /// The registry used for dispatch
    pub fn registry(&self) -> &ExtractorRegistry {
        &self.registry
    }

    /// Mutable access to the registry
    pub fn registry_mut(&mut self) -> &mut ExtractorRegistry {
        &mut self.registry
    }

    /// See [`extract_file_info`]
    pub fn file_info<P: AsRef<Path>>(&self, path: P) -> SizeResult<ImageInfo> {
        extract_file_info(&self.registry, path)
    }

    /// See [`extract_blob_info`]
    pub fn blob_info(&self, bytes: &[u8]) -> SizeResult<ImageInfo> {
        extract_blob_info(&self.registry, bytes)
    }

    /// See [`extract_info`]
    pub fn info<R: Read + Seek>(&self, reader: &mut R) -> SizeResult<ImageInfo> {
        extract_info(&self.registry, reader)
    }

    /// See [`extract_info_at`]
    pub fn info_at<R: ReadAt>(&self, source: R) -> SizeResult<ImageInfo> {
        extract_info_at(&self.registry, source)
    }
}
