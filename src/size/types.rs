//! Result types produced by size extraction

use std::fmt;

/// Pixel dimensions of an image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageSize {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl ImageSize {
    /// Creates a new size
    pub fn new(width: u32, height: u32) -> Self {
        ImageSize { width, height }
    }

    /// Width times height, without overflow
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// The same size with width and height exchanged
    pub fn transposed(&self) -> Self {
        ImageSize::new(self.height, self.width)
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Dimensions of an image together with its detected format
///
/// `format` is one of `gif`, `jpeg`, `png`, `webp`, `heic`, `avif`, or a
/// tag supplied by a caller-registered extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    /// Detected dimensions
    pub size: ImageSize,
    /// Format tag
    pub format: String,
}

impl ImageInfo {
    /// Creates image info from a format tag and size
    pub fn new(format: impl Into<String>, size: ImageSize) -> Self {
        ImageInfo {
            size,
            format: format.into(),
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.size.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.size.height
    }
}

impl fmt::Display for ImageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.format, self.size)
    }
}
