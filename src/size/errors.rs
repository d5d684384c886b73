//! Custom error types for size extraction

use std::fmt;
use std::io;

/// Size extraction error types
#[derive(Debug)]
pub enum SizeError {
    /// I/O error other than running out of data
    IoError(io::Error),
    /// Fewer bytes were available than a fixed-width read requested
    ShortRead { requested: usize },
    /// Stream ended while scanning for a structure
    Eof,
    /// Byte order tag not recognized
    UnsupportedEndianness(String),
    /// Integer width outside 1..=4 bytes
    UnsupportedWidth(usize),
    /// No registered extractor matched the sniff buffer
    UnknownFormat,
    /// JPEG scan reached the image data without a Start-of-Frame marker
    NoFrameMarker,
    /// JPEG segment length field smaller than its own two bytes
    InvalidSegmentLength(u16),
    /// HEIF property container holds no `ispe` box
    MissingSpatialExtent,
    /// Box smaller than its header while searching for a tag
    InvalidBoxSize { tag: [u8; 4], size: u32 },
    /// Child box inside `ipco` smaller than its header
    CorruptedBox { tag: [u8; 4], size: u32 },
    /// WEBP chunk tag other than `VP8 `, `VP8L` or `VP8X`
    UnknownSubformat([u8; 4]),
    /// Dimension fields could not be read in full
    TruncatedHeader {
        format: &'static str,
        source: Box<SizeError>,
    },
    /// Several independent failures reported together
    Joined(Vec<SizeError>),
    /// Generic error with message
    GenericError(String),
}

impl SizeError {
    /// Combines independent failures into one error
    ///
    /// Absent errors are dropped. Returns `None` when nothing failed and the
    /// lone error unchanged when only one did.
    pub fn join<I>(errors: I) -> Option<SizeError>
    where
        I: IntoIterator<Item = Option<SizeError>>,
    {
        let mut present = errors.into_iter().flatten();
        let first = present.next()?;
        Some(first.join_with(present))
    }

    /// Appends `others` to this error, which stays unchanged when there are none
    pub fn join_with<I>(self, others: I) -> SizeError
    where
        I: IntoIterator<Item = SizeError>,
    {
        let mut errors = vec![self];
        errors.extend(others);
        if errors.len() == 1 {
            errors.remove(0)
        } else {
            SizeError::Joined(errors)
        }
    }

    /// Returns the individual errors this error is made of
    pub fn errors(&self) -> Vec<&SizeError> {
        match self {
            SizeError::Joined(errors) => errors.iter().collect(),
            other => vec![other],
        }
    }

    /// True when no extractor recognized the input
    ///
    /// Any other error means the format was recognized but the header is
    /// damaged or unreadable.
    pub fn is_unknown_format(&self) -> bool {
        match self {
            SizeError::UnknownFormat => true,
            SizeError::Joined(errors) => errors.iter().any(SizeError::is_unknown_format),
            _ => false,
        }
    }

    /// True when the failure comes from the stream running out of bytes
    pub fn is_eof(&self) -> bool {
        match self {
            SizeError::ShortRead { .. } | SizeError::Eof => true,
            SizeError::IoError(e) => e.kind() == io::ErrorKind::UnexpectedEof,
            SizeError::TruncatedHeader { source, .. } => source.is_eof(),
            SizeError::Joined(errors) => errors.iter().any(SizeError::is_eof),
            _ => false,
        }
    }

    /// Wraps a dimension read failure with the format it came from
    pub(crate) fn truncated(format: &'static str, source: SizeError) -> Self {
        SizeError::TruncatedHeader {
            format,
            source: Box::new(source),
        }
    }
}

fn tag_str(tag: &[u8; 4]) -> String {
    String::from_utf8_lossy(tag).into_owned()
}

impl fmt::Display for SizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeError::IoError(e) => write!(f, "I/O error: {}", e),
            SizeError::ShortRead { requested } => {
                write!(f, "Short read: fewer than {} bytes available", requested)
            }
            SizeError::Eof => write!(f, "Unexpected end of stream"),
            SizeError::UnsupportedEndianness(tag) => write!(f, "Unsupported endianness: {}", tag),
            SizeError::UnsupportedWidth(n) => write!(f, "Unsupported integer width: {} bytes", n),
            SizeError::UnknownFormat => write!(f, "Unknown image format"),
            SizeError::NoFrameMarker => {
                write!(f, "Failed to read image size, stop marker was reached")
            }
            SizeError::InvalidSegmentLength(len) => write!(f, "Invalid JPEG segment length: {}", len),
            SizeError::MissingSpatialExtent => {
                write!(f, "Not enough data to extract size: ispe not found")
            }
            SizeError::InvalidBoxSize { tag, size } => {
                write!(f, "Invalid HEIF box size: {} ({})", size, tag_str(tag))
            }
            SizeError::CorruptedBox { tag, size } => {
                write!(f, "Corrupted image: box {} has size {}", tag_str(tag), size)
            }
            SizeError::UnknownSubformat(tag) => write!(f, "Unknown VP8 tag: {:?}", tag_str(tag)),
            SizeError::TruncatedHeader { format, source } => {
                write!(f, "Truncated {} header: {}", format, source)
            }
            SizeError::Joined(errors) => {
                let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
                write!(f, "{}", messages.join("\n"))
            }
            SizeError::GenericError(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for SizeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SizeError::IoError(e) => Some(e),
            SizeError::TruncatedHeader { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl From<io::Error> for SizeError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::UnexpectedEof => SizeError::Eof,
            _ => SizeError::IoError(error),
        }
    }
}

impl From<String> for SizeError {
    fn from(msg: String) -> Self {
        SizeError::GenericError(msg)
    }
}

/// Result type for size extraction operations
pub type SizeResult<T> = Result<T, SizeError>;

/// Keeps both results when two independent reads are made back to back
///
/// Both values are returned only when both reads succeeded; otherwise the
/// failures are joined.
pub fn join_results<A, B>(a: SizeResult<A>, b: SizeResult<B>) -> SizeResult<(A, B)> {
    match (a, b) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(a), Err(b)) => Err(a.join_with(Some(b))),
    }
}
