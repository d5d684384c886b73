//! Lazily grown prefix of the stream used for signature tests

use std::io::{ErrorKind, Read};

use crate::size::errors::SizeResult;

/// Bytes read from the start of the stream for format detection
///
/// The buffer only ever grows. A source shorter than the requested size
/// leaves the buffer short rather than failing.
#[derive(Debug, Default)]
pub struct SniffBuffer {
    bytes: Vec<u8>,
}

impl SniffBuffer {
    /// Creates an empty buffer with room for `capacity` bytes
    pub fn with_capacity(capacity: usize) -> Self {
        SniffBuffer {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Reads from `reader` until the buffer holds `needed` bytes or the
    /// stream ends
    ///
    /// The reader must be positioned right after the bytes already buffered.
    pub fn fill_to<R: Read + ?Sized>(&mut self, reader: &mut R, needed: usize) -> SizeResult<()> {
        while self.bytes.len() < needed {
            let start = self.bytes.len();
            self.bytes.resize(needed, 0);
            match reader.read(&mut self.bytes[start..]) {
                Ok(0) => {
                    self.bytes.truncate(start);
                    break;
                }
                Ok(n) => self.bytes.truncate(start + n),
                Err(e) if e.kind() == ErrorKind::Interrupted => self.bytes.truncate(start),
                Err(e) => {
                    self.bytes.truncate(start);
                    return Err(e.into());
                }
            }
        }
        Ok(())
    }

    /// The buffered bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of buffered bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when nothing has been buffered
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}
