//! Seekable reader trait and implementations
//!
//! This module provides a unified trait for readers that support both
//! reading and seeking, and a section view that turns a positional
//! (`read_at`) source into one.

use std::io::{self, Read, Seek, SeekFrom};

/// Trait for readers that can both read and seek
///
/// Extractors take `&mut dyn SeekableReader` so the dispatcher can hand the
/// same stream to whichever format matched.
pub trait SeekableReader: Read + Seek {}

// Blanket implementation for any type that implements the required traits
impl<T: Read + Seek> SeekableReader for T {}

/// Positional reads that do not move any shared cursor
pub trait ReadAt {
    /// Reads into `buf` starting at absolute `offset`
    ///
    /// Returns the number of bytes read, 0 at or past the end of the source.
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize>;
}

impl ReadAt for [u8] {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        let start = match usize::try_from(offset) {
            Ok(start) if start < self.len() => start,
            _ => return Ok(0),
        };
        let n = buf.len().min(self.len() - start);
        buf[..n].copy_from_slice(&self[start..start + n]);
        Ok(n)
    }
}

impl ReadAt for Vec<u8> {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        self.as_slice().read_at(buf, offset)
    }
}

#[cfg(unix)]
impl ReadAt for std::fs::File {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        std::os::unix::fs::FileExt::read_at(self, buf, offset)
    }
}

impl<T: ReadAt + ?Sized> ReadAt for &T {
    fn read_at(&self, buf: &mut [u8], offset: u64) -> io::Result<usize> {
        (**self).read_at(buf, offset)
    }
}

/// A bounded `Read + Seek` window over a `ReadAt` source
///
/// Positions are relative to `base`; reads never go past `base + limit`.
pub struct SectionReader<R> {
    source: R,
    base: u64,
    limit: u64,
    position: u64,
}

impl<R: ReadAt> SectionReader<R> {
    /// Creates a section of `limit` bytes starting at `base`
    pub fn new(source: R, base: u64, limit: u64) -> Self {
        SectionReader {
            source,
            base,
            limit,
            position: 0,
        }
    }

    /// Creates a section from offset 0 with no declared upper bound
    pub fn unbounded(source: R) -> Self {
        Self::new(source, 0, u64::MAX)
    }

    /// Size of the section as declared at construction
    pub fn limit(&self) -> u64 {
        self.limit
    }
}

impl<R: ReadAt> Read for SectionReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.position >= self.limit {
            return Ok(0);
        }
        let remaining = self.limit - self.position;
        let wanted = (buf.len() as u64).min(remaining) as usize;
        let offset = self.base.saturating_add(self.position);
        let n = self.source.read_at(&mut buf[..wanted], offset)?;
        self.position += n as u64;
        Ok(n)
    }
}

impl<R: ReadAt> Seek for SectionReader<R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::Current(delta) => self.position.checked_add_signed(delta),
            SeekFrom::End(delta) => self.limit.checked_add_signed(delta),
        };

        match target {
            Some(position) => {
                self.position = position;
                Ok(position)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}
