//! Byte order handling for image headers
//!
//! This module implements the Strategy pattern for handling different
//! byte orders (little-endian vs big-endian) when reading header fields.
//! Every multi-byte read names its byte order explicitly.

use byteorder::{BigEndian, ByteOrder as _, LittleEndian, ReadBytesExt};
use std::io::{self, Read};

use crate::io::seekable::SeekableReader;
use crate::size::errors::{SizeError, SizeResult};

/// Byte order of a multi-byte field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Least significant byte first
    LittleEndian,
    /// Most significant byte first
    BigEndian,
}

impl ByteOrder {
    /// Parses a byte order tag
    ///
    /// Accepts `le`/`little`/`II` and `be`/`big`/`MM`, case-insensitively for
    /// the word forms.
    pub fn from_tag(tag: &str) -> SizeResult<Self> {
        match tag {
            "II" => Ok(ByteOrder::LittleEndian),
            "MM" => Ok(ByteOrder::BigEndian),
            _ => match tag.to_ascii_lowercase().as_str() {
                "le" | "little" => Ok(ByteOrder::LittleEndian),
                "be" | "big" => Ok(ByteOrder::BigEndian),
                _ => Err(SizeError::UnsupportedEndianness(tag.to_string())),
            },
        }
    }

    /// Returns a string representation of this byte order
    pub fn name(&self) -> &'static str {
        match self {
            ByteOrder::LittleEndian => "Little Endian",
            ByteOrder::BigEndian => "Big Endian",
        }
    }

    /// Creates the appropriate handler for this byte order
    pub fn create_handler(&self) -> Box<dyn ByteOrderHandler> {
        match self {
            ByteOrder::LittleEndian => Box::new(LittleEndianHandler),
            ByteOrder::BigEndian => Box::new(BigEndianHandler),
        }
    }
}

/// Turns an end-of-stream failure into a short read of `requested` bytes
fn short_read(requested: usize) -> impl FnOnce(io::Error) -> SizeError {
    move |e| match e.kind() {
        io::ErrorKind::UnexpectedEof => SizeError::ShortRead { requested },
        _ => SizeError::IoError(e),
    }
}

/// Trait for byte order handling strategies
///
/// Each read consumes exactly the field width or fails without a value.
pub trait ByteOrderHandler: Send + Sync {
    /// The byte order this handler reads
    fn byte_order(&self) -> ByteOrder;

    /// Read a u16 value
    fn read_u16(&self, reader: &mut dyn SeekableReader) -> SizeResult<u16> {
        read_u16(reader, self.byte_order())
    }

    /// Read a 24-bit value into the low bits of a u32
    fn read_u24(&self, reader: &mut dyn SeekableReader) -> SizeResult<u32> {
        read_u24(reader, self.byte_order())
    }

    /// Read a u32 value
    fn read_u32(&self, reader: &mut dyn SeekableReader) -> SizeResult<u32> {
        read_u32(reader, self.byte_order())
    }

    /// Read a single byte; byte order has no effect
    fn read_u8(&self, reader: &mut dyn SeekableReader) -> SizeResult<u8> {
        read_u8(reader)
    }
}

/// Little-endian byte order handler
pub struct LittleEndianHandler;

impl ByteOrderHandler for LittleEndianHandler {
    fn byte_order(&self) -> ByteOrder {
        ByteOrder::LittleEndian
    }
}

/// Big-endian byte order handler
pub struct BigEndianHandler;

impl ByteOrderHandler for BigEndianHandler {
    fn byte_order(&self) -> ByteOrder {
        ByteOrder::BigEndian
    }
}

/// Reads an unsigned integer of `byte_count` bytes (1 to 4)
pub fn read_uint<R: Read + ?Sized>(reader: &mut R, byte_count: usize, order: ByteOrder) -> SizeResult<u32> {
    if !(1..=4).contains(&byte_count) {
        return Err(SizeError::UnsupportedWidth(byte_count));
    }

    let mut buf = [0u8; 4];
    reader
        .read_exact(&mut buf[..byte_count])
        .map_err(short_read(byte_count))?;

    let value = match order {
        ByteOrder::LittleEndian => LittleEndian::read_uint(&buf[..byte_count], byte_count),
        ByteOrder::BigEndian => BigEndian::read_uint(&buf[..byte_count], byte_count),
    };
    Ok(value as u32)
}

/// Reads a u16 in the given byte order
pub fn read_u16<R: Read + ?Sized>(reader: &mut R, order: ByteOrder) -> SizeResult<u16> {
    match order {
        ByteOrder::LittleEndian => reader.read_u16::<LittleEndian>(),
        ByteOrder::BigEndian => reader.read_u16::<BigEndian>(),
    }
    .map_err(short_read(2))
}

/// Reads a 24-bit value in the given byte order
pub fn read_u24<R: Read + ?Sized>(reader: &mut R, order: ByteOrder) -> SizeResult<u32> {
    match order {
        ByteOrder::LittleEndian => reader.read_u24::<LittleEndian>(),
        ByteOrder::BigEndian => reader.read_u24::<BigEndian>(),
    }
    .map_err(short_read(3))
}

/// Reads a u32 in the given byte order
pub fn read_u32<R: Read + ?Sized>(reader: &mut R, order: ByteOrder) -> SizeResult<u32> {
    match order {
        ByteOrder::LittleEndian => reader.read_u32::<LittleEndian>(),
        ByteOrder::BigEndian => reader.read_u32::<BigEndian>(),
    }
    .map_err(short_read(4))
}

/// Reads one byte
pub fn read_u8<R: Read + ?Sized>(reader: &mut R) -> SizeResult<u8> {
    reader.read_u8().map_err(short_read(1))
}

/// Reads a four-character code such as a box or chunk tag
pub fn read_tag<R: Read + ?Sized>(reader: &mut R) -> SizeResult<[u8; 4]> {
    let mut tag = [0u8; 4];
    reader.read_exact(&mut tag).map_err(short_read(4))?;
    Ok(tag)
}
