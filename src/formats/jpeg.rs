//! JPEG frame header
//!
//! The file is a sequence of marker segments (`0xFF`, marker byte, length).
//! Dimensions live in the first Start-of-Frame segment, stored as height
//! then width.

use log::debug;
use std::io::SeekFrom;

use crate::io::byte_order::{self, ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::size::errors::{join_results, SizeError, SizeResult};
use crate::size::types::ImageSize;

use super::SizeExtractor;

// Start-of-Image followed by the first marker prefix; the APP marker varies.
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8, 0xFF];

mod markers {
    pub const PREFIX: u8 = 0xFF;
    pub const SOF0: u8 = 0xC0;
    pub const SOF3: u8 = 0xC3;
    pub const EOI: u8 = 0xD9;
    pub const SOS: u8 = 0xDA;
    /// Read when the scan runs into zero padding
    pub const END_SENTINEL: u8 = 0x00;
}

/// Precision byte plus the two reserved bytes before the height field
const FRAME_HEADER_SKIP: i64 = 3;

/// Extractor for JPEG images
pub struct JpegExtractor;

impl JpegExtractor {
    /// Reads the next byte of the marker scan
    fn next_byte(reader: &mut dyn SeekableReader) -> SizeResult<u8> {
        byte_order::read_u8(reader).map_err(|e| if e.is_eof() { SizeError::Eof } else { e })
    }

    /// Reads height and width from a Start-of-Frame segment
    fn read_frame_size(
        reader: &mut dyn SeekableReader,
        handler: &dyn ByteOrderHandler,
    ) -> SizeResult<ImageSize> {
        reader.seek(SeekFrom::Current(FRAME_HEADER_SKIP))?;

        let height = handler.read_u16(reader);
        let width = handler.read_u16(reader);
        let (height, width) = join_results(height, width)?;

        Ok(ImageSize::new(u32::from(width), u32::from(height)))
    }
}

impl SizeExtractor for JpegExtractor {
    fn name(&self) -> &'static str {
        "jpeg"
    }

    fn formats(&self) -> &'static [&'static str] {
        &["jpeg"]
    }

    fn buf_size(&self) -> usize {
        JPEG_SIGNATURE.len()
    }

    fn match_format(&self, buf: &[u8]) -> Option<&'static str> {
        buf.starts_with(JPEG_SIGNATURE).then_some("jpeg")
    }

    fn extract_size(&self, reader: &mut dyn SeekableReader) -> SizeResult<ImageSize> {
        let handler = ByteOrder::BigEndian.create_handler();
        reader.seek(SeekFrom::Start(2))?;

        let mut cursor = Self::next_byte(reader)?;
        while cursor != markers::SOS && cursor != markers::END_SENTINEL {
            while cursor != markers::PREFIX {
                cursor = Self::next_byte(reader)?;
            }
            // Fill bytes may pad a marker prefix
            while cursor == markers::PREFIX {
                cursor = Self::next_byte(reader)?;
            }

            match cursor {
                markers::SOF0..=markers::SOF3 => {
                    debug!("JPEG frame marker {:#04x}", cursor);
                    return Self::read_frame_size(reader, handler.as_ref());
                }
                markers::SOS | markers::EOI => break,
                _ => {}
            }

            let length = handler.read_u16(reader)?;
            if length < 2 {
                return Err(SizeError::InvalidSegmentLength(length));
            }
            debug!("Skipping JPEG segment {:#04x} ({} bytes)", cursor, length);
            reader.seek(SeekFrom::Current(i64::from(length - 2)))?;

            cursor = Self::next_byte(reader)?;
        }

        Err(SizeError::NoFrameMarker)
    }
}
