//! PNG image header
//!
//! After the 8 byte signature comes the IHDR chunk: a 4 byte length, the
//! `IHDR` tag, then width and height as big-endian u32 values.

use log::debug;
use std::io::SeekFrom;

use crate::io::byte_order::{self, ByteOrder};
use crate::io::seekable::SeekableReader;
use crate::size::errors::{join_results, SizeError, SizeResult};
use crate::size::types::ImageSize;

use super::SizeExtractor;

const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47];
const IHDR_TAG: &[u8; 4] = b"IHDR";
const IHDR_TAG_OFFSET: u64 = 12;
const IHDR_DIMENSIONS_OFFSET: u64 = 16;
// Some encoders do not put IHDR first; dimensions are then read from here.
const LEGACY_DIMENSIONS_OFFSET: u64 = 8;

/// Extractor for PNG images
pub struct PngExtractor;

impl SizeExtractor for PngExtractor {
    fn name(&self) -> &'static str {
        "png"
    }

    fn formats(&self) -> &'static [&'static str] {
        &["png"]
    }

    fn buf_size(&self) -> usize {
        PNG_SIGNATURE.len()
    }

    fn match_format(&self, buf: &[u8]) -> Option<&'static str> {
        buf.starts_with(PNG_SIGNATURE).then_some("png")
    }

    fn extract_size(&self, reader: &mut dyn SeekableReader) -> SizeResult<ImageSize> {
        reader.seek(SeekFrom::Start(IHDR_TAG_OFFSET))?;
        let tag = byte_order::read_tag(reader).map_err(|e| SizeError::truncated("png", e))?;

        let offset = if &tag == IHDR_TAG {
            IHDR_DIMENSIONS_OFFSET
        } else {
            debug!("PNG chunk at offset {} is not IHDR, using legacy offset", IHDR_TAG_OFFSET);
            LEGACY_DIMENSIONS_OFFSET
        };
        reader.seek(SeekFrom::Start(offset))?;

        let width = byte_order::read_u32(reader, ByteOrder::BigEndian);
        let height = byte_order::read_u32(reader, ByteOrder::BigEndian);
        let (width, height) = join_results(width, height)
            .map_err(|e| SizeError::truncated("png", e))?;

        Ok(ImageSize::new(width, height))
    }
}
