//! GIF logical screen descriptor
//!
//! A GIF starts with `GIF`, a three byte version (`87a`, `89a`), then the
//! logical screen width and height as little-endian u16 values.

use std::io::SeekFrom;

use crate::io::byte_order::{self, ByteOrder};
use crate::io::seekable::SeekableReader;
use crate::size::errors::{join_results, SizeError, SizeResult};
use crate::size::types::ImageSize;

use super::SizeExtractor;

const GIF_SIGNATURE: &[u8] = b"GIF";
const SCREEN_DESCRIPTOR_OFFSET: u64 = 6;

/// Extractor for GIF images
pub struct GifExtractor;

impl SizeExtractor for GifExtractor {
    fn name(&self) -> &'static str {
        "gif"
    }

    fn formats(&self) -> &'static [&'static str] {
        &["gif"]
    }

    fn buf_size(&self) -> usize {
        GIF_SIGNATURE.len()
    }

    fn match_format(&self, buf: &[u8]) -> Option<&'static str> {
        buf.starts_with(GIF_SIGNATURE).then_some("gif")
    }

    fn extract_size(&self, reader: &mut dyn SeekableReader) -> SizeResult<ImageSize> {
        reader.seek(SeekFrom::Start(SCREEN_DESCRIPTOR_OFFSET))?;

        let width = byte_order::read_u16(reader, ByteOrder::LittleEndian);
        let height = byte_order::read_u16(reader, ByteOrder::LittleEndian);
        let (width, height) = join_results(width, height)
            .map_err(|e| SizeError::truncated("gif", e))?;

        Ok(ImageSize::new(u32::from(width), u32::from(height)))
    }
}
