//! WebP RIFF container
//!
//! `RIFF`, a little-endian file size, `WEBP`, then the first chunk whose
//! tag selects the bitstream: `VP8 ` (lossy), `VP8L` (lossless) or `VP8X`
//! (extended). Each stores dimensions differently.

use log::debug;
use std::io::SeekFrom;

use crate::io::byte_order::{self, ByteOrder};
use crate::io::seekable::SeekableReader;
use crate::size::errors::{join_results, SizeError, SizeResult};
use crate::size::types::ImageSize;

use super::SizeExtractor;

const WEBP_SIGNATURE: &[u8] = b"WEBP";
/// `RIFF` tag and file size precede the signature
const RIFF_PREFIX_LEN: usize = 8;
const CHUNK_TAG_OFFSET: u64 = (RIFF_PREFIX_LEN + WEBP_SIGNATURE.len()) as u64;

const VP8_DIMENSIONS_OFFSET: u64 = 26;
const VP8L_DIMENSIONS_OFFSET: u64 = 21;
const VP8X_DIMENSIONS_OFFSET: u64 = 24;

const VP8L_FIELD_MASK: u32 = 0x3FFF;
const VP8L_FIELD_BITS: u32 = 14;

/// Added to the VP8L and VP8X dimension fields, which store size minus one
pub const WEBP_DIMENSION_BIAS: u32 = 1;

/// Extractor for WebP images
pub struct WebpExtractor;

impl WebpExtractor {
    fn vp8_size(reader: &mut dyn SeekableReader) -> SizeResult<ImageSize> {
        reader.seek(SeekFrom::Start(VP8_DIMENSIONS_OFFSET))?;

        let width = byte_order::read_u16(reader, ByteOrder::LittleEndian);
        let height = byte_order::read_u16(reader, ByteOrder::LittleEndian);
        let (width, height) = join_results(width, height)
            .map_err(|e| SizeError::truncated("webp", e))?;

        Ok(ImageSize::new(u32::from(width), u32::from(height)))
    }

    fn vp8l_size(reader: &mut dyn SeekableReader) -> SizeResult<ImageSize> {
        reader.seek(SeekFrom::Start(VP8L_DIMENSIONS_OFFSET))?;

        let packed = byte_order::read_u32(reader, ByteOrder::LittleEndian)
            .map_err(|e| SizeError::truncated("webp", e))?;
        let width = (packed & VP8L_FIELD_MASK) + WEBP_DIMENSION_BIAS;
        let height = ((packed >> VP8L_FIELD_BITS) & VP8L_FIELD_MASK) + WEBP_DIMENSION_BIAS;

        Ok(ImageSize::new(width, height))
    }

    fn vp8x_size(reader: &mut dyn SeekableReader) -> SizeResult<ImageSize> {
        reader.seek(SeekFrom::Start(VP8X_DIMENSIONS_OFFSET))?;

        let width = byte_order::read_uint(reader, 3, ByteOrder::LittleEndian);
        let height = byte_order::read_uint(reader, 3, ByteOrder::LittleEndian);
        let (width, height) = join_results(width, height)
            .map_err(|e| SizeError::truncated("webp", e))?;

        Ok(ImageSize::new(width + WEBP_DIMENSION_BIAS, height + WEBP_DIMENSION_BIAS))
    }
}

impl SizeExtractor for WebpExtractor {
    fn name(&self) -> &'static str {
        "webp"
    }

    fn formats(&self) -> &'static [&'static str] {
        &["webp"]
    }

    fn buf_size(&self) -> usize {
        RIFF_PREFIX_LEN + WEBP_SIGNATURE.len()
    }

    fn match_format(&self, buf: &[u8]) -> Option<&'static str> {
        let signature = buf.get(RIFF_PREFIX_LEN..self.buf_size())?;
        (signature == WEBP_SIGNATURE).then_some("webp")
    }

    fn extract_size(&self, reader: &mut dyn SeekableReader) -> SizeResult<ImageSize> {
        reader.seek(SeekFrom::Start(CHUNK_TAG_OFFSET))?;
        let tag = byte_order::read_tag(reader).map_err(|e| SizeError::truncated("webp", e))?;
        debug!("WebP chunk {:?}", String::from_utf8_lossy(&tag));

        match tag[3] {
            b' ' => Self::vp8_size(reader),
            b'L' => Self::vp8l_size(reader),
            b'X' => Self::vp8x_size(reader),
            _ => Err(SizeError::UnknownSubformat(tag)),
        }
    }
}
