//! HEIF, HEIC and AVIF (ISO base media file format)
//!
//! The file is a tree of boxes, each a big-endian u32 size (header
//! included) followed by a four-character tag. The dimensions sit in
//! `meta` / `iprp` / `ipco` / `ispe`; an `irot` sibling may rotate them.
//!
//! See:
//!   - <https://en.wikipedia.org/wiki/High_Efficiency_Image_File_Format>
//!   - <https://github.com/nokiatech/heif>

use log::{debug, warn};
use std::io::SeekFrom;

use crate::io::byte_order::{self, ByteOrder, ByteOrderHandler};
use crate::io::seekable::SeekableReader;
use crate::size::errors::{join_results, SizeError, SizeResult};
use crate::size::types::ImageSize;

use super::SizeExtractor;

const FTYP_TAG: &[u8] = b"ftyp";
const SNIFF_LEN: usize = 24;
const MAJOR_BRAND_OFFSET: usize = 8;
const COMPATIBLE_SCAN_OFFSET: usize = 12;

/// Size and tag fields of every box
const BOX_HEADER_LEN: u32 = 8;
/// Version and flags of a full box
const FULL_BOX_HEADER_LEN: i64 = 4;

mod tags {
    pub const FTYP: [u8; 4] = *b"ftyp";
    pub const META: [u8; 4] = *b"meta";
    pub const IPRP: [u8; 4] = *b"iprp";
    pub const IPCO: [u8; 4] = *b"ipco";
    pub const ISPE: [u8; 4] = *b"ispe";
    pub const IROT: [u8; 4] = *b"irot";
}

/// Brands that announce the file follows a HEIF profile; the brand after
/// them names the codec
const COMPATIBLE_BRANDS: [&[u8]; 4] = [b"mif1", b"msf1", b"mif2", b"miaf"];

/// Maps a brand to the format tag reported for it
fn brand_format(brand: &[u8]) -> Option<&'static str> {
    match brand {
        b"heic" | b"heix" | b"heis" | b"hevs" | b"heim" | b"hevm" | b"hevc" | b"hevx" => Some("heic"),
        b"avif" | b"avio" | b"avis" | b"MA1A" | b"MA1B" => Some("avif"),
        b"jpeg" | b"jpgs" => Some("jpeg"),
        _ => None,
    }
}

/// Finds a compatible brand followed directly by a known codec brand
///
/// See: <https://github.com/nokiatech/heif/blob/be43efdf273ae9cf90e552b99f16ac43983f3d19/srcs/reader/heifreaderimpl.cpp#L738>
fn compatible_brand_format(buf: &[u8]) -> Option<&'static str> {
    let end = buf.len().min(SNIFF_LEN);
    (COMPATIBLE_SCAN_OFFSET..end)
        .step_by(4)
        .filter(|&i| i + 8 <= buf.len())
        .filter(|&i| COMPATIBLE_BRANDS.iter().any(|brand| *brand == &buf[i..i + 4]))
        .find_map(|i| brand_format(&buf[i + 4..i + 8]))
}

/// Extractor for HEIF based images (HEIC, AVIF)
pub struct HeifExtractor;

impl HeifExtractor {
    /// Skips sibling boxes until one tagged `tag`, returning its size
    ///
    /// On success the reader sits right after the found box's header.
    fn skip_to_tag(
        reader: &mut dyn SeekableReader,
        handler: &dyn ByteOrderHandler,
        tag: [u8; 4],
    ) -> SizeResult<u32> {
        loop {
            let size = handler.read_u32(reader)?;
            let found = byte_order::read_tag(reader)?;

            if found == tag {
                return Ok(size);
            }
            if size < BOX_HEADER_LEN {
                return Err(SizeError::InvalidBoxSize { tag: found, size });
            }

            debug!("Skipping HEIF box {:?} ({} bytes)", String::from_utf8_lossy(&found), size);
            reader.seek(SeekFrom::Current(i64::from(size - BOX_HEADER_LEN)))?;
        }
    }

    /// Reads the width and height of an `ispe` payload
    fn read_spatial_extent(
        reader: &mut dyn SeekableReader,
        handler: &dyn ByteOrderHandler,
    ) -> SizeResult<ImageSize> {
        reader.seek(SeekFrom::Current(FULL_BOX_HEADER_LEN))?;

        let width = handler.read_u32(reader);
        let height = handler.read_u32(reader);
        let (width, height) = join_results(width, height)
            .map_err(|e| SizeError::truncated("heif", e))?;

        Ok(ImageSize::new(width, height))
    }
}

impl SizeExtractor for HeifExtractor {
    fn name(&self) -> &'static str {
        "heif"
    }

    fn formats(&self) -> &'static [&'static str] {
        &["heic", "avif", "jpeg"]
    }

    fn buf_size(&self) -> usize {
        SNIFF_LEN
    }

    fn match_format(&self, buf: &[u8]) -> Option<&'static str> {
        if buf.get(4..8) != Some(FTYP_TAG) {
            return None;
        }

        let major = buf.get(MAJOR_BRAND_OFFSET..MAJOR_BRAND_OFFSET + 4)?;
        brand_format(major).or_else(|| compatible_brand_format(buf))
    }

    fn extract_size(&self, reader: &mut dyn SeekableReader) -> SizeResult<ImageSize> {
        let handler = ByteOrder::BigEndian.create_handler();
        let handler = handler.as_ref();

        reader.seek(SeekFrom::Start(0))?;
        let ftyp_size = handler.read_u32(reader)?;
        if ftyp_size < BOX_HEADER_LEN {
            return Err(SizeError::InvalidBoxSize { tag: tags::FTYP, size: ftyp_size });
        }
        reader.seek(SeekFrom::Start(u64::from(ftyp_size)))?;

        Self::skip_to_tag(reader, handler, tags::META)?;
        reader.seek(SeekFrom::Current(FULL_BOX_HEADER_LEN))?;
        Self::skip_to_tag(reader, handler, tags::IPRP)?;
        let ipco_size = Self::skip_to_tag(reader, handler, tags::IPCO)?;

        // Bytes of ipco payload not yet walked
        let mut remaining = ipco_size.saturating_sub(BOX_HEADER_LEN);
        let mut best: Option<ImageSize> = None;
        let mut rotation: u8 = 0;

        while remaining >= BOX_HEADER_LEN {
            let size = handler.read_u32(reader)?;
            let tag = byte_order::read_tag(reader)?;
            if size < BOX_HEADER_LEN {
                return Err(SizeError::CorruptedBox { tag, size });
            }

            let consumed = match tag {
                tags::ISPE => {
                    let extent = Self::read_spatial_extent(reader, handler)?;
                    debug!("HEIF ispe {}", extent);
                    // Thumbnails and auxiliary images carry their own ispe
                    if best.map_or(true, |b| extent.area() > b.area()) {
                        best = Some(extent);
                    }
                    12
                }
                tags::IROT if size > BOX_HEADER_LEN => {
                    rotation = handler.read_u8(reader)? & 0x03;
                    debug!("HEIF irot {}", rotation);
                    1
                }
                _ if size >= remaining => {
                    debug!("HEIF box {:?} runs past ipco", String::from_utf8_lossy(&tag));
                    break;
                }
                _ => 0,
            };

            let rest = (size - BOX_HEADER_LEN).saturating_sub(consumed);
            if rest > 0 {
                reader.seek(SeekFrom::Current(i64::from(rest)))?;
            }
            remaining = remaining.saturating_sub(size);
        }

        let extent = match best {
            Some(extent) => extent,
            None => {
                warn!("HEIF property container has no ispe box");
                return Err(SizeError::MissingSpatialExtent);
            }
        };

        // 90 and 270 degree rotations swap the axes
        if rotation == 1 || rotation == 3 {
            Ok(extent.transposed())
        } else {
            Ok(extent)
        }
    }
}
