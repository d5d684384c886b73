//! Tests for the HEIF extractor

extern crate std;

use std::io::Cursor;
use crate::formats::{HeifExtractor, SizeExtractor};
use crate::size::errors::SizeError;
use crate::size::types::ImageSize;
use super::test_utils::{bmff_box, ftyp, heif_file, irot, ispe, merge};

fn extract(data: Vec<u8>) -> Result<ImageSize, SizeError> {
    HeifExtractor.extract_size(&mut Cursor::new(data))
}

fn sniff(data: &[u8]) -> Option<&'static str> {
    let end = data.len().min(HeifExtractor.buf_size());
    HeifExtractor.match_format(&data[..end])
}

#[test]
fn test_heif_major_brands() {
    std::assert_eq!(sniff(&ftyp(b"heic", &[])), Some("heic"));
    std::assert_eq!(sniff(&ftyp(b"hevx", &[])), Some("heic"));
    std::assert_eq!(sniff(&ftyp(b"avif", &[])), Some("avif"));
    std::assert_eq!(sniff(&ftyp(b"MA1B", &[])), Some("avif"));
    std::assert_eq!(sniff(&ftyp(b"jpgs", &[])), Some("jpeg"));
    std::assert_eq!(sniff(&ftyp(b"isom", &[])), None);
}

#[test]
fn test_heif_compatible_brand_lookup() {
    std::assert_eq!(sniff(&ftyp(b"mif1", &[b"mif1", b"heic"])), Some("heic"));
    std::assert_eq!(sniff(&ftyp(b"msf1", &[b"msf1", b"hevc"])), Some("heic"));
    std::assert_eq!(sniff(&ftyp(b"mif1", &[b"miaf", b"avif"])), Some("avif"));
    // A codec brand not preceded by a compatible brand does not count
    std::assert_eq!(sniff(&ftyp(b"mif1", &[b"isom", b"heic"])), None);
}

#[test]
fn test_heif_requires_ftyp() {
    std::assert_eq!(HeifExtractor.match_format(b"\0\0\0\x18moovheic"), None);
    std::assert_eq!(HeifExtractor.match_format(b"\0\0\0\x18ftyp"), None);
}

#[test]
fn test_heif_spatial_extent() {
    let data = heif_file(b"heic", &[bmff_box(b"hvcC", &[0u8; 10]), ispe(2448, 3264)]);
    std::assert_eq!(extract(data).unwrap(), ImageSize::new(2448, 3264));
}

#[test]
fn test_heif_rotation_swaps_dimensions() {
    let quarter = heif_file(b"heic", &[ispe(2448, 3264), irot(1)]);
    std::assert_eq!(extract(quarter).unwrap(), ImageSize::new(3264, 2448));

    let three_quarters = heif_file(b"heic", &[irot(3), ispe(2448, 3264)]);
    std::assert_eq!(extract(three_quarters).unwrap(), ImageSize::new(3264, 2448));

    let half = heif_file(b"heic", &[ispe(2448, 3264), irot(2)]);
    std::assert_eq!(extract(half).unwrap(), ImageSize::new(2448, 3264));
}

#[test]
fn test_heif_largest_extent_wins() {
    let thumb_last = heif_file(b"avif", &[ispe(1280, 720), ispe(320, 240)]);
    std::assert_eq!(extract(thumb_last).unwrap(), ImageSize::new(1280, 720));

    let thumb_first = heif_file(b"avif", &[ispe(320, 240), ispe(1280, 720)]);
    std::assert_eq!(extract(thumb_first).unwrap(), ImageSize::new(1280, 720));
}

#[test]
fn test_heif_missing_spatial_extent() {
    let data = heif_file(b"heic", &[bmff_box(b"hvcC", &[0u8; 10])]);
    let err = extract(data).unwrap_err();
    std::assert!(std::matches!(err, SizeError::MissingSpatialExtent));
}

#[test]
fn test_heif_corrupted_property_box() {
    let mut bad = vec![0, 0, 0, 4];
    bad.extend_from_slice(b"colr");
    let data = heif_file(b"heic", &[bad, ispe(10, 10)]);

    let err = extract(data).unwrap_err();
    std::assert!(std::matches!(err, SizeError::CorruptedBox { size: 4, .. }));
}

#[test]
fn test_heif_invalid_box_before_target() {
    let mut bad_hdlr = vec![0, 0, 0, 3];
    bad_hdlr.extend_from_slice(b"hdlr");
    let meta = bmff_box(b"meta", &merge(&[&[0, 0, 0, 0], &bad_hdlr]));
    let data = merge(&[&ftyp(b"heic", &[b"mif1"]), &meta]);

    let err = extract(data).unwrap_err();
    std::assert!(std::matches!(err, SizeError::InvalidBoxSize { size: 3, .. }));
}

#[test]
fn test_heif_missing_meta_reaches_end_of_stream() {
    let data = merge(&[&ftyp(b"heic", &[b"mif1"]), &bmff_box(b"mdat", &[0u8; 32])]);
    let err = extract(data).unwrap_err();
    std::assert!(err.is_eof());
}

#[test]
fn test_heif_truncated_extent() {
    let full = heif_file(b"heic", &[ispe(2448, 3264)]);
    // ispe is the last property; only ipma and mdat follow it
    let height_end = full.len() - bmff_box(b"ipma", &[0u8; 8]).len() - bmff_box(b"mdat", &[0xAB; 16]).len();
    for len in 12..height_end {
        std::assert!(extract(full[..len].to_vec()).is_err(), "length {}", len);
    }
    std::assert!(extract(full[..height_end].to_vec()).is_ok());
}

#[test]
fn test_heif_oversized_property_ends_walk() {
    // Declares 100 bytes but only 12 remain in ipco
    let mut oversized = vec![0, 0, 0, 100];
    oversized.extend_from_slice(b"hvcC");
    oversized.extend_from_slice(&[0u8; 4]);

    let data = heif_file(b"heic", &[ispe(5, 6), oversized]);
    std::assert_eq!(extract(data).unwrap(), ImageSize::new(5, 6));
}

#[test]
fn test_heif_padded_properties_skip_to_declared_end() {
    let padded_irot = bmff_box(b"irot", &[1, 0, 0, 0]);
    let mut extent = vec![0u8; 4];
    extent.extend_from_slice(&[0, 0, 0, 7, 0, 0, 0, 9]);
    extent.extend_from_slice(&[0xEE; 4]);
    let padded_ispe = bmff_box(b"ispe", &extent);

    let data = heif_file(b"heic", &[padded_irot, padded_ispe, ispe(2, 2)]);
    std::assert_eq!(extract(data).unwrap(), ImageSize::new(9, 7));
}

#[test]
fn test_heif_empty_rotation_box() {
    let data = heif_file(b"heic", &[bmff_box(b"irot", &[]), ispe(7, 9)]);
    std::assert_eq!(extract(data).unwrap(), ImageSize::new(7, 9));
}
