//! Tests for the GIF extractor

extern crate std;

use std::io::Cursor;
use crate::formats::{GifExtractor, SizeExtractor};
use crate::size::errors::SizeError;
use crate::size::types::ImageSize;
use super::test_utils::merge;

fn valid_gif() -> Vec<u8> {
    merge(&[b"GIF", b"89a", &[0x01, 0x00], &[0x02, 0x00]])
}

#[test]
fn test_gif_buf_size_is_signature_length() {
    std::assert_eq!(GifExtractor.buf_size(), 3);
}

#[test]
fn test_gif_format_detection() {
    std::assert_eq!(GifExtractor.match_format(&valid_gif()), Some("gif"));
    std::assert_eq!(GifExtractor.match_format(b"NOTGIFHEADER"), None);
    std::assert_eq!(GifExtractor.match_format(b"GI"), None);
}

#[test]
fn test_gif_extract_size() {
    let mut cursor = Cursor::new(valid_gif());
    let size = GifExtractor.extract_size(&mut cursor).unwrap();
    std::assert_eq!(size, ImageSize::new(1, 2));
}

#[test]
fn test_gif_missing_height() {
    let data = merge(&[b"GIF", b"87a", &[0x01, 0x00]]);
    let mut cursor = Cursor::new(data);

    let err = GifExtractor.extract_size(&mut cursor).unwrap_err();
    std::assert!(std::matches!(err, SizeError::TruncatedHeader { format: "gif", .. }));
    std::assert!(err.is_eof());
}

#[test]
fn test_gif_missing_both_fields_joins_errors() {
    let mut cursor = Cursor::new(b"GIF89a".to_vec());

    match GifExtractor.extract_size(&mut cursor).unwrap_err() {
        SizeError::TruncatedHeader { source, .. } => {
            std::assert_eq!(source.errors().len(), 2);
        }
        other => std::panic!("unexpected error: {}", other),
    }
}
