//! Tests for the sniff buffer

extern crate std;

use std::io::Cursor;
use crate::size::sniff::SniffBuffer;

#[test]
fn test_sniff_buffer_grows_on_demand() {
    let mut cursor = Cursor::new(b"0123456789abcdef".to_vec());
    let mut sniff = SniffBuffer::with_capacity(8);

    sniff.fill_to(&mut cursor, 4).unwrap();
    std::assert_eq!(sniff.as_bytes(), b"0123");

    sniff.fill_to(&mut cursor, 3).unwrap();
    std::assert_eq!(sniff.len(), 4);

    sniff.fill_to(&mut cursor, 12).unwrap();
    std::assert_eq!(sniff.as_bytes(), b"0123456789ab");
}

#[test]
fn test_sniff_buffer_short_source() {
    let mut cursor = Cursor::new(b"GI".to_vec());
    let mut sniff = SniffBuffer::default();

    sniff.fill_to(&mut cursor, 24).unwrap();
    std::assert_eq!(sniff.as_bytes(), b"GI");

    let mut empty = Cursor::new(Vec::new());
    let mut sniff = SniffBuffer::default();
    sniff.fill_to(&mut empty, 4).unwrap();
    std::assert!(sniff.is_empty());
}
