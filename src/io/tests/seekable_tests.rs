//! Tests for the section reader

extern crate std;

use std::io::{Read, Seek, SeekFrom};
use crate::io::seekable::{ReadAt, SectionReader};

#[test]
fn test_slice_read_at() {
    let data: &[u8] = b"0123456789";
    let mut buf = [0u8; 4];

    std::assert_eq!(data.read_at(&mut buf, 3).unwrap(), 4);
    std::assert_eq!(&buf, b"3456");
    std::assert_eq!(data.read_at(&mut buf, 8).unwrap(), 2);
    std::assert_eq!(data.read_at(&mut buf, 10).unwrap(), 0);
    std::assert_eq!(data.read_at(&mut buf, u64::MAX).unwrap(), 0);
}

#[test]
fn test_unbounded_section_reads_and_seeks() {
    let data = b"0123456789".to_vec();
    let mut section = SectionReader::unbounded(&data);

    let mut buf = [0u8; 3];
    section.read_exact(&mut buf).unwrap();
    std::assert_eq!(&buf, b"012");

    std::assert_eq!(section.seek(SeekFrom::Current(2)).unwrap(), 5);
    section.read_exact(&mut buf).unwrap();
    std::assert_eq!(&buf, b"567");

    std::assert_eq!(section.seek(SeekFrom::Start(0)).unwrap(), 0);
    std::assert_eq!(section.stream_position().unwrap(), 0);
}

#[test]
fn test_bounded_section_stops_at_limit() {
    let data = b"0123456789".to_vec();
    let mut section = SectionReader::new(&data, 2, 4);

    let mut out = Vec::new();
    section.read_to_end(&mut out).unwrap();
    std::assert_eq!(out, b"2345");
    std::assert_eq!(section.limit(), 4);

    std::assert_eq!(section.seek(SeekFrom::End(-1)).unwrap(), 3);
    std::assert!(section.seek(SeekFrom::Current(-10)).is_err());
}
