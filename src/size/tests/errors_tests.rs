//! Tests for error aggregation

extern crate std;

use std::error::Error;
use std::io;
use crate::size::errors::{join_results, SizeError, SizeResult};

#[test]
fn test_join_discards_absent_errors() {
    std::assert!(SizeError::join([None, None]).is_none());

    let single = SizeError::join([None, Some(SizeError::Eof)]).unwrap();
    std::assert!(std::matches!(single, SizeError::Eof));
}

#[test]
fn test_join_keeps_every_error() {
    let joined = SizeError::join([
        Some(SizeError::ShortRead { requested: 2 }),
        None,
        Some(SizeError::UnknownFormat),
    ])
    .unwrap();

    std::assert_eq!(joined.errors().len(), 2);
    std::assert_eq!(
        joined.to_string(),
        "Short read: fewer than 2 bytes available\nUnknown image format"
    );
    std::assert!(joined.is_eof());
}

#[test]
fn test_join_results() {
    let ok: SizeResult<(u16, u16)> = join_results(Ok(1), Ok(2));
    std::assert_eq!(ok.unwrap(), (1, 2));

    let one: SizeResult<(u16, u16)> = join_results(Ok(1), Err(SizeError::Eof));
    std::assert!(std::matches!(one, Err(SizeError::Eof)));

    let both: SizeResult<(u16, u16)> = join_results(
        Err(SizeError::ShortRead { requested: 2 }),
        Err(SizeError::ShortRead { requested: 2 }),
    );
    std::assert_eq!(both.unwrap_err().errors().len(), 2);
}

#[test]
fn test_error_classification() {
    std::assert!(SizeError::UnknownFormat.is_unknown_format());
    std::assert!(!SizeError::NoFrameMarker.is_unknown_format());
    std::assert!(!SizeError::NoFrameMarker.is_eof());

    let joined = SizeError::UnknownFormat.join_with(Some(SizeError::Eof));
    std::assert!(joined.is_unknown_format());
    std::assert!(!SizeError::Eof.join_with(None).is_unknown_format());

    let truncated = SizeError::truncated("gif", SizeError::ShortRead { requested: 2 });
    std::assert!(truncated.is_eof());
    std::assert!(truncated.source().is_some());
}

#[test]
fn test_io_error_conversion() {
    let eof: SizeError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
    std::assert!(std::matches!(eof, SizeError::Eof));

    let denied: SizeError = io::Error::new(io::ErrorKind::PermissionDenied, "denied").into();
    std::assert!(std::matches!(denied, SizeError::IoError(_)));
    std::assert!(!denied.is_eof());
}

#[test]
fn test_message_conversion() {
    let err: SizeError = std::string::String::from("2 of 3 input(s) could not be read").into();
    std::assert!(std::matches!(err, SizeError::GenericError(_)));
    std::assert_eq!(err.to_string(), "2 of 3 input(s) could not be read");
}
