//! I/O utilities for header inspection
//!
//! This module provides the seekable stream abstraction, the random-access
//! section view and the byte-order read primitives every extractor uses.

pub mod seekable;
pub mod byte_order;
#[cfg(test)]
mod tests;

pub use byte_order::{BigEndianHandler, ByteOrder, ByteOrderHandler, LittleEndianHandler};
pub use seekable::{ReadAt, SectionReader, SeekableReader};
