pub mod io;
pub mod size;
pub mod formats;
pub mod utils;
pub mod commands;
pub mod api;

pub use crate::api::{extract_blob_info, extract_file_info, extract_info, extract_info_at, SizeKit};

pub use formats::SizeExtractor;
pub use size::{ExtractorRegistry, ImageInfo, ImageSize, SizeError, SizeResult};
pub use io::{ByteOrder, ReadAt, SectionReader, SeekableReader};
