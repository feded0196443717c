//! TIFF reading and writing module
//!
//! Multi-page TIFF input is decoded one page at a time; output pages are
//! appended to BigTIFF containers.

mod bigtiff_writer;
mod reader;
mod tiff_frame_reader;
pub mod types;
mod writer;

pub use bigtiff_writer::BigTiffPageWriter;
pub use reader::FrameReader;
pub use tiff_frame_reader::TiffFrameReader;
pub use types::{MergeConfig, MergeConfigBuilder, OutputMode, TiffCompression};
pub use writer::PageWriter;
