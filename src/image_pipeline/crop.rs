//! Crop rectangle parsing and validation
//!
//! A crop rectangle is given on the command line as `LxTxRxB` and is applied
//! in channel-local coordinates to both halves of every frame.

mod rect;

pub use rect::{CropRect, CROP_DELIMITER};
