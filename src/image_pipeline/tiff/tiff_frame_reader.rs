//! Multi-page TIFF frame reader built on the `tiff` decoder.
//!
//! Accepts classic TIFF and BigTIFF files holding single-sample grayscale
//! pages of 8, 16 or 32 bits.

use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use tiff::decoder::{Decoder, DecodingResult};
use tiff::{ColorType, TiffError};
use tracing::debug;

use crate::image_pipeline::common::error::{MergeError, Result};
use crate::image_pipeline::frame::{Frame, PixelData};
use crate::image_pipeline::tiff::reader::FrameReader;

pub struct TiffFrameReader;

impl FrameReader for TiffFrameReader {
    fn read_frames(&self, path: &Path, on_frame: &mut dyn FnMut(Frame) -> Result<()>) -> Result<usize> {
        let file = File::open(path)
            .map_err(|e| MergeError::InputReadError(format!("{}: {}", path.display(), e)))?;
        let mut decoder =
            Decoder::new(BufReader::new(file)).map_err(|e| decode_error(path, e))?;

        let mut pages = 0;
        loop {
            let frame = decode_page(&mut decoder, path)?;
            debug!(
                "Decoded page {} of {}: {}x{}, {} bit",
                pages,
                path.display(),
                frame.width(),
                frame.height(),
                frame.data().bits_per_sample()
            );
            on_frame(frame)?;
            pages += 1;

            if !decoder.more_images() {
                break;
            }
            decoder.next_image().map_err(|e| decode_error(path, e))?;
        }

        Ok(pages)
    }
}

fn decode_page<R: Read + Seek>(decoder: &mut Decoder<R>, path: &Path) -> Result<Frame> {
    let colortype = decoder.colortype().map_err(|e| decode_error(path, e))?;
    if !matches!(colortype, ColorType::Gray(8 | 16 | 32)) {
        return Err(MergeError::UnsupportedFormat(format!(
            "{}: {:?} pages are not supported, expected 8, 16 or 32 bit grayscale",
            path.display(),
            colortype
        )));
    }

    let (width, height) = decoder.dimensions().map_err(|e| decode_error(path, e))?;
    let data = match decoder.read_image().map_err(|e| decode_error(path, e))? {
        DecodingResult::U8(v) => PixelData::U8(v),
        DecodingResult::U16(v) => PixelData::U16(v),
        DecodingResult::U32(v) => PixelData::U32(v),
        _ => {
            return Err(MergeError::UnsupportedFormat(format!(
                "{}: only unsigned integer samples are supported",
                path.display()
            )));
        }
    };

    Frame::new(width as usize, height as usize, data)
}

fn decode_error(path: &Path, err: TiffError) -> MergeError {
    match err {
        TiffError::IoError(e) => MergeError::InputReadError(format!("{}: {}", path.display(), e)),
        other => MergeError::DecodeError(format!("{}: {}", path.display(), other)),
    }
}
