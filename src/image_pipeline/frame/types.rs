//! Pixel buffer types shared by the reader, splitter and writer

use std::ops::Range;

use crate::image_pipeline::common::error::{MergeError, Result};

/// Width in pixels of one sensor channel.
pub const CHANNEL_WIDTH: usize = 1024;

/// Row-major grayscale samples, keeping the bit depth of the source page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PixelData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl PixelData {
    pub(crate) fn len(&self) -> usize {
        match self {
            PixelData::U8(v) => v.len(),
            PixelData::U16(v) => v.len(),
            PixelData::U32(v) => v.len(),
        }
    }

    pub fn bits_per_sample(&self) -> u32 {
        match self {
            PixelData::U8(_) => 8,
            PixelData::U16(_) => 16,
            PixelData::U32(_) => 32,
        }
    }

    /// Copies `rows` x `cols` out of an image whose rows are `stride` samples long.
    ///
    /// Callers must have checked the ranges against the image bounds.
    pub(crate) fn region(&self, stride: usize, cols: Range<usize>, rows: Range<usize>) -> PixelData {
        match self {
            PixelData::U8(v) => PixelData::U8(copy_region(v, stride, cols, rows)),
            PixelData::U16(v) => PixelData::U16(copy_region(v, stride, cols, rows)),
            PixelData::U32(v) => PixelData::U32(copy_region(v, stride, cols, rows)),
        }
    }
}

fn copy_region<T: Copy>(src: &[T], stride: usize, cols: Range<usize>, rows: Range<usize>) -> Vec<T> {
    let mut out = Vec::with_capacity(cols.len() * rows.len());
    for row in rows {
        let start = row * stride;
        out.extend_from_slice(&src[start + cols.start..start + cols.end]);
    }
    out
}

/// One full camera frame with both channels concatenated horizontally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    data: PixelData,
}

impl Frame {
    pub fn new(width: usize, height: usize, data: PixelData) -> Result<Self> {
        if width == 0 || height == 0 || data.len() != width * height {
            return Err(MergeError::InvalidDimensions(width, height));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &PixelData {
        &self.data
    }
}

/// One channel of a frame, possibly cropped. Owns its samples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelImage {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
    /// Row-major samples, `width * height` long
    pub data: PixelData,
}

impl ChannelImage {
    /// Same region copy as the splitter uses, applied to an already split image.
    pub fn crop(&self, cols: Range<usize>, rows: Range<usize>) -> Result<ChannelImage> {
        if cols.is_empty() || rows.is_empty() || cols.end > self.width || rows.end > self.height {
            return Err(MergeError::CropOutOfBounds {
                rect: format!("{},{} X {},{}", cols.start, rows.start, cols.end, rows.end),
                width: self.width,
                height: self.height,
            });
        }
        Ok(ChannelImage {
            width: cols.len(),
            height: rows.len(),
            data: self.data.region(self.width, cols, rows),
        })
    }
}
