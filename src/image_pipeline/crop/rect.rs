use std::fmt;
use std::str::FromStr;

use crate::image_pipeline::common::error::{MergeError, Result};

/// Separator between the four crop values, as in `12x34x65x120`.
pub const CROP_DELIMITER: char = 'x';

/// Rectangle in channel-local pixel coordinates, origin at the upper left.
///
/// `left..right` selects columns and `top..bottom` selects rows. A constructed
/// `CropRect` always has a non-empty extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    left: usize,
    top: usize,
    right: usize,
    bottom: usize,
}

impl CropRect {
    pub fn new(left: usize, top: usize, right: usize, bottom: usize) -> Result<Self> {
        if right <= left || bottom <= top {
            return Err(MergeError::InvalidCrop(format!(
                "right/bottom corner ({right},{bottom}) must lie below and right of ({left},{top})"
            )));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Parses `LxTxRxB`.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(CROP_DELIMITER).collect();
        if parts.len() != 4 {
            return Err(MergeError::InvalidCrop(format!(
                "expected upper left and lower right corners as LxTxRxB, got '{input}'"
            )));
        }

        let mut values = [0usize; 4];
        for (slot, part) in values.iter_mut().zip(&parts) {
            *slot = part.trim().parse().map_err(|_| {
                MergeError::InvalidCrop(format!("'{}' is not a pixel coordinate", part.trim()))
            })?;
        }

        let [left, top, right, bottom] = values;
        Self::new(left, top, right, bottom)
    }

    pub fn left(&self) -> usize {
        self.left
    }

    pub fn top(&self) -> usize {
        self.top
    }

    pub fn right(&self) -> usize {
        self.right
    }

    pub fn bottom(&self) -> usize {
        self.bottom
    }

    pub fn width(&self) -> usize {
        self.right - self.left
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top
    }

    /// Whether the rectangle lies entirely inside a `width` x `height` image.
    pub fn fits_within(&self, width: usize, height: usize) -> bool {
        self.right <= width && self.bottom <= height
    }
}

impl FromStr for CropRect {
    type Err = MergeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{} X {},{}",
            self.left, self.top, self.right, self.bottom
        )
    }
}
