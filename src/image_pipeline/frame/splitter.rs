use std::ops::Range;

use tracing::debug;

use crate::image_pipeline::common::error::{MergeError, Result};
use crate::image_pipeline::crop::CropRect;
use crate::image_pipeline::frame::types::{ChannelImage, Frame, CHANNEL_WIDTH};

/// Cuts a frame at a fixed column into channel 1 (left) and channel 2 (right).
#[derive(Debug, Clone, Copy)]
pub struct FrameSplitter {
    channel_width: usize,
}

impl Default for FrameSplitter {
    fn default() -> Self {
        Self::new(CHANNEL_WIDTH)
    }
}

impl FrameSplitter {
    pub fn new(channel_width: usize) -> Self {
        Self { channel_width }
    }

    /// Splits `frame` into its two channels, cropping both with `crop` if given.
    ///
    /// Channel 1 covers columns `[0, channel_width)`, channel 2 the remaining
    /// columns. The crop is expressed in each channel's own coordinates and
    /// must fit inside both channels.
    pub fn split(&self, frame: &Frame, crop: Option<&CropRect>) -> Result<(ChannelImage, ChannelImage)> {
        let (width, height) = (frame.width(), frame.height());
        if self.channel_width == 0 || width <= self.channel_width {
            return Err(MergeError::InvalidDimensions(width, height));
        }

        let first = self.extract(frame, 0..self.channel_width, crop)?;
        let second = self.extract(frame, self.channel_width..width, crop)?;

        debug!(
            "Split {}x{} frame into {}x{} and {}x{}",
            width, height, first.width, first.height, second.width, second.height
        );
        Ok((first, second))
    }

    fn extract(&self, frame: &Frame, channel: Range<usize>, crop: Option<&CropRect>) -> Result<ChannelImage> {
        let local_width = channel.len();
        let height = frame.height();

        let (cols, rows) = match crop {
            None => (channel, 0..height),
            Some(rect) => {
                if !rect.fits_within(local_width, height) {
                    return Err(MergeError::CropOutOfBounds {
                        rect: rect.to_string(),
                        width: local_width,
                        height,
                    });
                }
                let offset = channel.start;
                (
                    offset + rect.left()..offset + rect.right(),
                    rect.top()..rect.bottom(),
                )
            }
        };

        Ok(ChannelImage {
            width: cols.len(),
            height: rows.len(),
            data: frame.data().region(frame.width(), cols, rows),
        })
    }
}
