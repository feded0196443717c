use std::path::Path;

use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::Frame;

pub trait FrameReader {
    /// Hands every page of `path` to `on_frame` in file order and returns the page count.
    ///
    /// Only one decoded frame is alive at a time. An error from `on_frame`
    /// stops reading and is returned unchanged.
    fn read_frames(&self, path: &Path, on_frame: &mut dyn FnMut(Frame) -> Result<()>) -> Result<usize>;
}
