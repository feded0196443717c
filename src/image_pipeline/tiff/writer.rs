use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::frame::ChannelImage;

pub trait PageWriter {
    /// Appends `page` as the next image of the output stream.
    fn write_page(&mut self, page: &ChannelImage) -> Result<()>;
    fn pages_written(&self) -> usize;
}
