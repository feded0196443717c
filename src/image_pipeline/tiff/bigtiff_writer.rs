use std::io::{Seek, Write};

use tiff::TiffError;
use tiff::encoder::colortype::{Gray8, Gray16, Gray32};
use tiff::encoder::{TiffEncoder, TiffKindBig};
use tracing::debug;

use crate::image_pipeline::common::error::{MergeError, Result};
use crate::image_pipeline::frame::{ChannelImage, PixelData};
use crate::image_pipeline::tiff::types::TiffCompression;
use crate::image_pipeline::tiff::writer::PageWriter;

/// Appends grayscale pages to a BigTIFF stream.
///
/// The header is written on construction; each page completes its directory
/// and links it into the chain before `write_page` returns, so the stream is
/// a valid TIFF after every successful call. No Software tag is written.
pub struct BigTiffPageWriter<W: Write + Seek> {
    encoder: TiffEncoder<W, TiffKindBig>,
    pages: usize,
}

impl<W: Write + Seek> BigTiffPageWriter<W> {
    pub fn new(output: W, compression: TiffCompression) -> Result<Self> {
        let encoder = TiffEncoder::new_big(output)
            .map_err(encode_error)?
            .with_compression(compression.to_encoder());
        Ok(Self { encoder, pages: 0 })
    }
}

impl<W: Write + Seek> PageWriter for BigTiffPageWriter<W> {
    fn write_page(&mut self, page: &ChannelImage) -> Result<()> {
        let (width, height) = match (u32::try_from(page.width), u32::try_from(page.height)) {
            (Ok(w), Ok(h)) => (w, h),
            _ => return Err(MergeError::InvalidDimensions(page.width, page.height)),
        };

        debug!("Writing page {}: {}x{}", self.pages, width, height);
        let written = match &page.data {
            PixelData::U8(v) => self.encoder.write_image::<Gray8>(width, height, v),
            PixelData::U16(v) => self.encoder.write_image::<Gray16>(width, height, v),
            PixelData::U32(v) => self.encoder.write_image::<Gray32>(width, height, v),
        };
        written.map_err(encode_error)?;

        self.pages += 1;
        Ok(())
    }

    fn pages_written(&self) -> usize {
        self.pages
    }
}

fn encode_error(err: TiffError) -> MergeError {
    match err {
        TiffError::IoError(e) => MergeError::IoError(e),
        other => MergeError::EncodeError(other.to_string()),
    }
}
