//! Merge configuration types

use std::path::{Path, PathBuf};

use tiff::encoder::Compression;
use tiff::encoder::compression::DeflateLevel;

use crate::image_pipeline::crop::CropRect;
use crate::image_pipeline::frame::CHANNEL_WIDTH;

/// TIFF compression applied to output pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiffCompression {
    /// No compression (fastest, largest file)
    None,
    /// LZW compression
    Lzw,
    /// Deflate compression at the fast level
    Deflate,
}

impl TiffCompression {
    pub(crate) fn to_encoder(self) -> Compression {
        match self {
            TiffCompression::None => Compression::Uncompressed,
            TiffCompression::Lzw => Compression::Lzw,
            TiffCompression::Deflate => Compression::Deflate(DeflateLevel::Fast),
        }
    }
}

/// How channel images are distributed over output files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One file, channel 1 then channel 2 for every source frame
    Merged,
    /// One file per channel, `_ch1` and `_ch2` added to the target name
    Split,
}

impl OutputMode {
    /// Files written for `target` in this mode, channel 1 first.
    pub fn output_paths(&self, target: &Path) -> Vec<PathBuf> {
        match self {
            OutputMode::Merged => vec![target.to_path_buf()],
            OutputMode::Split => vec![channel_path(target, 1), channel_path(target, 2)],
        }
    }
}

/// `out.tif` becomes `out_ch1.tif`; a target without extension gets `.tif`.
fn channel_path(target: &Path, channel: u8) -> PathBuf {
    let stem = target
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = target
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| "tif".to_string());
    target.with_file_name(format!("{stem}_ch{channel}.{extension}"))
}

/// Configuration for a channel merge run
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Single interleaved output or one output per channel
    pub mode: OutputMode,
    /// Rectangle applied to both channels, in channel coordinates
    pub crop: Option<CropRect>,
    /// Column at which frames are split; channel 1 is this wide
    pub channel_width: usize,
    /// Compression used for every output page
    pub compression: TiffCompression,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::Merged,
            crop: None,
            channel_width: CHANNEL_WIDTH,
            compression: TiffCompression::None,
        }
    }
}

impl MergeConfig {
    pub fn builder() -> MergeConfigBuilder {
        MergeConfigBuilder::default()
    }
}

/// Builder for MergeConfig
#[derive(Default)]
pub struct MergeConfigBuilder {
    mode: Option<OutputMode>,
    crop: Option<Option<CropRect>>,
    channel_width: Option<usize>,
    compression: Option<TiffCompression>,
}

impl MergeConfigBuilder {
    pub fn mode(mut self, mode: OutputMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn crop(mut self, crop: Option<CropRect>) -> Self {
        self.crop = Some(crop);
        self
    }

    pub fn channel_width(mut self, width: usize) -> Self {
        self.channel_width = Some(width);
        self
    }

    pub fn compression(mut self, compression: TiffCompression) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn build(self) -> MergeConfig {
        let default = MergeConfig::default();
        MergeConfig {
            mode: self.mode.unwrap_or(default.mode),
            crop: self.crop.unwrap_or(default.crop),
            channel_width: self.channel_width.unwrap_or(default.channel_width),
            compression: self.compression.unwrap_or(default.compression),
        }
    }
}
