//! Dual-channel frame merging pipeline
//!
//! This module resolves input files, splits every frame into its two sensor
//! channels and appends the channel images to one or two BigTIFF outputs.

pub mod common;
pub mod conversions;
pub mod crop;
pub mod frame;
pub mod input;
pub mod tiff;

pub use common::{
    MergeError,
    Result,
};

pub use crop::CropRect;

pub use frame::{
    ChannelImage,
    Frame,
    FrameSplitter,
    PixelData,
    CHANNEL_WIDTH,
};

pub use input::{
    resolve_inputs,
    sort_by_trailing_number,
};

pub use self::tiff::{
    BigTiffPageWriter,
    FrameReader,
    MergeConfig,
    MergeConfigBuilder,
    OutputMode,
    PageWriter,
    TiffCompression,
    TiffFrameReader,
};

pub use conversions::{
    ChannelMergePipeline,
    MergeSummary,
    OutputSink,
};
