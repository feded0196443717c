//! Frame model and channel splitting
//!
//! A frame from the dual-channel sensor holds both channels side by side.
//! The splitter cuts it at a fixed column into two independent channel images.

mod splitter;
pub mod types;

pub use splitter::FrameSplitter;
pub use types::{ChannelImage, Frame, PixelData, CHANNEL_WIDTH};
