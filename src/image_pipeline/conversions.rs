//! Pipeline conversions module
//!
//! Orchestrates reading, splitting and writing for a whole acquisition.

mod channel_merge;
mod output;


pub use channel_merge::{ChannelMergePipeline, MergeSummary};
pub use output::OutputSink;
