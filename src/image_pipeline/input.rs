//! Input file discovery
//!
//! Expands a glob pattern into the ordered list of acquisition files the
//! merge pipeline consumes.

mod resolver;

pub use resolver::{resolve_inputs, sort_by_trailing_number, trailing_number};
