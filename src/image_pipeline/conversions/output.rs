use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::image_pipeline::common::error::{MergeError, Result};
use crate::image_pipeline::frame::ChannelImage;
use crate::image_pipeline::tiff::PageWriter;

/// Destination for the two channel images of each frame.
pub enum OutputSink<W: PageWriter> {
    /// Channel 1 then channel 2, both into one stream
    Merged(W),
    /// Channel 1 into `first`, channel 2 into `second`
    Split { first: W, second: W },
}

impl<W: PageWriter> OutputSink<W> {
    pub fn append(&mut self, first: &ChannelImage, second: &ChannelImage) -> Result<()> {
        match self {
            OutputSink::Merged(writer) => {
                writer.write_page(first)?;
                writer.write_page(second)
            }
            OutputSink::Split {
                first: first_writer,
                second: second_writer,
            } => {
                first_writer.write_page(first)?;
                second_writer.write_page(second)
            }
        }
    }

    /// Pages written across all streams.
    pub fn pages_written(&self) -> usize {
        self.pages_per_output().iter().sum()
    }

    /// Pages written to each stream, channel 1 first.
    pub fn pages_per_output(&self) -> Vec<usize> {
        match self {
            OutputSink::Merged(writer) => vec![writer.pages_written()],
            OutputSink::Split { first, second } => vec![first.pages_written(), second.pages_written()],
        }
    }
}

/// Buffered output file owned by the pipeline for the length of a run.
pub(crate) struct OutputFile {
    path: PathBuf,
    pub(crate) writer: BufWriter<File>,
}

impl OutputFile {
    pub(crate) fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .map_err(|e| MergeError::OutputWriteError(format!("{}: {}", path.display(), e)))?;
        debug!("Opened output {}", path.display());
        Ok(Self {
            path: path.to_path_buf(),
            writer: BufWriter::new(file),
        })
    }

    /// Flushes buffered pages and syncs the file to disk.
    pub(crate) fn close(self) -> Result<PathBuf> {
        let file = self
            .writer
            .into_inner()
            .map_err(|e| MergeError::OutputWriteError(format!("{}: {}", self.path.display(), e.error())))?;
        file.sync_all()
            .map_err(|e| MergeError::OutputWriteError(format!("{}: {}", self.path.display(), e)))?;
        debug!("Closed output {}", self.path.display());
        Ok(self.path)
    }
}

/// Closes every file, returning the paths or the first close failure.
pub(crate) fn close_all(files: Vec<OutputFile>) -> Result<Vec<PathBuf>> {
    let mut closed = Vec::with_capacity(files.len());
    let mut first_error = None;
    for file in files {
        match file.close() {
            Ok(path) => closed.push(path),
            Err(e) => {
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(closed),
    }
}

/// Deletes outputs that never received a page; a bare header is not a readable TIFF.
pub(crate) fn remove_empty(paths: &[PathBuf], pages: &[usize]) {
    for (path, &count) in paths.iter().zip(pages) {
        if count > 0 {
            continue;
        }
        match fs::remove_file(path) {
            Ok(()) => debug!("Removed empty output {}", path.display()),
            Err(e) => warn!("Could not remove empty output {}: {}", path.display(), e),
        }
    }
}
