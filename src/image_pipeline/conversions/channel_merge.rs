use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use crate::image_pipeline::{
    common::error::{MergeError, Result},
    conversions::output::{self, OutputFile, OutputSink},
    frame::{Frame, FrameSplitter},
    tiff::{BigTiffPageWriter, FrameReader, MergeConfig, PageWriter, TiffFrameReader},
};

/// Counts for a finished merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeSummary {
    /// Input files read
    pub files: usize,
    /// Source frames read across all files
    pub frames: usize,
    /// Channel pages written across all outputs
    pub pages: usize,
    /// Files written, channel 1 first; empty when writing to a caller-provided sink
    pub outputs: Vec<PathBuf>,
}

pub struct ChannelMergePipeline<R: FrameReader> {
    reader: R,
    splitter: FrameSplitter,
    config: MergeConfig,
}

impl ChannelMergePipeline<TiffFrameReader> {
    pub fn new(config: MergeConfig) -> Self {
        Self::with_custom(TiffFrameReader, config)
    }
}

impl<R: FrameReader> ChannelMergePipeline<R> {
    pub fn with_custom(reader: R, config: MergeConfig) -> Self {
        Self {
            reader,
            splitter: FrameSplitter::new(config.channel_width),
            config,
        }
    }

    /// Merges `inputs`, in order, into the output file(s) derived from `target`.
    ///
    /// Outputs are created before the first frame is read and are always
    /// flushed and closed before returning, also when processing fails. The
    /// processing error takes precedence over a close error. On failure,
    /// outputs that never received a page are deleted.
    #[instrument(skip(self, inputs, target), fields(input_count = inputs.len(), output = %target.display()))]
    pub fn merge_files(&self, inputs: &[PathBuf], target: &Path) -> Result<MergeSummary> {
        if inputs.is_empty() {
            return Err(MergeError::NoInputs("empty input list".to_string()));
        }

        let paths = self.config.mode.output_paths(target);
        let mut files = Vec::with_capacity(paths.len());
        for path in &paths {
            files.push(OutputFile::create(path)?);
        }

        let (outcome, pages) = self.write_outputs(inputs, &mut files);
        let closed = output::close_all(files);

        let mut summary = match outcome {
            Ok(summary) => summary,
            Err(e) => {
                output::remove_empty(&paths, &pages);
                return Err(e);
            }
        };
        summary.outputs = closed?;
        info!(
            "Merged {} frames from {} files into {} pages",
            summary.frames, summary.files, summary.pages
        );
        Ok(summary)
    }

    /// Runs the merge over `files`, also reporting how many pages each file received.
    fn write_outputs(&self, inputs: &[PathBuf], files: &mut [OutputFile]) -> (Result<MergeSummary>, Vec<usize>) {
        let count = files.len();
        let mut sink = match self.open_sink(files) {
            Ok(sink) => sink,
            Err(e) => return (Err(e), vec![0; count]),
        };
        let outcome = self.merge_into(inputs, &mut sink);
        (outcome, sink.pages_per_output())
    }

    fn open_sink<'a>(&self, files: &'a mut [OutputFile]) -> Result<OutputSink<BigTiffPageWriter<&'a mut BufWriter<File>>>> {
        let compression = self.config.compression;
        let count = files.len();
        match files {
            [only] => Ok(OutputSink::Merged(BigTiffPageWriter::new(&mut only.writer, compression)?)),
            [first, second] => Ok(OutputSink::Split {
                first: BigTiffPageWriter::new(&mut first.writer, compression)?,
                second: BigTiffPageWriter::new(&mut second.writer, compression)?,
            }),
            _ => Err(MergeError::OutputWriteError(format!(
                "expected one or two outputs, got {count}"
            ))),
        }
    }

    /// Streams every frame of `inputs`, in order, through the splitter into `sink`.
    ///
    /// The first read, split or write failure stops the run.
    pub fn merge_into<W: PageWriter>(&self, inputs: &[PathBuf], sink: &mut OutputSink<W>) -> Result<MergeSummary> {
        let crop = self.config.crop.as_ref();
        let mut summary = MergeSummary::default();

        for path in inputs {
            info!("Processing {}", path.display());
            let frames = self.reader.read_frames(path, &mut |frame: Frame| {
                let (first, second) = self.splitter.split(&frame, crop)?;
                sink.append(&first, &second)
            })?;
            summary.files += 1;
            summary.frames += frames;
        }

        summary.pages = sink.pages_written();
        Ok(summary)
    }

    pub fn config(&self) -> &MergeConfig {
        &self.config
    }
}
