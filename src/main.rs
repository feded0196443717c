use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{error, info, warn};

use andor_merge_rs::image_pipeline::{
    resolve_inputs, ChannelMergePipeline, CropRect, MergeConfig, OutputMode, TiffCompression,
};
use andor_merge_rs::logger;

const EXAMPLES: &str = "Examples:
    merge-tool -t merged.tif '*.tif'
    merge-tool -s -t merged_and_sorted.tif '*.tif'
    merge-tool -s -c 12x34x65x120 -t merged_and_sorted_and_cropped.tif '*.tif'
    merge-tool -s -c 12x34x65x120 -p -t merged_and_sorted_and_cropped_and_split '*.tif'";

#[derive(Parser)]
#[command(
    name = "merge-tool",
    about = "Merge dual-channel camera TIFF channels and files into a single TIFF or one TIFF per channel",
    after_help = EXAMPLES
)]
struct Cli {
    /// Glob pattern for the input files; only the first pattern is used
    #[arg(required = true)]
    files: Vec<String>,

    /// Merged TIFF file to be created
    #[arg(short, long)]
    target: PathBuf,

    /// Sort filenames by the number before the suffix
    #[arg(short, long)]
    sort: bool,

    /// Split channels into separate files; _ch1 and _ch2 are added to the file name
    #[arg(short = 'p', long)]
    split: bool,

    /// Crop both channels to LxTxRxB: upper left then lower right corner, origin at upper left
    #[arg(short, long, value_name = "LxTxRxB")]
    crop: Option<String>,

    /// Compression for the output pages
    #[arg(long, value_enum, default_value_t = CompressionArg::None)]
    compression: CompressionArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum CompressionArg {
    None,
    Lzw,
    Deflate,
}

impl From<CompressionArg> for TiffCompression {
    fn from(arg: CompressionArg) -> Self {
        match arg {
            CompressionArg::None => TiffCompression::None,
            CompressionArg::Lzw => TiffCompression::Lzw,
            CompressionArg::Deflate => TiffCompression::Deflate,
        }
    }
}

fn main() -> ExitCode {
    logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    // Validated before anything touches the filesystem.
    let crop = cli
        .crop
        .as_deref()
        .map(CropRect::parse)
        .transpose()
        .context("Incorrect crop argument")?;
    if let Some(rect) = &crop {
        info!("Cropping to {}", rect);
    }

    let (pattern, ignored) = cli
        .files
        .split_first()
        .context("No input pattern given")?;
    if !ignored.is_empty() {
        warn!(
            "Only the first pattern is used, ignoring {} more: {:?}",
            ignored.len(),
            ignored
        );
    }

    let inputs = resolve_inputs(pattern, cli.sort)
        .with_context(|| format!("Failed to resolve input files from {pattern}"))?;

    let mode = if cli.split {
        OutputMode::Split
    } else {
        OutputMode::Merged
    };
    let config = MergeConfig::builder()
        .mode(mode)
        .crop(crop)
        .compression(cli.compression.into())
        .build();

    let pipeline = ChannelMergePipeline::new(config);
    info!("Output mode: {:?}", pipeline.config().mode);
    info!("Compression: {:?}", pipeline.config().compression);
    let summary = pipeline
        .merge_files(&inputs, &cli.target)
        .with_context(|| format!("Failed to merge into {}", cli.target.display()))?;

    for output in &summary.outputs {
        info!("Wrote {}", output.display());
    }
    Ok(())
}
