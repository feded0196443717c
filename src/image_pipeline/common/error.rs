use thiserror::Error;

#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Failed to decode TIFF page: {0}")]
    DecodeError(String),

    #[error("Failed to encode TIFF page: {0}")]
    EncodeError(String),

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid crop argument: {0}")]
    InvalidCrop(String),

    #[error("Crop {rect} is out of range for a {width}x{height} channel")]
    CropOutOfBounds {
        rect: String,
        width: usize,
        height: usize,
    },

    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    #[error("No input files match {0}")]
    NoInputs(String),

    #[error("Cannot sort {0}: file name has no number")]
    MissingSortKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MergeError>;
