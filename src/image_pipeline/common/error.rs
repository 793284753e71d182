use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("No codestream bytes supplied")]
    EmptyInput,

    #[error("Failed to decode JPEG 2000 codestream: {0}")]
    DecodeFailure(String),

    #[error("Invalid decoded image: {0}")]
    InvalidImage(String),

    #[error("Unsupported component count: {0} (expected 1, 3 or 4)")]
    UnsupportedComponentCount(usize),

    #[error("Failed to encode TIFF image: {0}")]
    EncodeError(String),

    #[error("Invalid image dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
