use std::path::PathBuf;
use thiserror::Error;

use crate::labels::RectId;

/// The main error type for markbox operations.
#[derive(Debug, Error)]
pub enum MarkboxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid image dimensions {width}x{height}; conversion needs positive finite sizes")]
    InvalidImageDimensions { width: f64, height: f64 },

    #[error("corrupt label file {path} at line {line}: {message}")]
    CorruptLabelFile {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("no rectangle with id {0} in the live label set")]
    UnknownRectangle(RectId),

    #[error("failed to read image data from {path}: {source}")]
    MissingImageData {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("no class selected; pick a class before drawing")]
    NoClassSelected,

    #[error("failed to read options file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse options file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("predictions folder {path} does not exist")]
    PredictionsMissing { path: PathBuf },

    #[error("detector run failed: {message}")]
    DetectorFailed { message: String },
}
