use std::path::PathBuf;
use thiserror::Error;

/// One input-file-to-output-file conversion unit produced by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionTask {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

/// Messages sent from the worker to the interface, in production order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressMessage {
    Info(String),
    Status(String),
    Error(String),
    Done(String),
}

/// Failure that prevents any conversion attempt.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to create output directory: {0}")]
    CreateOutputDir(#[source] std::io::Error),
}

/// Failure converting a single file. Never aborts a run.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to decode HEIC: {0}")]
    Decode(String),
    #[error("failed to encode JPEG: {0}")]
    Encode(#[from] image::ImageError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
