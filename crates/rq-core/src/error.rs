use thiserror::Error;

#[derive(Error, Debug)]
pub enum RqError {
    #[error("Unsupported file extension: {extension}")]
    UnsupportedFormat { extension: String },
    #[error("Error extracting text from {format} file: {cause}")]
    ExtractionFailure { format: String, cause: String },
    #[error("File size {size_bytes} bytes exceeds the {max_mb} MB limit")]
    SizeLimitExceeded { size_bytes: usize, max_mb: u64 },
    #[error("No text could be extracted from the file")]
    EmptyDocument,
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, RqError>;
