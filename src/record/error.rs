use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Frame {frame_number}: hash is not valid hex: {reason}")]
    InvalidHashEncoding { frame_number: u64, reason: String },

    #[error("Frame {frame_number}: hash decodes to {got} bytes, expected 32")]
    InvalidHashLength { frame_number: u64, got: usize },

    #[error("Frame {frame_number}: payload length must be positive")]
    EmptyPayload { frame_number: u64 },

    #[error("Record stream is not a valid JSON array: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error reading record stream: {0}")]
    Io(#[from] std::io::Error),
}

pub type FormatResult<T> = Result<T, FormatError>;
