use thiserror::Error;

use crate::record::{ContentHash, FormatError, StreamKind};

#[derive(Error, Debug)]
pub enum OrderingError {
    #[error("{stream} stream: frame_number {current} is not greater than the previous one ({previous})")]
    FrameNumber {
        stream: StreamKind,
        previous: u64,
        current: u64,
    },

    #[error("{stream} stream: frame_time_epoch {current} is earlier than the previous one ({previous})")]
    TimestampDecreased {
        stream: StreamKind,
        previous: i64,
        current: i64,
    },

    #[error("{stream} stream: frame_time_epoch {at} repeats the previous one")]
    TimestampRepeated { stream: StreamKind, at: i64 },
}

/// Two pre-stream occurrences of one payload hash so close together that
/// post arrivals cannot be attributed to either occurrence reliably.
#[derive(Error, Debug)]
#[error(
    "pre stream: hash {hash} repeats after {separation_ms} ms, \
     below the {min_separation_ms} ms disambiguation window"
)]
pub struct DuplicateCollisionError {
    pub hash: ContentHash,
    pub first_ns: i64,
    pub second_ns: i64,
    pub separation_ms: i64,
    pub min_separation_ms: i64,
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Ordering(#[from] OrderingError),

    #[error(transparent)]
    DuplicateCollision(#[from] DuplicateCollisionError),
}

pub type ValidationResult<T> = Result<T, ValidationError>;
