use thiserror::Error;

use crate::params::ParameterMismatchError;
use crate::record::FormatError;
use crate::validate::ValidationError;

/// Every fatal condition of a run. Fatal errors abort before any output is
/// produced; there is no partial-report mode.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    ParameterMismatch(#[from] ParameterMismatchError),

    #[error("bucket duration must be a positive number of seconds, got {0}")]
    InvalidBucketDuration(f64),
}

pub type EngineResult<T> = Result<T, EngineError>;
