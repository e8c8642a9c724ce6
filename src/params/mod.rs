pub mod error;
pub mod types;

pub use error::ParameterMismatchError;
pub use types::{ensure_matching_metadata, CaptureMetadata, RunConfig, RUN_ID_KEY};
