use thiserror::Error;

use crate::record::StreamKind;

#[derive(Error, Debug)]
pub enum ParameterMismatchError {
    #[error("capture parameter {key:?} differs between sides: pre={pre}, post={post}")]
    ValueMismatch {
        key: String,
        pre: serde_json::Value,
        post: serde_json::Value,
    },

    #[error("capture parameter {key:?} is missing from the {stream} side")]
    MissingKey { key: String, stream: StreamKind },
}
