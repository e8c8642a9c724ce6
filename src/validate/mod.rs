pub mod error;
pub mod validator;

pub use error::{DuplicateCollisionError, OrderingError, ValidationError, ValidationResult};
pub use validator::{validate_post_stream, validate_pre_stream, PreStreamReport};
