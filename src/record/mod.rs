pub mod error;
pub mod loader;
pub mod types;

pub use error::{FormatError, FormatResult};
pub use loader::{records_from_reader, records_from_slice, records_from_str};
pub use types::{ContentHash, PacketRecord, StreamKind};
