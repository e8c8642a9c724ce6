//! Correlates two captures of one traffic stream — taken before ("pre")
//! and after ("post") a network path — by payload content hash, and
//! derives per-time-bucket loss, duplication, latency and throughput
//! statistics.

pub mod bucket;
pub mod correlate;
pub mod engine;
pub mod error;
pub mod params;
pub mod record;
pub mod report;
pub mod validate;

pub use engine::{run, RunOutput, RunWarnings};
pub use error::{EngineError, EngineResult};
pub use params::RunConfig;
