pub mod correlator;
pub mod index;
pub mod types;
pub mod window;

pub use correlator::Correlator;
pub use index::{PostArrival, PostIndex};
pub use types::{BucketOutcome, CorrelationOutcome};
pub use window::LatencyWindow;
