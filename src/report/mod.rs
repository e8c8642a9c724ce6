pub mod aggregator;
pub mod types;

pub use aggregator::assemble_report;
pub use types::{Counts, StatisticsReport, TimeSeriesEntry, Units};
