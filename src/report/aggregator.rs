use crate::correlate::BucketOutcome;
use crate::params::RunConfig;

use super::types::{Counts, StatisticsReport, TimeSeriesEntry, Units};

// Decimal scaling throughout, never 1024-based.
fn bytes_to_megabytes(bytes: f64) -> f64 {
    bytes / 1000.0 / 1000.0
}

fn bytes_to_bits(bytes: f64) -> f64 {
    bytes * 8.0
}

fn throughput_mbit_per_s(bytes: u64, duration_s: f64) -> f64 {
    bytes_to_bits(bytes_to_megabytes(bytes as f64)) / duration_s
}

/// Fold chronologically ordered bucket outcomes into the final report.
pub fn assemble_report(outcomes: Vec<BucketOutcome>, config: &RunConfig) -> StatisticsReport {
    let time_series = outcomes
        .into_iter()
        .map(|outcome| bucket_entry(outcome, config))
        .collect();

    StatisticsReport {
        duration: config.bucket_duration_s,
        units: Units::default(),
        time_series,
    }
}

fn bucket_entry(outcome: BucketOutcome, config: &RunConfig) -> TimeSeriesEntry {
    let overhead_bytes = config.overhead * outcome.packets as u64;
    let without_overhead = outcome.payload_total.saturating_sub(overhead_bytes);

    TimeSeriesEntry {
        time: outcome.time_s,
        counts: Counts {
            packets: outcome.packets,
            dropped: outcome.dropped,
            duplicate: outcome.duplicates,
        },
        ip_payload_lengths: outcome.payload_lengths,
        throughput_without_overhead: throughput_mbit_per_s(
            without_overhead,
            config.bucket_duration_s,
        ),
        throughput_with_overhead: (config.overhead > 0)
            .then(|| throughput_mbit_per_s(outcome.payload_total, config.bucket_duration_s)),
        latencies: outcome.latencies_ms,
    }
}
