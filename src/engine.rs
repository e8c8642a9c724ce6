use tracing::{debug, warn};

use crate::bucket::split_into_buckets;
use crate::correlate::{Correlator, PostIndex};
use crate::error::{EngineError, EngineResult};
use crate::params::RunConfig;
use crate::record::PacketRecord;
use crate::report::{assemble_report, StatisticsReport};
use crate::validate::{validate_post_stream, validate_pre_stream};

const NS_PER_MS: f64 = 1_000_000.0;

/// Non-fatal conditions accumulated over one run, returned next to the
/// report instead of living in hidden globals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunWarnings {
    /// Pre-stream hash occurrences beyond the first (all well separated;
    /// closer repeats are fatal).
    pub duplicate_pre_hashes: usize,
    /// Adjacent pre records sharing one capture timestamp.
    pub repeated_pre_timestamps: usize,
    /// Delivered packets that apparently arrived before they were sent.
    pub time_traveling_packets: usize,
    /// Worst negative latency observed, in milliseconds.
    pub most_negative_latency_ms: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub report: StatisticsReport,
    pub warnings: RunWarnings,
}

/// Run the full correlation pipeline over two validated-on-entry record
/// streams: validate → index the post stream → bucketize the pre stream →
/// correlate per bucket → aggregate.
///
/// Either completes deterministically or fails with a validation error;
/// nothing is emitted on failure.
pub fn run(
    pre: &[PacketRecord],
    post: &[PacketRecord],
    config: &RunConfig,
) -> EngineResult<RunOutput> {
    if !config.bucket_duration_s.is_finite() || config.bucket_duration_s <= 0.0 {
        return Err(EngineError::InvalidBucketDuration(config.bucket_duration_s));
    }

    // 1. Validate both streams; the pre pass also finds the hashes that
    //    need latency-window disambiguation.
    let pre_report = validate_pre_stream(pre, &config.latency_window)?;
    validate_post_stream(post)?;

    // 2. Index the post stream once; queried immutably from here on.
    let index = PostIndex::build(post);
    debug!(
        pre_records = pre.len(),
        post_records = index.len(),
        "streams validated and indexed"
    );

    // 3. Partition the pre stream into complete buckets.
    let buckets = split_into_buckets(pre, config.bucket_duration_s);

    // 4. Correlate bucket by bucket, in chronological order.
    let correlator = Correlator::new(&index, &pre_report.duplicate_hashes, config.latency_window);
    let mut warnings = RunWarnings {
        duplicate_pre_hashes: pre_report.duplicate_occurrences,
        repeated_pre_timestamps: pre_report.repeated_timestamps,
        ..RunWarnings::default()
    };

    let mut outcomes = Vec::with_capacity(buckets.len());
    for bucket in &buckets {
        let outcome = correlator.correlate_bucket(bucket);
        warnings.time_travelers_from(&outcome);
        outcomes.push(outcome);
    }

    // 5. Fold the outcomes into the report.
    let report = assemble_report(outcomes, config);

    warnings.log();
    Ok(RunOutput { report, warnings })
}

impl RunWarnings {
    fn time_travelers_from(&mut self, outcome: &crate::correlate::BucketOutcome) {
        self.time_traveling_packets += outcome.time_travelers;
        if let Some(worst_ns) = outcome.most_negative_latency_ns {
            let worst_ms = worst_ns as f64 / NS_PER_MS;
            self.most_negative_latency_ms = Some(
                self.most_negative_latency_ms
                    .map_or(worst_ms, |current| current.min(worst_ms)),
            );
        }
    }

    fn log(&self) {
        if self.duplicate_pre_hashes > 0 {
            warn!(
                count = self.duplicate_pre_hashes,
                "pre stream contains repeated payload hashes (well separated)"
            );
        }
        if self.repeated_pre_timestamps > 0 {
            warn!(
                count = self.repeated_pre_timestamps,
                "pre stream contains repeated capture timestamps"
            );
        }
        if self.time_traveling_packets > 0 {
            warn!(
                count = self.time_traveling_packets,
                worst_ms = self.most_negative_latency_ms,
                "packets arrived before they were sent"
            );
        }
    }
}
