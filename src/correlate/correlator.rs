use std::collections::HashSet;

use crate::bucket::Bucket;
use crate::record::{ContentHash, PacketRecord};

use super::index::PostIndex;
use super::types::{BucketOutcome, CorrelationOutcome};
use super::window::LatencyWindow;

const NS_PER_MS: f64 = 1_000_000.0;

/// Matches each pre packet against the post-side index.
///
/// Holds only shared, immutable state; buckets can be correlated in any
/// order (or in parallel) as long as the resulting outcomes are reassembled
/// chronologically.
pub struct Correlator<'a> {
    index: &'a PostIndex,
    duplicate_hashes: &'a HashSet<ContentHash>,
    window: LatencyWindow,
}

impl<'a> Correlator<'a> {
    pub fn new(
        index: &'a PostIndex,
        duplicate_hashes: &'a HashSet<ContentHash>,
        window: LatencyWindow,
    ) -> Self {
        Self {
            index,
            duplicate_hashes,
            window,
        }
    }

    /// Classify one pre packet as delivered (with its canonical arrival and
    /// duplicate count) or dropped.
    ///
    /// When the packet's hash repeats in the pre stream, only arrivals whose
    /// latency falls inside the disambiguation window can belong to this
    /// occurrence; a unique hash claims every arrival. The canonical arrival
    /// is the one with the smallest timestamp, first post-stream occurrence
    /// winning ties.
    pub fn correlate_record(&self, record: &PacketRecord) -> CorrelationOutcome {
        let candidates = self.index.arrivals(&record.content_hash);
        let filter_by_window = self.duplicate_hashes.contains(&record.content_hash);

        let mut earliest = None;
        let mut matched = 0usize;

        for arrival in candidates {
            let latency_ns = arrival.frame_time_epoch - record.frame_time_epoch;
            if filter_by_window && !self.window.contains_ns(latency_ns) {
                continue;
            }
            matched += 1;
            match earliest {
                Some((best_ns, _)) if arrival.frame_time_epoch >= best_ns => {}
                _ => earliest = Some((arrival.frame_time_epoch, *arrival)),
            }
        }

        match earliest {
            Some((post_ns, arrival)) => CorrelationOutcome::Delivered {
                latency_ns: post_ns - record.frame_time_epoch,
                matched: arrival,
                duplicates: matched - 1,
            },
            None => CorrelationOutcome::Dropped,
        }
    }

    /// Fold every record of a bucket into that bucket's accumulators,
    /// preserving pre-stream order.
    pub fn correlate_bucket(&self, bucket: &Bucket<'_>) -> BucketOutcome {
        let mut outcome = BucketOutcome::new(bucket.midpoint_s());

        for record in bucket.records {
            match self.correlate_record(record) {
                CorrelationOutcome::Delivered {
                    latency_ns,
                    duplicates,
                    ..
                } => {
                    outcome.packets += 1;
                    outcome.duplicates += duplicates;
                    outcome.latencies_ms.push(latency_ns as f64 / NS_PER_MS);
                    outcome.payload_lengths.push(record.payload_length);
                    outcome.payload_total += record.payload_length;
                    if latency_ns < 0 {
                        outcome.time_travelers += 1;
                        outcome.most_negative_latency_ns = Some(
                            outcome
                                .most_negative_latency_ns
                                .map_or(latency_ns, |worst| worst.min(latency_ns)),
                        );
                    }
                }
                CorrelationOutcome::Dropped => outcome.dropped += 1,
            }
        }

        outcome
    }
}
