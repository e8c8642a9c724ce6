use super::index::PostArrival;

/// Per-pre-packet correlation result, computed per bucket and folded into
/// the bucket accumulators immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationOutcome {
    Delivered {
        /// Canonical post timestamp minus pre timestamp; may be negative.
        latency_ns: i64,
        /// The earliest-arriving post copy.
        matched: PostArrival,
        /// Post arrivals beyond the canonical one.
        duplicates: usize,
    },
    Dropped,
}

/// Accumulated statistics for one bucket, in pre-stream order.
///
/// Exclusively owned by whoever correlates the bucket; outcomes never
/// share state across buckets.
#[derive(Debug, Clone, PartialEq)]
pub struct BucketOutcome {
    /// Bucket label: window midpoint in seconds.
    pub time_s: f64,
    pub packets: usize,
    pub dropped: usize,
    pub duplicates: usize,
    pub latencies_ms: Vec<f64>,
    pub payload_lengths: Vec<u64>,
    pub payload_total: u64,
    /// Delivered packets whose latency came out negative.
    pub time_travelers: usize,
    pub most_negative_latency_ns: Option<i64>,
}

impl BucketOutcome {
    pub fn new(time_s: f64) -> Self {
        Self {
            time_s,
            packets: 0,
            dropped: 0,
            duplicates: 0,
            latencies_ms: Vec::new(),
            payload_lengths: Vec::new(),
            payload_total: 0,
            time_travelers: 0,
            most_negative_latency_ns: None,
        }
    }
}
