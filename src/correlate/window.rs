const NS_PER_MS: i64 = 1_000_000;

/// Latency bounds used to disambiguate repeated pre-stream hashes.
///
/// When one payload hash occurs more than once in the pre stream, a post
/// arrival is attributed to a specific pre occurrence only if its latency
/// relative to that occurrence lies in `[min_ms, max_ms]`. The window must
/// be wide enough to cover legitimate delay and jitter, yet narrower than
/// the separation between repeated pre occurrences; the validator rejects
/// streams where that separation does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyWindow {
    /// Lowest accepted latency in milliseconds (negative: clock skew may
    /// make a packet appear to arrive before it was sent).
    pub min_ms: i64,
    /// Highest accepted latency in milliseconds.
    pub max_ms: i64,
}

impl Default for LatencyWindow {
    fn default() -> Self {
        Self {
            min_ms: -100,
            max_ms: 5000,
        }
    }
}

impl LatencyWindow {
    pub fn contains_ns(&self, latency_ns: i64) -> bool {
        latency_ns >= self.min_ms * NS_PER_MS && latency_ns <= self.max_ms * NS_PER_MS
    }

    /// Minimum separation between two pre occurrences of the same hash for
    /// their candidate windows to be disjoint.
    pub fn required_separation_ms(&self) -> i64 {
        self.max_ms - self.min_ms
    }

    pub fn required_separation_ns(&self) -> i64 {
        self.required_separation_ms() * NS_PER_MS
    }
}
