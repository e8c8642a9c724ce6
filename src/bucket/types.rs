use crate::record::PacketRecord;

const NS_PER_S: f64 = 1_000_000_000.0;

/// Half-open time window `[start_ns, end_ns)` over a contiguous subslice
/// of the pre stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket<'a> {
    pub start_ns: i64,
    pub end_ns: i64,
    pub records: &'a [PacketRecord],
}

impl<'a> Bucket<'a> {
    /// Canonical label: the window midpoint in seconds.
    pub fn midpoint_s(&self) -> f64 {
        (self.start_ns + self.end_ns) as f64 / 2.0 / NS_PER_S
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
