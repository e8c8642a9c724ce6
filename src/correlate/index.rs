use multimap::MultiMap;

use crate::record::{ContentHash, PacketRecord};

/// One arrival observed at the post capture point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostArrival {
    pub frame_number: u64,
    pub frame_time_epoch: i64,
    pub payload_length: u64,
}

/// Content hash → ordered list of post-side arrivals.
///
/// Built once from the validated post stream and queried immutably during
/// correlation. A hash with no entry was never observed after the path:
/// that absence is the "dropped" signal. Repeated keys are expected and
/// meaningful (duplicate or retransmitted delivery).
#[derive(Debug)]
pub struct PostIndex {
    arrivals: MultiMap<ContentHash, PostArrival>,
    len: usize,
}

impl PostIndex {
    /// Index the post stream in arrival order.
    pub fn build(records: &[PacketRecord]) -> Self {
        let mut arrivals = MultiMap::new();
        for record in records {
            arrivals.insert(
                record.content_hash,
                PostArrival {
                    frame_number: record.frame_number,
                    frame_time_epoch: record.frame_time_epoch,
                    payload_length: record.payload_length,
                },
            );
        }
        Self {
            arrivals,
            len: records.len(),
        }
    }

    /// All arrivals sharing `hash`, in post-stream order; empty if the
    /// payload never arrived.
    pub fn arrivals(&self, hash: &ContentHash) -> &[PostArrival] {
        self.arrivals.get_vec(hash).map_or(&[], Vec::as_slice)
    }

    /// Total number of indexed arrivals (counting repeats).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
