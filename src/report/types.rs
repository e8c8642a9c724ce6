use std::io::Write;

use serde::Serialize;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Counts {
    /// Delivered packets, not counting duplicates.
    pub packets: usize,
    /// Packets which were sent but never received.
    pub dropped: usize,
    /// Extra arrivals beyond each packet's canonical one.
    pub duplicate: usize,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Units {
    pub duration: &'static str,
    pub latency: &'static str,
    pub ip_payload_length: &'static str,
    pub throughput: &'static str,
}

impl Default for Units {
    fn default() -> Self {
        Self {
            duration: "s",
            latency: "ms",
            ip_payload_length: "Bytes",
            throughput: "Mbit/s",
        }
    }
}

/// Statistics for one bucket. Vector fields are in pre-stream order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimeSeriesEntry {
    /// Bucket midpoint in seconds.
    pub time: f64,
    pub counts: Counts,
    pub ip_payload_lengths: Vec<u64>,
    pub throughput_without_overhead: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub throughput_with_overhead: Option<f64>,
    pub latencies: Vec<f64>,
}

/// The complete output of one run: constructed once, serialized, never
/// mutated. Entries are in chronological bucket order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StatisticsReport {
    pub duration: f64,
    pub units: Units,
    pub time_series: Vec<TimeSeriesEntry>,
}

impl StatisticsReport {
    /// Compact JSON, matching the capture toolchain's emitters.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer(writer, self)
    }
}
