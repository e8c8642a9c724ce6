use std::collections::{HashMap, HashSet};

use crate::correlate::LatencyWindow;
use crate::record::{ContentHash, FormatError, PacketRecord, StreamKind};

use super::error::{DuplicateCollisionError, OrderingError, ValidationResult};

/// Outcome of validating the pre stream: which hashes need disambiguation
/// during correlation, plus non-fatal warning tallies.
#[derive(Debug, Default)]
pub struct PreStreamReport {
    /// Hashes that occur more than once in the pre stream.
    pub duplicate_hashes: HashSet<ContentHash>,
    /// Pre-stream hash occurrences beyond the first, all well separated.
    pub duplicate_occurrences: usize,
    /// Adjacent records sharing one timestamp (tolerated on the pre side).
    pub repeated_timestamps: usize,
}

/// Validate the pre stream and collect the duplicate-hash set the
/// correlator needs.
///
/// Fatal: non-positive payload length, non-monotonic frame numbers,
/// decreasing timestamps, and repeated hashes closer together than the
/// disambiguation window permits. Equal adjacent timestamps are tolerated
/// here (and counted) because the sender can emit faster than the capture
/// clock ticks.
pub fn validate_pre_stream(
    records: &[PacketRecord],
    window: &LatencyWindow,
) -> ValidationResult<PreStreamReport> {
    let mut report = PreStreamReport::default();
    let mut previous: Option<&PacketRecord> = None;
    let mut last_seen: HashMap<ContentHash, i64> = HashMap::new();

    for record in records {
        check_record(record, previous, StreamKind::Pre)?;

        if let Some(prev) = previous {
            if record.frame_time_epoch == prev.frame_time_epoch {
                report.repeated_timestamps += 1;
            }
        }

        if let Some(&first_ns) = last_seen.get(&record.content_hash) {
            let separation_ns = record.frame_time_epoch - first_ns;
            if separation_ns < window.required_separation_ns() {
                return Err(DuplicateCollisionError {
                    hash: record.content_hash,
                    first_ns,
                    second_ns: record.frame_time_epoch,
                    separation_ms: separation_ns / 1_000_000,
                    min_separation_ms: window.required_separation_ms(),
                }
                .into());
            }
            report.duplicate_hashes.insert(record.content_hash);
            report.duplicate_occurrences += 1;
        }
        last_seen.insert(record.content_hash, record.frame_time_epoch);

        previous = Some(record);
    }

    Ok(report)
}

/// Validate the post stream. Timestamps must be strictly increasing here:
/// the post capture is the reference clock for latency.
pub fn validate_post_stream(records: &[PacketRecord]) -> ValidationResult<()> {
    let mut previous: Option<&PacketRecord> = None;

    for record in records {
        check_record(record, previous, StreamKind::Post)?;

        if let Some(prev) = previous {
            if record.frame_time_epoch == prev.frame_time_epoch {
                return Err(OrderingError::TimestampRepeated {
                    stream: StreamKind::Post,
                    at: record.frame_time_epoch,
                }
                .into());
            }
        }

        previous = Some(record);
    }

    Ok(())
}

fn check_record(
    record: &PacketRecord,
    previous: Option<&PacketRecord>,
    stream: StreamKind,
) -> ValidationResult<()> {
    if record.payload_length == 0 {
        return Err(FormatError::EmptyPayload {
            frame_number: record.frame_number,
        }
        .into());
    }

    if let Some(prev) = previous {
        if record.frame_number <= prev.frame_number {
            return Err(OrderingError::FrameNumber {
                stream,
                previous: prev.frame_number,
                current: record.frame_number,
            }
            .into());
        }
        if record.frame_time_epoch < prev.frame_time_epoch {
            return Err(OrderingError::TimestampDecreased {
                stream,
                previous: prev.frame_time_epoch,
                current: record.frame_time_epoch,
            }
            .into());
        }
    }

    Ok(())
}
