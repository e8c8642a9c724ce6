use crate::record::PacketRecord;

use super::types::Bucket;

/// Partition the pre stream into contiguous fixed-width windows anchored
/// at the first record's timestamp.
///
/// A window closes when a record's timestamp reaches or exceeds its end;
/// windows advance without gaps, so a silence longer than one duration
/// yields empty intermediate buckets. The trailing window is discarded
/// unconditionally: the stream ended before it could close, and partial
/// data must never appear in output.
///
/// The duration must be positive and finite; the engine entry point
/// rejects anything else before calling in here.
pub fn split_into_buckets(records: &[PacketRecord], bucket_duration_s: f64) -> Vec<Bucket<'_>> {
    assert!(
        bucket_duration_s > 0.0,
        "bucket duration must be positive, got {bucket_duration_s}"
    );
    let duration_ns = (bucket_duration_s * 1_000_000_000.0).round() as i64;

    let Some(first) = records.first() else {
        return Vec::new();
    };

    let mut buckets = Vec::new();
    let mut start_ns = first.frame_time_epoch;
    let mut end_ns = start_ns + duration_ns;
    let mut window_begin = 0;

    for (i, record) in records.iter().enumerate() {
        while record.frame_time_epoch >= end_ns {
            buckets.push(Bucket {
                start_ns,
                end_ns,
                records: &records[window_begin..i],
            });
            window_begin = i;
            start_ns = end_ns;
            end_ns += duration_ns;
        }
    }

    // Records left in the open trailing window are thrown away.
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::ContentHash;

    fn record_at(frame_number: u64, time_s: f64) -> PacketRecord {
        PacketRecord {
            frame_number,
            frame_time_epoch: (time_s * 1_000_000_000.0) as i64,
            content_hash: ContentHash::of_payload(&frame_number.to_le_bytes()),
            payload_length: 100,
        }
    }

    fn times(bucket: &Bucket<'_>) -> Vec<f64> {
        bucket
            .records
            .iter()
            .map(|r| r.frame_time_epoch as f64 / 1_000_000_000.0)
            .collect()
    }

    #[test]
    fn test_windows_anchor_at_first_timestamp() {
        let records = vec![
            record_at(1, 0.2),
            record_at(2, 0.9),
            record_at(3, 1.1),
            record_at(4, 1.9),
            record_at(5, 2.05),
        ];
        let buckets = split_into_buckets(&records, 1.0);

        // [0.2, 1.2) closes when 1.9 arrives; [1.2, 2.2) never closes and
        // is discarded along with 1.9 and 2.05.
        assert_eq!(buckets.len(), 1);
        assert_eq!(times(&buckets[0]), vec![0.2, 0.9, 1.1]);
        assert!((buckets[0].midpoint_s() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_record_opens_next_window() {
        let records = vec![
            record_at(1, 0.0),
            record_at(2, 1.0),
            record_at(3, 2.0),
        ];
        let buckets = split_into_buckets(&records, 1.0);

        assert_eq!(buckets.len(), 2);
        assert_eq!(times(&buckets[0]), vec![0.0]);
        assert_eq!(times(&buckets[1]), vec![1.0]);
    }

    #[test]
    fn test_gap_emits_empty_windows() {
        let records = vec![
            record_at(1, 0.1),
            record_at(2, 3.5),
            record_at(3, 4.5),
        ];
        let buckets = split_into_buckets(&records, 1.0);

        // [0.1,1.1) {0.1}, [1.1,2.1) {}, [2.1,3.1) {}, [3.1,4.1) {3.5};
        // [4.1,5.1) holds 4.5 but never closes.
        assert_eq!(buckets.len(), 4);
        assert_eq!(times(&buckets[0]), vec![0.1]);
        assert!(buckets[1].is_empty());
        assert!(buckets[2].is_empty());
        assert_eq!(times(&buckets[3]), vec![3.5]);
    }

    #[test]
    fn test_windows_are_contiguous() {
        let records: Vec<_> = (0..50).map(|i| record_at(i, 0.25 * i as f64)).collect();
        let buckets = split_into_buckets(&records, 1.0);

        assert!(!buckets.is_empty());
        for pair in buckets.windows(2) {
            assert_eq!(pair[0].end_ns, pair[1].start_ns);
        }
    }

    #[test]
    fn test_empty_stream_yields_no_buckets() {
        assert!(split_into_buckets(&[], 1.0).is_empty());
    }

    #[test]
    fn test_single_window_stream_is_all_trailing() {
        // Everything fits in the first (never closed) window.
        let records = vec![record_at(1, 0.1), record_at(2, 0.5)];
        assert!(split_into_buckets(&records, 1.0).is_empty());
    }

    #[test]
    fn test_sub_second_duration() {
        let records = vec![
            record_at(1, 0.0),
            record_at(2, 0.2),
            record_at(3, 0.6),
            record_at(4, 1.1),
        ];
        let buckets = split_into_buckets(&records, 0.5);

        assert_eq!(buckets.len(), 2);
        assert_eq!(times(&buckets[0]), vec![0.0, 0.2]);
        assert_eq!(times(&buckets[1]), vec![0.6]);
    }
}
