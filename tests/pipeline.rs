use std::io::Write;

use rand::{Rng, SeedableRng};

use pathmetrics::correlate::LatencyWindow;
use pathmetrics::record::{records_from_reader, ContentHash, PacketRecord};
use pathmetrics::{run, EngineError, RunConfig};

const S: i64 = 1_000_000_000;
const MS: i64 = 1_000_000;

fn record(frame_number: u64, time_ns: i64, payload: &[u8], payload_length: u64) -> PacketRecord {
    PacketRecord {
        frame_number,
        frame_time_epoch: time_ns,
        content_hash: ContentHash::of_payload(payload),
        payload_length,
    }
}

/// One packet per second for `count` seconds, plus a closing record so
/// every data-bearing bucket completes.
fn steady_stream(count: u64, offset_ns: i64, tag: &str) -> Vec<PacketRecord> {
    (0..=count)
        .map(|i| {
            record(
                i + 1,
                i as i64 * S + offset_ns,
                format!("{tag} {i}").as_bytes(),
                1400,
            )
        })
        .collect()
}

#[test]
fn test_disjoint_hashes_drop_every_packet() {
    let pre = steady_stream(4, 0, "sent");
    let post = steady_stream(4, 10 * MS, "entirely different");

    let output = run(&pre, &post, &RunConfig::default()).unwrap();

    assert_eq!(output.report.time_series.len(), 4);
    for entry in &output.report.time_series {
        assert_eq!(entry.counts.packets, 0);
        assert_eq!(entry.counts.dropped, 1);
        assert_eq!(entry.counts.duplicate, 0);
        assert!(entry.latencies.is_empty());
        assert_eq!(entry.throughput_without_overhead, 0.0);
    }
}

#[test]
fn test_single_match_latency_is_exact() {
    let pre = steady_stream(2, 0, "pkt");
    // 37.5 ms of path delay, down to integer nanoseconds.
    let delay_ns = 37 * MS + 500_000;
    let post: Vec<_> = pre
        .iter()
        .map(|r| PacketRecord {
            frame_time_epoch: r.frame_time_epoch + delay_ns,
            ..r.clone()
        })
        .collect();

    let output = run(&pre, &post, &RunConfig::default()).unwrap();

    for entry in &output.report.time_series {
        assert_eq!(entry.latencies, vec![37.5]);
    }
}

#[test]
fn test_identical_inputs_yield_byte_identical_output() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let pre: Vec<_> = (0..40)
        .map(|i| {
            let payload: [u8; 16] = rng.gen();
            record(i + 1, i as i64 * 100 * MS, &payload, 500 + i % 7)
        })
        .collect();
    // Deliver every third packet twice, drop every fifth.
    let mut post = Vec::new();
    let mut frame = 1;
    for r in &pre {
        if r.frame_number % 5 == 0 {
            continue;
        }
        let copies: i64 = if r.frame_number % 3 == 0 { 2 } else { 1 };
        for c in 0..copies {
            post.push(PacketRecord {
                frame_number: frame,
                frame_time_epoch: r.frame_time_epoch + 5 * MS + c * 31,
                ..r.clone()
            });
            frame += 1;
        }
    }

    let config = RunConfig::default();
    let first = run(&pre, &post, &config).unwrap();
    let second = run(&pre, &post, &config).unwrap();

    assert_eq!(
        first.report.to_json_string().unwrap(),
        second.report.to_json_string().unwrap()
    );
    assert_eq!(first.warnings, second.warnings);
}

#[test]
fn test_trailing_partial_bucket_never_reaches_output() {
    // Records at 0.2, 0.9, 1.1, 1.9 and 2.05 s: the window open at
    // end-of-stream is discarded with everything in it.
    let pre = vec![
        record(1, 200 * MS, b"a", 100),
        record(2, 900 * MS, b"b", 100),
        record(3, 1100 * MS, b"c", 100),
        record(4, 1900 * MS, b"d", 100),
        record(5, 2050 * MS, b"e", 100),
    ];
    let output = run(&pre, &[], &RunConfig::default()).unwrap();

    // Windows anchor at 0.2 s: [0.2, 1.2) completes, [1.2, 2.2) does not.
    assert_eq!(output.report.time_series.len(), 1);
    assert_eq!(output.report.time_series[0].counts.dropped, 3);
    assert!((output.report.time_series[0].time - 0.7).abs() < 1e-9);
}

#[test]
fn test_well_separated_duplicates_claim_disjoint_arrivals() {
    // The same payload is sent at 0 s and 10 s; three arrivals exist at
    // 0.05, 0.06 and 10.05 s. Each pre occurrence must claim only its own
    // arrivals, and no arrival may be counted twice.
    let pre = vec![
        record(1, 0, b"repeat", 1200),
        record(2, 10 * S, b"repeat", 1200),
        record(3, 11 * S, b"closer", 1200),
    ];
    let post = vec![
        record(1, 50 * MS, b"repeat", 1200),
        record(2, 60 * MS, b"repeat", 1200),
        record(3, 10 * S + 50 * MS, b"repeat", 1200),
    ];

    let config = RunConfig {
        bucket_duration_s: 1.0,
        ..RunConfig::default()
    };
    let output = run(&pre, &post, &config).unwrap();

    let first = &output.report.time_series[0];
    assert_eq!(first.counts.packets, 1);
    assert_eq!(first.counts.duplicate, 1);
    assert_eq!(first.latencies, vec![50.0]);

    let second = &output.report.time_series[10];
    assert_eq!(second.counts.packets, 1);
    assert_eq!(second.counts.duplicate, 0);
    assert_eq!(second.latencies, vec![50.0]);

    assert_eq!(output.warnings.duplicate_pre_hashes, 1);
}

#[test]
fn test_close_duplicates_fail_fast() {
    let pre = vec![
        record(1, 0, b"repeat", 1200),
        record(2, 2 * S, b"repeat", 1200),
        record(3, 3 * S, b"other", 1200),
    ];
    let result = run(&pre, &[], &RunConfig::default());
    assert!(matches!(result, Err(EngineError::Validation(_))));
}

#[test]
fn test_zero_bucket_duration_is_rejected_without_panicking() {
    let pre = steady_stream(2, 0, "pkt");
    let config = RunConfig {
        bucket_duration_s: 0.0,
        ..RunConfig::default()
    };
    let result = run(&pre, &[], &config);
    assert!(matches!(result, Err(EngineError::InvalidBucketDuration(d)) if d == 0.0));
}

#[test]
fn test_throughput_matches_the_reference_value() {
    let pre = vec![
        record(1, 0, b"first", 1000),
        record(2, 500 * MS, b"second", 2000),
        record(3, S, b"closer", 100),
    ];
    let post = vec![
        record(1, 10 * MS, b"first", 1000),
        record(2, 510 * MS, b"second", 2000),
    ];

    let config = RunConfig {
        overhead: 28,
        ..RunConfig::default()
    };
    let output = run(&pre, &post, &config).unwrap();

    let entry = &output.report.time_series[0];
    assert_eq!(entry.counts.packets, 2);
    assert_eq!(entry.ip_payload_lengths, vec![1000, 2000]);
    // ((1000-28)+(2000-28)) bytes over 1 s = 0.023552 Mbit/s.
    assert!((entry.throughput_without_overhead - 0.023552).abs() < 1e-12);
    assert!((entry.throughput_with_overhead.unwrap() - 0.024).abs() < 1e-12);
}

#[test]
fn test_negative_latencies_stay_in_the_report() {
    let pre = vec![
        record(1, 100 * MS, b"early", 800),
        record(2, 1100 * MS, b"closer", 800),
    ];
    // The arrival is captured 60 ms before the send-side record.
    let post = vec![record(1, 40 * MS, b"early", 800)];

    let output = run(&pre, &post, &RunConfig::default()).unwrap();

    let entry = &output.report.time_series[0];
    assert_eq!(entry.counts.packets, 1);
    assert_eq!(entry.latencies, vec![-60.0]);
    assert_eq!(output.warnings.time_traveling_packets, 1);
    assert_eq!(output.warnings.most_negative_latency_ms, Some(-60.0));

    let json = output.report.to_json_string().unwrap();
    assert!(json.contains("-60.0"));
}

#[test]
fn test_unique_hash_claims_out_of_window_arrival() {
    // No disambiguation for unique hashes: even a 30 s latency matches.
    let pre = vec![record(1, 0, b"slow", 900), record(2, S, b"closer", 900)];
    let post = vec![record(1, 30 * S, b"slow", 900)];

    let output = run(&pre, &post, &RunConfig::default()).unwrap();
    let entry = &output.report.time_series[0];
    assert_eq!(entry.counts.packets, 1);
    assert_eq!(entry.latencies, vec![30_000.0]);
}

#[test]
fn test_records_load_from_disk_and_correlate() {
    let payloads: Vec<Vec<u8>> = (0u32..5).map(|i| i.to_le_bytes().to_vec()).collect();

    let to_json = |records: &[(u64, i64, &[u8])]| {
        let entries: Vec<String> = records
            .iter()
            .map(|(frame, ns, payload)| {
                format!(
                    r#"{{"frame_number":{frame},"frame_time_epoch":{ns},"hash":"{}","ip_payload_length":{}}}"#,
                    ContentHash::of_payload(payload).to_hex(),
                    payload.len().max(1)
                )
            })
            .collect();
        format!("[{}]", entries.join(","))
    };

    let pre_records: Vec<(u64, i64, &[u8])> = payloads
        .iter()
        .enumerate()
        .map(|(i, p)| (i as u64 + 1, i as i64 * S, p.as_slice()))
        .collect();
    let post_records: Vec<(u64, i64, &[u8])> = pre_records
        .iter()
        .map(|&(frame, ns, payload)| (frame, ns + 15 * MS, payload))
        .collect();

    let mut pre_file = tempfile::NamedTempFile::new().unwrap();
    pre_file.write_all(to_json(&pre_records).as_bytes()).unwrap();
    let mut post_file = tempfile::NamedTempFile::new().unwrap();
    post_file
        .write_all(to_json(&post_records).as_bytes())
        .unwrap();

    let pre = records_from_reader(pre_file.reopen().unwrap()).unwrap();
    let post = records_from_reader(post_file.reopen().unwrap()).unwrap();
    assert_eq!(pre.len(), 5);

    let config = RunConfig {
        latency_window: LatencyWindow::default(),
        ..RunConfig::default()
    };
    let output = run(&pre, &post, &config).unwrap();
    assert_eq!(output.report.time_series.len(), 4);
    for entry in &output.report.time_series {
        assert_eq!(entry.counts.packets, 1);
        assert_eq!(entry.latencies, vec![15.0]);
    }
}
