use serde_json::{Map, Value};

use crate::correlate::LatencyWindow;
use crate::record::StreamKind;

use super::error::ParameterMismatchError;

/// Knobs for one engine run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunConfig {
    /// Per-packet byte count (protocol/encapsulation headers) subtracted
    /// for the overhead-free throughput; 0 disables the
    /// `throughput_with_overhead` output field entirely.
    pub overhead: u64,
    pub bucket_duration_s: f64,
    pub latency_window: LatencyWindow,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            overhead: 0,
            bucket_duration_s: 1.0,
            latency_window: LatencyWindow::default(),
        }
    }
}

/// Capture-side run description (impairment settings, encapsulation,
/// test duration, ...) as recorded next to each capture.
pub type CaptureMetadata = Map<String, Value>;

/// The per-run identifier, excluded from the equality check: the two sides
/// of one measurement carry different names by construction.
pub const RUN_ID_KEY: &str = "name";

/// Verify that both captures describe the same run. Any key present on one
/// side only, or with differing values, is fatal: statistics computed from
/// two different runs would be meaningless.
pub fn ensure_matching_metadata(
    pre: &CaptureMetadata,
    post: &CaptureMetadata,
) -> Result<(), ParameterMismatchError> {
    for (key, pre_value) in pre {
        if key == RUN_ID_KEY {
            continue;
        }
        match post.get(key) {
            None => {
                return Err(ParameterMismatchError::MissingKey {
                    key: key.clone(),
                    stream: StreamKind::Post,
                })
            }
            Some(post_value) if post_value != pre_value => {
                return Err(ParameterMismatchError::ValueMismatch {
                    key: key.clone(),
                    pre: pre_value.clone(),
                    post: post_value.clone(),
                })
            }
            Some(_) => {}
        }
    }

    for key in post.keys() {
        if key != RUN_ID_KEY && !pre.contains_key(key) {
            return Err(ParameterMismatchError::MissingKey {
                key: key.clone(),
                stream: StreamKind::Pre,
            });
        }
    }

    Ok(())
}
