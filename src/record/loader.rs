use std::io::Read;

use serde::Deserialize;

use super::error::{FormatError, FormatResult};
use super::types::{ContentHash, PacketRecord};

/// Wire shape of one record as emitted by the capture parser.
#[derive(Debug, Deserialize)]
struct RawRecord {
    frame_number: u64,
    frame_time_epoch: i64,
    hash: String,
    ip_payload_length: u64,
}

impl RawRecord {
    fn into_record(self) -> FormatResult<PacketRecord> {
        let content_hash = ContentHash::from_hex(&self.hash, self.frame_number)?;
        if self.ip_payload_length == 0 {
            return Err(FormatError::EmptyPayload {
                frame_number: self.frame_number,
            });
        }
        Ok(PacketRecord {
            frame_number: self.frame_number,
            frame_time_epoch: self.frame_time_epoch,
            content_hash,
            payload_length: self.ip_payload_length,
        })
    }
}

/// Parse a JSON array of packet records from a string.
pub fn records_from_str(json: &str) -> FormatResult<Vec<PacketRecord>> {
    let raw: Vec<RawRecord> = serde_json::from_str(json)?;
    raw.into_iter().map(RawRecord::into_record).collect()
}

/// Parse a JSON array of packet records from a byte slice.
pub fn records_from_slice(json: &[u8]) -> FormatResult<Vec<PacketRecord>> {
    let raw: Vec<RawRecord> = serde_json::from_slice(json)?;
    raw.into_iter().map(RawRecord::into_record).collect()
}

/// Parse a JSON array of packet records from a reader.
pub fn records_from_reader<R: Read>(reader: R) -> FormatResult<Vec<PacketRecord>> {
    let raw: Vec<RawRecord> = serde_json::from_reader(reader)?;
    raw.into_iter().map(RawRecord::into_record).collect()
}
