use std::fmt;
use std::str::FromStr;

use blake3::Hasher;

use super::error::FormatError;

/// 32-byte blake3 digest of a packet's IP payload, the content-addressed
/// substitute for a protocol sequence number.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContentHash(pub [u8; 32]);

impl ContentHash {
    /// Hash a raw payload the same way the capture parser does.
    pub fn of_payload(payload: &[u8]) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(payload);
        Self(*hasher.finalize().as_bytes())
    }

    /// Decode a 64-character hex string into a hash, attributing failures
    /// to the frame the string came from.
    pub fn from_hex(s: &str, frame_number: u64) -> Result<Self, FormatError> {
        let bytes = hex::decode(s).map_err(|e| FormatError::InvalidHashEncoding {
            frame_number,
            reason: e.to_string(),
        })?;
        let digest: [u8; 32] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| FormatError::InvalidHashLength {
                    frame_number,
                    got: bytes.len(),
                })?;
        Ok(Self(digest))
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({})", self.to_hex())
    }
}

impl FromStr for ContentHash {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s, 0)
    }
}

/// One observation of a packet at one capture point.
///
/// Within one stream, `frame_number` is strictly increasing and
/// `frame_time_epoch` never decreases (capture order).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PacketRecord {
    pub frame_number: u64,
    /// Nanoseconds since the Unix epoch.
    pub frame_time_epoch: i64,
    pub content_hash: ContentHash,
    /// IP payload length in bytes, always positive.
    pub payload_length: u64,
}

/// Which side of the measured path a stream was captured on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Pre,
    Post,
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamKind::Pre => f.write_str("pre"),
            StreamKind::Post => f.write_str("post"),
        }
    }
}
