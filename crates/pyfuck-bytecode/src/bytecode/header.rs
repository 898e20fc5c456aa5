//! Module file header (16 bytes).
//!
//! Layout (PEP 552):
//! - 0-3: magic number (interpreter version)
//! - 4-7: flag bits (0 = timestamp-based invalidation)
//! - 8-11: source modification timestamp
//! - 12-15: source size
//!
//! All three fields after the magic are written as zero; the loader accepts
//! that when the file is run directly.

use super::constants::{HEADER_SIZE, MAGIC};

/// File header - first 16 bytes of a `.pyc` file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub magic: [u8; 4],
    pub flags: u32,
    pub timestamp: u32,
    pub source_size: u32,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            flags: 0,
            timestamp: 0,
            source_size: 0,
        }
    }
}

impl Header {
    /// Decode header from the first 16 bytes, or `None` if there are fewer.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() < HEADER_SIZE {
            return None;
        }

        Some(Self {
            magic: [bytes[0], bytes[1], bytes[2], bytes[3]],
            flags: u32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]),
            timestamp: u32::from_le_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]),
            source_size: u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]),
        })
    }

    /// Encode header to 16 bytes.
    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic);
        bytes[4..8].copy_from_slice(&self.flags.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.timestamp.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.source_size.to_le_bytes());
        bytes
    }

    pub fn validate_magic(&self) -> bool {
        self.magic == MAGIC
    }
}
