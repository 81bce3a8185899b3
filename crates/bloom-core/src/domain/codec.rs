//! Serialized filter layout
//!
//! ```text
//! offset  width      field
//! 0       3          magic "BLM"
//! 3       1          format version (1)
//! 4       8          size in bits (m), u64 little-endian
//! 12      4          hash count (k), u32 little-endian
//! 16      ceil(m/8)  packed bits, LSB-first within each byte
//! ```
//!
//! Padding bits past `m` in the final byte are always zero.

use crate::error::FormatError;

use super::parameters::{MAX_HASHES, MAX_SIZE_BITS};

/// Leading magic bytes of every serialized filter
pub const MAGIC: [u8; 3] = *b"BLM";

/// Current layout version
pub const FORMAT_VERSION: u8 = 1;

/// Fixed header width in bytes
pub const HEADER_LEN: usize = 16;

/// Decoded fixed-width header
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FilterHeader {
    /// Size in bits (m)
    pub size_bits: u64,
    /// Number of hash positions (k)
    pub hash_count: u32,
}

impl FilterHeader {
    /// Number of packed bit bytes following the header
    pub fn payload_len(&self) -> u64 {
        self.size_bits.div_ceil(8)
    }

    /// Append the 16 header bytes to `out`
    pub fn encode_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&MAGIC);
        out.push(FORMAT_VERSION);
        out.extend_from_slice(&self.size_bits.to_le_bytes());
        out.extend_from_slice(&self.hash_count.to_le_bytes());
    }

    /// Split `bytes` into a validated header and its bit payload
    pub fn decode(bytes: &[u8]) -> Result<(Self, &[u8]), FormatError> {
        if bytes.len() < HEADER_LEN {
            return Err(FormatError::Truncated {
                len: bytes.len(),
                min: HEADER_LEN,
            });
        }

        let (header, payload) = bytes.split_at(HEADER_LEN);

        let mut magic = [0u8; 3];
        magic.copy_from_slice(&header[0..3]);
        if magic != MAGIC {
            return Err(FormatError::BadMagic { found: magic });
        }

        if header[3] != FORMAT_VERSION {
            return Err(FormatError::UnsupportedVersion(header[3]));
        }

        let mut size = [0u8; 8];
        size.copy_from_slice(&header[4..12]);
        let size_bits = u64::from_le_bytes(size);
        if size_bits == 0 || size_bits > MAX_SIZE_BITS {
            return Err(FormatError::InvalidSize {
                size: size_bits,
                max: MAX_SIZE_BITS,
            });
        }

        let mut count = [0u8; 4];
        count.copy_from_slice(&header[12..16]);
        let hash_count = u32::from_le_bytes(count);
        if hash_count == 0 || hash_count > MAX_HASHES {
            return Err(FormatError::InvalidHashCount {
                count: hash_count,
                max: MAX_HASHES,
            });
        }

        let decoded = Self {
            size_bits,
            hash_count,
        };

        let expected = decoded.payload_len();
        if payload.len() as u64 != expected {
            return Err(FormatError::LengthMismatch {
                expected: expected as usize,
                actual: payload.len(),
            });
        }

        let tail_bits = (size_bits % 8) as u32;
        if tail_bits != 0 {
            let padding_mask = !((1u8 << tail_bits) - 1);
            if payload.last().is_some_and(|last| last & padding_mask != 0) {
                return Err(FormatError::NonZeroPadding);
            }
        }

        Ok((decoded, payload))
    }
}
