//! Core Bloom Filter implementation
//!
//! INVARIANTS:
//! - `size` and `num_hashes` are fixed at construction
//! - Bits only ever flip from 0 to 1
//! - No false negatives: if added, `contains()` MUST return true

use bitvec::prelude::*;

use super::codec::{FilterHeader, HEADER_LEN};
use super::hash_functions::hash_positions;
use super::parameters::{
    calculate_fpr, calculate_optimal_parameters, BloomFilterParams, MAX_HASHES, MAX_SIZE_BITS,
};
use crate::error::{ConfigurationError, FormatError};

/// Bloom filter for probabilistic membership testing
///
/// A Bloom filter is a space-efficient probabilistic data structure that
/// can test whether an element is a member of a set. False positives are
/// possible, but false negatives are not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BloomFilter {
    /// Bit array storing the filter state
    bits: BitVec<u8, Lsb0>,
    /// Number of hash positions per element (k)
    num_hashes: u32,
    /// Size in bits (m)
    size: u64,
}

impl BloomFilter {
    /// Create an empty filter sized for `expected_count` elements at
    /// `false_positive_rate`
    ///
    /// # Errors
    /// `expected_count == 0`, a rate outside (0, 1), or a resulting size
    /// above [`MAX_SIZE_BITS`].
    pub fn create(
        expected_count: usize,
        false_positive_rate: f64,
    ) -> Result<Self, ConfigurationError> {
        let params = calculate_optimal_parameters(expected_count, false_positive_rate)?;
        Self::from_params(&params)
    }

    /// Create an empty filter with explicit `m` and `k`
    pub fn with_params(size: u64, num_hashes: u32) -> Result<Self, ConfigurationError> {
        if size == 0 || size > MAX_SIZE_BITS {
            return Err(ConfigurationError::InvalidSize {
                size,
                max: MAX_SIZE_BITS,
            });
        }
        if num_hashes == 0 || num_hashes > MAX_HASHES {
            return Err(ConfigurationError::InvalidHashCount {
                count: num_hashes,
                max: MAX_HASHES,
            });
        }

        let len = usize::try_from(size).map_err(|_| ConfigurationError::FilterTooLarge {
            size,
            max: usize::MAX as u64,
        })?;

        Ok(Self {
            bits: bitvec![u8, Lsb0; 0; len],
            num_hashes,
            size,
        })
    }

    /// Create an empty filter from precomputed parameters
    pub fn from_params(params: &BloomFilterParams) -> Result<Self, ConfigurationError> {
        Self::with_params(params.size_bits, params.hash_count)
    }

    /// Insert an element into the filter
    ///
    /// After insertion, `contains(element)` is guaranteed to return true.
    pub fn add(&mut self, element: &[u8]) {
        for pos in hash_positions(element, self.num_hashes, self.size) {
            self.bits.set(pos, true);
        }
    }

    /// Test if an element might be in the filter
    ///
    /// Returns:
    /// - `true` if the element might be in the set (could be false positive)
    /// - `false` if the element is definitely NOT in the set
    pub fn contains(&self, element: &[u8]) -> bool {
        hash_positions(element, self.num_hashes, self.size).all(|pos| self.bits[pos])
    }

    /// Encode the filter as header plus packed bits
    pub fn serialize(&self) -> Vec<u8> {
        let raw = self.bits.as_raw_slice();
        let mut out = Vec::with_capacity(HEADER_LEN + raw.len());
        FilterHeader {
            size_bits: self.size,
            hash_count: self.num_hashes,
        }
        .encode_into(&mut out);
        out.extend_from_slice(raw);
        out
    }

    /// Decode a filter produced by [`BloomFilter::serialize`]
    pub fn deserialize(bytes: &[u8]) -> Result<Self, FormatError> {
        let (header, payload) = FilterHeader::decode(bytes)?;
        let len = usize::try_from(header.size_bits).map_err(|_| FormatError::InvalidSize {
            size: header.size_bits,
            max: usize::MAX as u64,
        })?;

        let mut bits = BitVec::<u8, Lsb0>::from_vec(payload.to_vec());
        // The payload length was checked against the size, so this only drops padding
        bits.truncate(len);

        Ok(Self {
            bits,
            num_hashes: header.hash_count,
            size: header.size_bits,
        })
    }

    /// Expected false positive rate after `inserted` distinct elements
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    pub fn estimated_false_positive_rate(&self, inserted: usize) -> f64 {
        calculate_fpr(self.size, inserted, self.num_hashes)
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// True when no bit has been set
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Get the filter size in bits
    pub fn size_bits(&self) -> u64 {
        self.size
    }

    /// Get the number of hash functions
    pub fn hash_count(&self) -> u32 {
        self.num_hashes
    }

    /// Packed bit bytes, LSB-first
    pub fn as_raw_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }
}
