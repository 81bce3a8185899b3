//! Error types for the Bloom filter core

use thiserror::Error;

/// Errors raised while choosing filter parameters
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("Invalid expected element count: {count} (must be greater than 0)")]
    InvalidExpectedCount { count: usize },

    #[error("Invalid false positive rate: {rate} (must be strictly between 0 and 1)")]
    InvalidFalsePositiveRate { rate: f64 },

    #[error("Filter size exceeds maximum: {size} bits > {max} bits")]
    FilterTooLarge { size: u64, max: u64 },

    #[error("Invalid filter size: {size} bits (must be between 1 and {max})")]
    InvalidSize { size: u64, max: u64 },

    #[error("Invalid hash count: {count} (must be between 1 and {max})")]
    InvalidHashCount { count: u32, max: u32 },
}

/// Errors raised while decoding serialized filter bytes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("Filter bytes truncated: {len} bytes < {min} byte header")]
    Truncated { len: usize, min: usize },

    #[error("Bad filter magic: {found:02x?}")]
    BadMagic { found: [u8; 3] },

    #[error("Unsupported filter format version: {0}")]
    UnsupportedVersion(u8),

    #[error("Invalid encoded filter size: {size} bits (must be between 1 and {max})")]
    InvalidSize { size: u64, max: u64 },

    #[error("Invalid encoded hash count: {count} (must be between 1 and {max})")]
    InvalidHashCount { count: u32, max: u32 },

    #[error("Bit payload length mismatch: expected {expected} bytes, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("Padding bits beyond filter size are set")]
    NonZeroPadding,
}

/// Any error the filter core can produce
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Format(#[from] FormatError),
}
