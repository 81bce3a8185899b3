//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Core Bloom filter implementation
//! - Hash functions
//! - Parameter calculations
//! - Serialized layout
//! - Sizing configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod bloom_filter;
pub mod codec;
pub mod config;
pub mod hash_functions;
pub mod parameters;

pub use bloom_filter::BloomFilter;
pub use codec::{FilterHeader, FORMAT_VERSION, HEADER_LEN, MAGIC};
pub use config::{
    BloomConfig, BloomConfigBuilder, DEFAULT_EXPECTED_COUNT, DEFAULT_FALSE_POSITIVE_RATE,
};
pub use parameters::{calculate_optimal_parameters, BloomFilterParams, MAX_HASHES, MAX_SIZE_BITS};
