//! # Bloom Core
//!
//! Serializable Bloom filter used by the `bloomfilter` / `bloom_contains`
//! SQL functions.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `BloomFilter`: bit array, double hashing, byte codec
//!   - `BloomConfig`: sizing policy with validation
//!   - `FilterHeader`: fixed 16-byte serialized header
//! - **Metrics** (`metrics`): counters behind the `MetricsRecorder` trait
//!
//! ## Invariants
//!
//! - FPR = (1 - e^(-kn/m))^k <= target rate at the expected count
//! - No false negatives: if added, `contains()` MUST return true
//! - `deserialize(serialize(f))` answers every query exactly like `f`
//!
//! ## Usage Example
//!
//! ```
//! use bloom_core::BloomFilter;
//!
//! let mut filter = BloomFilter::create(100, 0.01)?;
//! filter.add(b"charlie");
//!
//! let bytes = filter.serialize();
//! let restored = BloomFilter::deserialize(&bytes)?;
//! assert!(restored.contains(b"charlie"));
//! # Ok::<(), bloom_core::FilterError>(())
//! ```

pub mod domain;
pub mod error;
pub mod metrics;

// Re-exports for convenience
pub use domain::{
    BloomConfig, BloomConfigBuilder, BloomFilter, BloomFilterParams, FilterHeader, HEADER_LEN,
    MAX_HASHES, MAX_SIZE_BITS,
};
pub use error::{ConfigurationError, FilterError, FormatError};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
