//! Accumulate-then-finalize filter builder
//!
//! A build owns one filter from the first `step` until `finalize`; the
//! membership test is a pure function over serialized bytes.

use bloom_core::domain::parameters::optimal_k;
use bloom_core::{BloomConfig, BloomFilter, ConfigurationError, FormatError};
use tracing::debug;

/// How the filter is sized once the first value arrives
#[derive(Clone, Copy, Debug, PartialEq)]
enum Sizing {
    /// Optimal `m` and `k` for this many elements at the configured rate
    ExpectedCount(usize),
    /// Caller-chosen bit count
    Explicit { size_bits: u64, hash_count: u32 },
}

/// Streaming builder behind the `bloomfilter` aggregate
///
/// The filter is allocated lazily on the first `step`. Finalizing without any
/// steps produces an empty filter sized by the configured policy.
#[derive(Debug)]
pub struct BloomAccumulator {
    config: BloomConfig,
    sizing: Sizing,
    filter: Option<BloomFilter>,
    count: usize,
}

impl BloomAccumulator {
    /// Start a build sized by the configured default expected count
    pub fn init(config: BloomConfig) -> Self {
        let sizing = Sizing::ExpectedCount(config.expected_count);
        Self::with_sizing(config, sizing)
    }

    /// Start a build sized for `expected_count` elements at the configured rate
    ///
    /// The parameters are validated here rather than on the first `step`.
    pub fn with_expected_count(
        config: BloomConfig,
        expected_count: usize,
    ) -> Result<Self, ConfigurationError> {
        config.params_for(expected_count)?;
        Ok(Self::with_sizing(config, Sizing::ExpectedCount(expected_count)))
    }

    /// Start a build with a bit array of exactly `size_bytes` bytes
    ///
    /// `k` is the optimum for that many bits holding the configured expected
    /// count of elements.
    pub fn with_size_bytes(
        config: BloomConfig,
        size_bytes: u64,
    ) -> Result<Self, ConfigurationError> {
        let size_bits = size_bytes
            .checked_mul(8)
            .ok_or(ConfigurationError::FilterTooLarge {
                size: u64::MAX,
                max: config.max_size_bits,
            })?;
        if size_bits == 0 {
            return Err(ConfigurationError::InvalidSize {
                size: 0,
                max: config.max_size_bits,
            });
        }
        if size_bits > config.max_size_bits {
            return Err(ConfigurationError::FilterTooLarge {
                size: size_bits,
                max: config.max_size_bits,
            });
        }

        let hash_count = optimal_k(size_bits, config.expected_count);
        Ok(Self::with_sizing(
            config,
            Sizing::Explicit {
                size_bits,
                hash_count,
            },
        ))
    }

    fn with_sizing(config: BloomConfig, sizing: Sizing) -> Self {
        Self {
            config,
            sizing,
            filter: None,
            count: 0,
        }
    }

    /// Add one value to the filter under construction
    pub fn step(&mut self, value: &[u8]) -> Result<(), ConfigurationError> {
        let filter = match self.filter.take() {
            Some(filter) => filter,
            None => self.create_filter()?,
        };
        self.filter.insert(filter).add(value);
        self.count += 1;
        Ok(())
    }

    /// Finish the build and hand back the filter
    pub fn finalize_filter(mut self) -> Result<BloomFilter, ConfigurationError> {
        match self.filter.take() {
            Some(filter) => Ok(filter),
            None => self.create_filter(),
        }
    }

    /// Finish the build and serialize the filter
    pub fn finalize(self) -> Result<Vec<u8>, ConfigurationError> {
        Ok(self.finalize_filter()?.serialize())
    }

    /// Number of values stepped so far
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The filter under construction, once the first value has arrived
    pub fn filter(&self) -> Option<&BloomFilter> {
        self.filter.as_ref()
    }

    fn create_filter(&self) -> Result<BloomFilter, ConfigurationError> {
        let filter = match self.sizing {
            Sizing::ExpectedCount(expected_count) => {
                self.config.create_filter_for(expected_count)?
            }
            Sizing::Explicit {
                size_bits,
                hash_count,
            } => BloomFilter::with_params(size_bits, hash_count)?,
        };
        debug!(
            size_bits = filter.size_bits(),
            hash_count = filter.hash_count(),
            sizing = ?self.sizing,
            "Allocated bloom filter"
        );
        Ok(filter)
    }
}

/// Build a serialized filter from a sequence of values
///
/// When the iterator reports an exact, non-zero length the filter is sized
/// for exactly that many values; otherwise the configured expected count is
/// used. The result does not depend on the order of `values`.
pub fn build_filter<I>(values: I, config: &BloomConfig) -> Result<Vec<u8>, ConfigurationError>
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let values = values.into_iter();
    let mut accumulator = match values.size_hint() {
        (lower, Some(upper)) if lower == upper && lower > 0 => {
            BloomAccumulator::with_expected_count(config.clone(), lower)?
        }
        _ => BloomAccumulator::init(config.clone()),
    };

    for value in values {
        accumulator.step(value.as_ref())?;
    }
    accumulator.finalize()
}

/// Test `key` against previously serialized filter bytes
pub fn probe(key: &[u8], filter_bytes: &[u8]) -> Result<bool, FormatError> {
    Ok(BloomFilter::deserialize(filter_bytes)?.contains(key))
}
