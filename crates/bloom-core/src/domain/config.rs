//! Bloom filter sizing policy and validation
//!
//! # Example
//!
//! ```
//! use bloom_core::BloomConfigBuilder;
//!
//! let config = BloomConfigBuilder::new()
//!     .expected_count(500)
//!     .false_positive_rate(0.001)
//!     .build()
//!     .expect("Valid config");
//! assert_eq!(config.expected_count, 500);
//! ```

use std::env;

use serde::{Deserialize, Serialize};

use super::bloom_filter::BloomFilter;
use super::parameters::{
    calculate_optimal_parameters, validate_false_positive_rate, BloomFilterParams, MAX_SIZE_BITS,
};
use crate::error::ConfigurationError;

/// Default number of elements a filter is sized for when the count is unknown
pub const DEFAULT_EXPECTED_COUNT: usize = 1000;

/// Default target false positive rate
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.01;

/// Sizing policy used whenever a filter is built without explicit parameters
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BloomConfig {
    /// Number of distinct elements the filter is sized for (n)
    pub expected_count: usize,
    /// Target false positive rate at `expected_count` elements
    pub false_positive_rate: f64,
    /// Largest filter, in bits, this policy may produce
    pub max_size_bits: u64,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            expected_count: DEFAULT_EXPECTED_COUNT,
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            max_size_bits: MAX_SIZE_BITS,
        }
    }
}

impl BloomConfig {
    /// Create a new configuration with validation
    pub fn new(
        expected_count: usize,
        false_positive_rate: f64,
    ) -> Result<Self, ConfigurationError> {
        let config = Self {
            expected_count,
            false_positive_rate,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the policy from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `BLOOM_EXPECTED_COUNT`: expected elements (default: 1000)
    /// - `BLOOM_FALSE_POSITIVE_RATE`: target rate (default: 0.01)
    /// - `BLOOM_MAX_SIZE_BITS`: size cap in bits (default: 2^35)
    ///
    /// Unparseable values fall back to the default for that field; the
    /// combined result is then validated.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load the policy from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let config = Self {
            expected_count: lookup("BLOOM_EXPECTED_COUNT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.expected_count),

            false_positive_rate: lookup("BLOOM_FALSE_POSITIVE_RATE")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.false_positive_rate),

            max_size_bits: lookup("BLOOM_MAX_SIZE_BITS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.max_size_bits),
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the policy, including the size of the filter it would produce
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.max_size_bits == 0 || self.max_size_bits > MAX_SIZE_BITS {
            return Err(ConfigurationError::InvalidSize {
                size: self.max_size_bits,
                max: MAX_SIZE_BITS,
            });
        }
        validate_false_positive_rate(self.false_positive_rate)?;
        self.params_for(self.expected_count).map(|_| ())
    }

    /// Filter parameters for `expected_count` elements under this policy
    pub fn params_for(&self, expected_count: usize) -> Result<BloomFilterParams, ConfigurationError> {
        let params = calculate_optimal_parameters(expected_count, self.false_positive_rate)?;
        if params.size_bits > self.max_size_bits {
            return Err(ConfigurationError::FilterTooLarge {
                size: params.size_bits,
                max: self.max_size_bits,
            });
        }
        Ok(params)
    }

    /// Create an empty filter sized for the configured expected count
    pub fn create_filter(&self) -> Result<BloomFilter, ConfigurationError> {
        self.create_filter_for(self.expected_count)
    }

    /// Create an empty filter sized for `expected_count` at the configured rate
    pub fn create_filter_for(&self, expected_count: usize) -> Result<BloomFilter, ConfigurationError> {
        BloomFilter::from_params(&self.params_for(expected_count)?)
    }

    /// Builder-style method to set the expected count
    pub fn with_expected_count(mut self, count: usize) -> Self {
        self.expected_count = count;
        self
    }

    /// Builder-style method to set the false positive rate
    pub fn with_false_positive_rate(mut self, rate: f64) -> Self {
        self.false_positive_rate = rate;
        self
    }
}

/// Builder for BloomConfig with validation
#[derive(Default)]
pub struct BloomConfigBuilder {
    expected_count: Option<usize>,
    false_positive_rate: Option<f64>,
    max_size_bits: Option<u64>,
}

impl BloomConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of elements the filter is sized for
    pub fn expected_count(mut self, count: usize) -> Self {
        self.expected_count = Some(count);
        self
    }

    /// Set the target false positive rate (strictly between 0 and 1)
    pub fn false_positive_rate(mut self, rate: f64) -> Self {
        self.false_positive_rate = Some(rate);
        self
    }

    /// Set the maximum filter size in bits
    pub fn max_size_bits(mut self, bits: u64) -> Self {
        self.max_size_bits = Some(bits);
        self
    }

    /// Build the BloomConfig, validating all parameters
    pub fn build(self) -> Result<BloomConfig, ConfigurationError> {
        let defaults = BloomConfig::default();

        let config = BloomConfig {
            expected_count: self.expected_count.unwrap_or(defaults.expected_count),
            false_positive_rate: self
                .false_positive_rate
                .unwrap_or(defaults.false_positive_rate),
            max_size_bits: self.max_size_bits.unwrap_or(defaults.max_size_bits),
        };

        config.validate()?;
        Ok(config)
    }
}
