//! Optimal Bloom filter parameter calculation
//!
//! Formulas:
//! - m = -n*ln(fpr) / (ln(2)^2)  -- optimal bits
//! - k = (m/n) * ln(2)           -- optimal hash functions
//! - FPR = (1 - e^(-kn/m))^k     -- expected false positive rate

use std::f64::consts::LN_2;

use crate::error::ConfigurationError;

/// Upper bound on the number of hash positions per element
pub const MAX_HASHES: u32 = 32;

/// Upper bound on the filter size in bits (4 GiB of bit data)
pub const MAX_SIZE_BITS: u64 = 1 << 35;

/// Bloom filter parameters
#[derive(Clone, Debug, PartialEq)]
pub struct BloomFilterParams {
    /// Number of bits in the filter
    pub size_bits: u64,
    /// Number of hash functions
    pub hash_count: u32,
    /// Expected false positive rate with these parameters
    pub expected_fpr: f64,
}

/// Check that a false positive rate lies strictly inside (0, 1)
pub fn validate_false_positive_rate(rate: f64) -> Result<(), ConfigurationError> {
    if rate.is_finite() && rate > 0.0 && rate < 1.0 {
        Ok(())
    } else {
        Err(ConfigurationError::InvalidFalsePositiveRate { rate })
    }
}

/// Calculate optimal Bloom filter parameters for given constraints
///
/// # Arguments
/// * `num_elements` - Expected number of elements to insert (n)
/// * `target_fpr` - Target false positive rate, strictly between 0 and 1
///
/// # Errors
/// Rejects `num_elements == 0`, rates outside (0, 1), and sizes above
/// [`MAX_SIZE_BITS`]. Inputs are never clamped.
pub fn calculate_optimal_parameters(
    num_elements: usize,
    target_fpr: f64,
) -> Result<BloomFilterParams, ConfigurationError> {
    if num_elements == 0 {
        return Err(ConfigurationError::InvalidExpectedCount {
            count: num_elements,
        });
    }
    validate_false_positive_rate(target_fpr)?;

    let m = minimum_bits(num_elements, target_fpr);
    if m > MAX_SIZE_BITS as f64 {
        return Err(ConfigurationError::FilterTooLarge {
            size: m as u64,
            max: MAX_SIZE_BITS,
        });
    }
    let size_bits = (m as u64).max(1);
    let hash_count = optimal_k(size_bits, num_elements);

    Ok(BloomFilterParams {
        size_bits,
        hash_count,
        expected_fpr: calculate_fpr(size_bits, num_elements, hash_count),
    })
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: u64, n: usize, k: u32) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}

/// Calculate optimal k for given m and n, clamped to `[1, MAX_HASHES]`
pub fn optimal_k(m: u64, n: usize) -> u32 {
    if n == 0 {
        return 1;
    }
    let k = ((m as f64 / n as f64) * LN_2).round();
    (k as u32).clamp(1, MAX_HASHES)
}

/// Calculate minimum m, rounded up to whole bits, for given n and target FPR
pub fn minimum_bits(n: usize, target_fpr: f64) -> f64 {
    let ln2_squared = LN_2 * LN_2;
    (-(n as f64) * target_fpr.ln() / ln2_squared).ceil()
}
