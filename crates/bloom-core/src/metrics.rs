//! Metrics hooks for Bloom filter operations
//!
//! Counters for filter builds, element insertions and membership probes.
//!
//! ## Usage
//!
//! ```ignore
//! use bloom_core::metrics::{Metrics, MetricsRecorder};
//!
//! let metrics = Metrics::new();
//! metrics.record_filter_built(9586, 7, 1000);
//!
//! let start = std::time::Instant::now();
//! let result = filter.contains(element);
//! metrics.record_probe(start.elapsed(), result);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::domain::HEADER_LEN;

/// Metrics collector for Bloom filter operations
///
/// Thread-safe counters, safe to share between concurrent probes.
#[derive(Default)]
pub struct Metrics {
    /// Total filters finalized
    pub filters_built: AtomicU64,
    /// Total elements added across all filters
    pub elements_added: AtomicU64,
    /// Total membership probes
    pub probes_performed: AtomicU64,
    /// Probes that answered "maybe present"
    pub probes_positive: AtomicU64,
    /// Serialized filters rejected by the decoder
    pub filters_rejected: AtomicU64,
    /// Total serialized bytes produced
    pub bytes_emitted: AtomicU64,
    /// Cumulative probe time in nanoseconds
    pub probe_time_ns: AtomicU64,
}

impl Metrics {
    /// Create a new metrics collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finalized filter
    ///
    /// # Arguments
    /// * `size_bits` - Filter size in bits
    /// * `hash_count` - Number of hash functions (k)
    /// * `elements` - Elements added before finalization
    pub fn record_filter_built(&self, size_bits: u64, _hash_count: u32, elements: usize) {
        self.filters_built.fetch_add(1, Ordering::Relaxed);
        self.elements_added
            .fetch_add(elements as u64, Ordering::Relaxed);
        self.bytes_emitted
            .fetch_add(HEADER_LEN as u64 + size_bits.div_ceil(8), Ordering::Relaxed);
    }

    /// Record a membership probe
    pub fn record_probe(&self, duration: Duration, found: bool) {
        self.probes_performed.fetch_add(1, Ordering::Relaxed);
        self.probe_time_ns
            .fetch_add(duration.as_nanos() as u64, Ordering::Relaxed);
        if found {
            self.probes_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record a serialized filter that failed to decode
    pub fn record_rejected_filter(&self) {
        self.filters_rejected.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_built: self.filters_built.load(Ordering::Relaxed),
            elements_added: self.elements_added.load(Ordering::Relaxed),
            probes_performed: self.probes_performed.load(Ordering::Relaxed),
            probes_positive: self.probes_positive.load(Ordering::Relaxed),
            filters_rejected: self.filters_rejected.load(Ordering::Relaxed),
            bytes_emitted: self.bytes_emitted.load(Ordering::Relaxed),
            avg_probe_ns: self.avg_probe_time_ns(),
        }
    }

    /// Calculate average probe time in nanoseconds
    pub fn avg_probe_time_ns(&self) -> u64 {
        let total = self.probe_time_ns.load(Ordering::Relaxed);
        let count = self.probes_performed.load(Ordering::Relaxed);
        if count > 0 {
            total / count
        } else {
            0
        }
    }

    /// Ratio of positive probes to total probes
    ///
    /// Includes both true and false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.probes_performed.load(Ordering::Relaxed);
        let positive = self.probes_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.filters_built.store(0, Ordering::Relaxed);
        self.elements_added.store(0, Ordering::Relaxed);
        self.probes_performed.store(0, Ordering::Relaxed);
        self.probes_positive.store(0, Ordering::Relaxed);
        self.filters_rejected.store(0, Ordering::Relaxed);
        self.bytes_emitted.store(0, Ordering::Relaxed);
        self.probe_time_ns.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_built: u64,
    pub elements_added: u64,
    pub probes_performed: u64,
    pub probes_positive: u64,
    pub filters_rejected: u64,
    pub bytes_emitted: u64,
    pub avg_probe_ns: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this to forward counters to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    /// Record a finalized filter
    fn record_filter_built(&self, size_bits: u64, hash_count: u32, elements: usize);

    /// Record a membership probe
    fn record_probe(&self, duration: Duration, found: bool);

    /// Record a serialized filter that failed to decode
    fn record_rejected_filter(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_built(&self, _: u64, _: u32, _: usize) {}
    fn record_probe(&self, _: Duration, _: bool) {}
    fn record_rejected_filter(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_built(&self, size_bits: u64, hash_count: u32, elements: usize) {
        Metrics::record_filter_built(self, size_bits, hash_count, elements);
    }

    fn record_probe(&self, duration: Duration, found: bool) {
        Metrics::record_probe(self, duration, found);
    }

    fn record_rejected_filter(&self) {
        Metrics::record_rejected_filter(self);
    }
}
