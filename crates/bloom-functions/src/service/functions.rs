//! SQL Function Service
//!
//! Implements the inbound ports for `bloomfilter`, `bloom_contains` and
//! `murmurhash`, and registers them through the `FunctionRegistry` port.

use std::sync::Arc;
use std::time::Instant;

use bloom_core::domain::hash_functions::murmur_hash2;
use bloom_core::{BloomConfig, FilterError, MetricsRecorder, NoOpMetrics};
use tracing::{debug, info, warn};

use crate::domain::{probe, BloomAccumulator, Value};
use crate::error::FunctionError;
use crate::handler::{check_arity, filter_blob, seed, size_bytes};
use crate::ports::{Accumulator, AggregateFunction, FunctionRegistry, ScalarFunction};

pub const BLOOMFILTER: &str = "bloomfilter";
pub const BLOOM_CONTAINS: &str = "bloom_contains";
pub const MURMURHASH: &str = "murmurhash";

const BLOOMFILTER_USAGE: &str = "bloomfilter(key [, size])";
const BLOOM_CONTAINS_USAGE: &str = "bloom_contains(key, filter)";
const MURMURHASH_USAGE: &str = "murmurhash(key [, seed])";

/// Bloom filter SQL function set
///
/// Holds the sizing policy and metrics sink shared by every registered
/// function.
pub struct BloomFunctions {
    config: BloomConfig,
    metrics: Arc<dyn MetricsRecorder>,
}

impl BloomFunctions {
    /// Create the function set with the given sizing policy and no metrics
    pub fn new(config: BloomConfig) -> Self {
        Self {
            config,
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Record into `metrics` instead of discarding
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Register every `(name, arity)` pair with the host
    pub fn register<R>(&self, registry: &mut R) -> Result<(), FunctionError>
    where
        R: FunctionRegistry + ?Sized,
    {
        let aggregate: Arc<dyn AggregateFunction> = Arc::new(BloomFilterAggregate {
            config: self.config.clone(),
            metrics: Arc::clone(&self.metrics),
        });
        registry.register_aggregate(BLOOMFILTER, 1, Arc::clone(&aggregate))?;
        registry.register_aggregate(BLOOMFILTER, 2, aggregate)?;

        registry.register_scalar(
            BLOOM_CONTAINS,
            2,
            Arc::new(BloomContains {
                metrics: Arc::clone(&self.metrics),
            }),
        )?;

        let murmur: Arc<dyn ScalarFunction> = Arc::new(MurmurHash);
        registry.register_scalar(MURMURHASH, 1, Arc::clone(&murmur))?;
        registry.register_scalar(MURMURHASH, 2, murmur)?;

        info!(
            expected_count = self.config.expected_count,
            false_positive_rate = self.config.false_positive_rate,
            "Registered bloom filter SQL functions"
        );
        Ok(())
    }
}

impl Default for BloomFunctions {
    fn default() -> Self {
        Self::new(BloomConfig::default())
    }
}

/// `bloomfilter(key [, size])`
///
/// `size` is the bit array length in bytes.
pub struct BloomFilterAggregate {
    config: BloomConfig,
    metrics: Arc<dyn MetricsRecorder>,
}

impl AggregateFunction for BloomFilterAggregate {
    fn accumulator(&self) -> Box<dyn Accumulator> {
        Box::new(BloomFilterState {
            config: self.config.clone(),
            metrics: Arc::clone(&self.metrics),
            inner: None,
        })
    }
}

/// Per-group state of `bloomfilter`
struct BloomFilterState {
    config: BloomConfig,
    metrics: Arc<dyn MetricsRecorder>,
    inner: Option<BloomAccumulator>,
}

impl Accumulator for BloomFilterState {
    fn step(&mut self, args: &[Value]) -> Result<(), FunctionError> {
        check_arity(BLOOMFILTER, BLOOMFILTER_USAGE, args, &[1, 2])?;

        // NULL rows are skipped before the sizing argument is read
        let Some(key) = args[0].key_bytes() else {
            return Ok(());
        };

        let accumulator = match self.inner.take() {
            Some(accumulator) => accumulator,
            None => match args.get(1) {
                Some(size) => BloomAccumulator::with_size_bytes(
                    self.config.clone(),
                    size_bytes(BLOOMFILTER, size)?,
                )?,
                None => BloomAccumulator::init(self.config.clone()),
            },
        };

        self.inner.insert(accumulator).step(&key)?;
        Ok(())
    }

    fn finalize(self: Box<Self>) -> Result<Value, FunctionError> {
        let state = *self;
        let accumulator = state
            .inner
            .unwrap_or_else(|| BloomAccumulator::init(state.config));
        let elements = accumulator.len();

        let filter = accumulator.finalize_filter()?;
        state
            .metrics
            .record_filter_built(filter.size_bits(), filter.hash_count(), elements);
        debug!(
            elements,
            size_bits = filter.size_bits(),
            bits_set = filter.bits_set(),
            "Finalized bloom filter"
        );

        Ok(Value::Blob(filter.serialize()))
    }
}

/// `bloom_contains(key, filter)`
pub struct BloomContains {
    metrics: Arc<dyn MetricsRecorder>,
}

impl ScalarFunction for BloomContains {
    fn invoke(&self, args: &[Value]) -> Result<Value, FunctionError> {
        check_arity(BLOOM_CONTAINS, BLOOM_CONTAINS_USAGE, args, &[2])?;

        let Some(filter) = filter_blob(BLOOM_CONTAINS, &args[1])? else {
            return Ok(Value::Null);
        };
        let Some(key) = args[0].key_bytes() else {
            return Ok(Value::Null);
        };

        let start = Instant::now();
        match probe(&key, filter) {
            Ok(found) => {
                self.metrics.record_probe(start.elapsed(), found);
                Ok(Value::from(found))
            }
            Err(err) => {
                self.metrics.record_rejected_filter();
                warn!(error = %err, filter_len = filter.len(), "Rejected malformed bloom filter");
                Err(FilterError::from(err).into())
            }
        }
    }
}

/// `murmurhash(key [, seed])`
pub struct MurmurHash;

impl ScalarFunction for MurmurHash {
    fn invoke(&self, args: &[Value]) -> Result<Value, FunctionError> {
        check_arity(MURMURHASH, MURMURHASH_USAGE, args, &[1, 2])?;

        let Some(key) = args[0].key_bytes() else {
            return Ok(Value::Null);
        };
        let seed = match args.get(1) {
            Some(value) => seed(MURMURHASH, value)?,
            None => 0,
        };

        Ok(Value::Integer(i64::from(murmur_hash2(&key, seed))))
    }
}
