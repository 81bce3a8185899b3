//! In-memory host engine
//!
//! Stores registered functions keyed by lower-cased name and arity, and runs
//! them the way a SQL engine would: scalars once per call, aggregates as
//! accumulator / step per row / finalize.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::domain::Value;
use crate::error::FunctionError;
use crate::ports::{AggregateFunction, FunctionRegistry, ScalarFunction};

type FunctionKey = (String, usize);

const RAGGED_ROW_USAGE: &str = "every row must carry the aggregate's registered arity";

/// Minimal function host backed by hash maps
#[derive(Default)]
pub struct InMemoryHost {
    scalars: HashMap<FunctionKey, Arc<dyn ScalarFunction>>,
    aggregates: HashMap<FunctionKey, Arc<dyn AggregateFunction>>,
}

impl InMemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether any function is registered under `(name, arity)`
    pub fn has_function(&self, name: &str, arity: usize) -> bool {
        let key = key(name, arity);
        self.scalars.contains_key(&key) || self.aggregates.contains_key(&key)
    }

    /// Evaluate a scalar function
    pub fn call_scalar(&self, name: &str, args: &[Value]) -> Result<Value, FunctionError> {
        let function = self
            .scalars
            .get(&key(name, args.len()))
            .ok_or_else(|| FunctionError::UnknownFunction {
                name: name.to_string(),
                arity: args.len(),
            })?;
        function.invoke(args)
    }

    /// Evaluate an aggregate over `rows`, each holding `arity` arguments
    ///
    /// Produces one result for the whole sequence, as for a query without
    /// `GROUP BY`.
    pub fn aggregate<I, R>(&self, name: &str, arity: usize, rows: I) -> Result<Value, FunctionError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[Value]>,
    {
        let function = self
            .aggregates
            .get(&key(name, arity))
            .ok_or_else(|| FunctionError::UnknownFunction {
                name: name.to_string(),
                arity,
            })?;

        let mut state = function.accumulator();
        let mut steps = 0usize;
        for row in rows {
            let args = row.as_ref();
            if args.len() != arity {
                return Err(FunctionError::WrongArgumentCount {
                    name: name.to_string(),
                    usage: RAGGED_ROW_USAGE,
                    actual: args.len(),
                });
            }
            state.step(args)?;
            steps += 1;
        }

        debug!(function = name, steps, "Finalizing aggregate");
        state.finalize()
    }
}

impl FunctionRegistry for InMemoryHost {
    fn register_scalar(
        &mut self,
        name: &str,
        arity: usize,
        function: Arc<dyn ScalarFunction>,
    ) -> Result<(), FunctionError> {
        let key = self.vacant_key(name, arity)?;
        self.scalars.insert(key, function);
        Ok(())
    }

    fn register_aggregate(
        &mut self,
        name: &str,
        arity: usize,
        function: Arc<dyn AggregateFunction>,
    ) -> Result<(), FunctionError> {
        let key = self.vacant_key(name, arity)?;
        self.aggregates.insert(key, function);
        Ok(())
    }
}

impl InMemoryHost {
    fn vacant_key(&self, name: &str, arity: usize) -> Result<FunctionKey, FunctionError> {
        if self.has_function(name, arity) {
            return Err(FunctionError::AlreadyRegistered {
                name: name.to_string(),
                arity,
            });
        }
        Ok(key(name, arity))
    }
}

/// SQL function names are case-insensitive
fn key(name: &str, arity: usize) -> FunctionKey {
    (name.to_ascii_lowercase(), arity)
}
