//! Outbound Ports (Driven Ports)
//!
//! Registration interface implemented by whatever engine hosts the
//! functions. Host-specific dispatch lives behind this trait.

use std::sync::Arc;

use super::inbound::{AggregateFunction, ScalarFunction};
use crate::error::FunctionError;

/// Function registration with a host engine (Driven Port)
///
/// Functions are keyed by `(name, arity)`, so one name may be registered
/// several times with different argument counts.
pub trait FunctionRegistry {
    /// Register a scalar function
    ///
    /// # Errors
    /// `FunctionError::AlreadyRegistered` when `(name, arity)` is taken.
    fn register_scalar(
        &mut self,
        name: &str,
        arity: usize,
        function: Arc<dyn ScalarFunction>,
    ) -> Result<(), FunctionError>;

    /// Register an aggregate function
    ///
    /// # Errors
    /// `FunctionError::AlreadyRegistered` when `(name, arity)` is taken.
    fn register_aggregate(
        &mut self,
        name: &str,
        arity: usize,
        function: Arc<dyn AggregateFunction>,
    ) -> Result<(), FunctionError>;
}
