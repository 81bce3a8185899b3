//! Inbound Ports (Driving Ports)
//!
//! The calling convention a host engine uses to run extension functions,
//! independent of any particular engine's C API.

use crate::domain::Value;
use crate::error::FunctionError;

/// A function evaluated once per row
pub trait ScalarFunction: Send + Sync {
    /// Evaluate the function for one set of arguments
    fn invoke(&self, args: &[Value]) -> Result<Value, FunctionError>;
}

/// A function folded over every row of a group
pub trait AggregateFunction: Send + Sync {
    /// Fresh per-group state
    fn accumulator(&self) -> Box<dyn Accumulator>;
}

/// Per-group aggregate state
///
/// Owned by exactly one group; never shared between threads while stepping.
pub trait Accumulator: Send {
    /// Feed one row's arguments
    fn step(&mut self, args: &[Value]) -> Result<(), FunctionError>;

    /// Produce the group's result, consuming the state
    fn finalize(self: Box<Self>) -> Result<Value, FunctionError>;
}
