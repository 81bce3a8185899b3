//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - what the host engine calls
//! - Driven Ports (outbound) - how functions are handed to the host

pub mod inbound;
pub mod outbound;

pub use inbound::{Accumulator, AggregateFunction, ScalarFunction};
pub use outbound::FunctionRegistry;
