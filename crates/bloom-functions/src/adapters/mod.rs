//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the `FunctionRegistry` port.
//!
//! ## Adapters
//!
//! - `InMemoryHost` - a minimal host engine that stores registered functions
//!   and evaluates scalar calls and aggregates over in-memory rows

pub mod in_memory_host;

pub use in_memory_host::InMemoryHost;
