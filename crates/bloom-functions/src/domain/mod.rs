//! Domain Layer - host-independent build and probe logic
//!
//! - `BloomAccumulator`: init / step / finalize over raw bytes
//! - `build_filter` / `probe`: one-shot build and membership test
//! - `Value`: the dynamic SQL value passed across the host boundary

pub mod accumulator;
pub mod value;

pub use accumulator::{build_filter, probe, BloomAccumulator};
pub use value::Value;
