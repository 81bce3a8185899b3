//! Handler Layer
//!
//! Argument validation shared by the SQL functions.

pub mod arguments;

pub use arguments::{check_arity, filter_blob, seed, size_bytes};
