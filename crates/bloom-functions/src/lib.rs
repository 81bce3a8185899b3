//! # Bloom Functions
//!
//! SQL-level Bloom filter functions for a host database engine:
//!
//! | Function | Kind | Result |
//! |----------|------|--------|
//! | `bloomfilter(key [, size])` | aggregate | serialized filter BLOB, `size` bytes of bits when given |
//! | `bloom_contains(key, filter)` | scalar | `1` / `0`, NULL on NULL input |
//! | `murmurhash(key [, seed])` | scalar | 32-bit MurmurHash2 as an integer |
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `BloomAccumulator`, `build_filter`,
//!   `probe`, and the `Value` model
//! - **Ports Layer** (`ports/`)
//!   - `ScalarFunction`, `AggregateFunction`, `Accumulator`: driving ports
//!   - `FunctionRegistry`: driven port implemented by the host
//! - **Handler Layer** (`handler/`): argument validation
//! - **Service Layer** (`service/`): `BloomFunctions` registers everything
//! - **Adapters Layer** (`adapters/`): `InMemoryHost`
//!
//! ## Usage Example
//!
//! ```
//! use bloom_functions::{BloomFunctions, InMemoryHost, Value};
//!
//! let mut host = InMemoryHost::new();
//! BloomFunctions::default().register(&mut host)?;
//!
//! let rows = ["foo", "bar"].map(|key| vec![Value::from(key)]);
//! let filter = host.aggregate("bloomfilter", 1, &rows)?;
//!
//! let found = host.call_scalar("bloom_contains", &[Value::from("foo"), filter])?;
//! assert_eq!(found, Value::Integer(1));
//! # Ok::<(), bloom_functions::FunctionError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod handler;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::InMemoryHost;
pub use domain::{build_filter, probe, BloomAccumulator, Value};
pub use error::FunctionError;
pub use ports::{Accumulator, AggregateFunction, FunctionRegistry, ScalarFunction};
pub use service::BloomFunctions;
