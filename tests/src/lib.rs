//! # Bloom Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── integration/      # Cross-crate scenarios
//! │   ├── end_to_end.rs     # register, aggregate, probe through a host
//! │   ├── statistics.rs     # false positive rate and order independence
//! │   └── concurrency.rs    # parallel probes against shared bytes
//! benches/
//! └── bloom_benchmarks.rs   # criterion benchmarks
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p bloom-tests
//! cargo test -p bloom-tests integration::statistics
//! cargo bench -p bloom-tests
//! ```


use std::sync::Once;

use bloom_functions::{BloomFunctions, InMemoryHost, Value};
use bloom_telemetry::{init_logging, TelemetryConfig};

/// The rows inserted by the reference scenario
pub const REGISTER_ROWS: [&str; 11] = [
    "foo", "bar", "baz", "nuggie", "huey", "mickey", "charlie", "zaizee", "beanie", "baze",
    "ziggy",
];

static LOGGING: Once = Once::new();

/// Install a quiet subscriber once per test binary
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            ..TelemetryConfig::from_env()
        };
        if let Err(err) = init_logging(&config) {
            eprintln!("test logging not installed: {}", err);
        }
    });
}

/// A host with the bloom functions registered under default settings
pub fn bloom_host() -> InMemoryHost {
    init_test_logging();
    let mut host = InMemoryHost::new();
    if let Err(err) = BloomFunctions::default().register(&mut host) {
        panic!("registering bloom functions failed: {}", err);
    }
    host
}

/// One single-column row per key
pub fn text_rows<'a>(keys: impl IntoIterator<Item = &'a str>) -> Vec<Vec<Value>> {
    keys.into_iter().map(|key| vec![Value::from(key)]).collect()
}
