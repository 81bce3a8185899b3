//! # Bloom Telemetry
//!
//! Logging setup shared by binaries and test harnesses that host the bloom
//! filter functions.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bloom_telemetry::{init_logging, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_logging(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `BLOOM_SERVICE_NAME` | `bloom` | Service name in log lines |
//! | `BLOOM_LOG_LEVEL` | `info` | Log filter, falls back to `RUST_LOG` |
//! | `BLOOM_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `BLOOM_JSON_LOGS` | `false` | JSON instead of human-readable lines |

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::init_logging;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}
