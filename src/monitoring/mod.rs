//! Monitoring support.
//!
//! Logging setup for hosts embedding the chain.

pub mod logging;

pub use logging::{init_logging, LogFormat, LogLevel, LoggerConfig};
