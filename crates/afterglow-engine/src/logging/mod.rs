//! Logging utilities.
//!
//! Centralizes logger initialization behind the standard `log` facade.
//! Per-frame pipeline skips log at debug level and never surface to callers.

mod init;

pub use init::{init_logging, LoggingConfig};
