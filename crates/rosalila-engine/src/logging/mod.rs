//! Logging utilities.
//!
//! This module centralizes logger initialization and the line-oriented sink the
//! graphics layer reports through (load confirmations, decode warnings,
//! platform error strings). Everything ends up on the standard `log` facade
//! unless the host installs its own sink.

mod init;
mod sink;

pub use init::{init_logging, LoggingConfig};
pub use sink::{LineSink, LogSink, RecordingSink};
