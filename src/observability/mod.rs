//! Structured logging to a rotating file.
//!
//! The client logs through `tracing` everywhere. This module installs the
//! subscriber that filters those events and writes them to a log file in the
//! data directory, so the terminal stays free for the feed itself.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → EnvFilter → fmt layer → FileWriter (rotating) → photofeed.log
//! ```
//!
//! # Configuration
//!
//! Level is resolved from:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` config option
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `file_writer`: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
