//! Infrastructure layer for filesystem and environment interactions.
//!
//! This module resolves where the client keeps its files: the default data
//! directory and user-supplied paths that may start with `~`.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir};
