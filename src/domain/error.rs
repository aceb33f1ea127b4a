//! Error types for the photo feed client.
//!
//! This module defines the centralized error type [`FeedError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for photo feed operations.
///
/// Retrieval failures come from the remote image source and are turned into
/// user-visible error messages by the reducer. Save and permission failures are
/// raised by the presentation layer when it performs item actions.
///
/// # Examples
///
/// ```
/// use photofeed::FeedError;
///
/// fn load() -> Result<(), FeedError> {
///     Err(FeedError::Retrieval("connection refused".to_string()))
/// }
///
/// assert_eq!(
///     load().unwrap_err().to_string(),
///     "Failed to load images: connection refused"
/// );
/// ```
#[derive(Debug, Error)]
pub enum FeedError {
    /// The remote image source was unreachable or returned a bad response.
    #[error("Failed to load images: {0}")]
    Retrieval(String),

    /// Writing an image to the gallery store failed.
    #[error("Save failed: {0}")]
    Save(String),

    /// The user refused the capability required for an item action.
    #[error("Cannot save image because permission request was rejected")]
    PermissionDenied,

    /// A feed document could not be decoded.
    ///
    /// Automatically converts from `serde_json::Error` using the `#[from]` attribute.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    ///
    /// Occurs when the TOML configuration file cannot be parsed. The string
    /// describes the specific configuration problem.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for photo feed operations.
///
/// This is a type alias for `std::result::Result<T, FeedError>` that simplifies
/// function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, FeedError>;
