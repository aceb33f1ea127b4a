//! Domain layer for the photo feed client.
//!
//! This module contains the core domain types, independent of the remote
//! source, the runtime, or the presentation layer.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`image`]: Feed item model, sort criterion, and ordering
//!
//! # Examples
//!
//! ```
//! use photofeed::domain::{sort_images, ImageItem, SortCriterion};
//!
//! let sorted = sort_images(vec![ImageItem::default()], SortCriterion::Published);
//! assert_eq!(sorted.len(), 1);
//! ```

pub mod error;
pub mod image;

pub use error::{FeedError, Result};
pub use image::{sort_images, ImageItem, MediaLink, SortCriterion};
