//! Gallery backend abstraction.
//!
//! This module defines the [`Gallery`] trait the presentation layer saves
//! images through, so the terminal front-end and tests can swap the store.

use crate::domain::error::Result;
use crate::storage::models::SavedImage;

/// Abstraction over the store saved images are written to.
///
/// # Implementations
///
/// - [`JsonGallery`](crate::storage::JsonGallery): JSON index with atomic writes
pub trait Gallery: Send {
    /// Adds an image to the gallery and returns where it was recorded.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Save`](crate::FeedError::Save) if the write fails.
    fn save(&mut self, image: SavedImage) -> Result<String>;

    /// Returns every saved image, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list(&self) -> Result<Vec<SavedImage>>;
}
