//! Remote image source abstraction.
//!
//! This module defines the [`RemoteImageSource`] trait that abstracts over the
//! service the photo feed is fetched from. The fetch pipeline only depends on
//! this trait, so the HTTP client, a file-backed feed, or a scripted test
//! double can stand behind it.

use crate::domain::error::Result;
use crate::source::models::ImageListResponse;
use async_trait::async_trait;
use std::sync::Arc;

/// Abstraction over the remote photo feed service.
///
/// # Implementations
///
/// - [`JsonFeedSource`](crate::source::JsonFeedSource): feed document on disk
///
/// # Examples
///
/// ```no_run
/// use photofeed::source::{JsonFeedSource, RemoteImageSource};
///
/// # async fn demo() -> photofeed::Result<()> {
/// let source = JsonFeedSource::new("feed.json");
/// let response = source.get_image_list(Some("cats,dogs")).await?;
/// println!("{} items", response.into_items().len());
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait RemoteImageSource: Send + Sync {
    /// Retrieves the feed, optionally filtered by tags.
    ///
    /// `tags` is an opaque filter string in the service's comma-separated
    /// convention. `None` requests the unfiltered public feed.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Retrieval`](crate::FeedError::Retrieval) when the
    /// service is unreachable or its response cannot be decoded.
    async fn get_image_list(&self, tags: Option<&str>) -> Result<ImageListResponse>;
}

#[async_trait]
impl<S: RemoteImageSource + ?Sized> RemoteImageSource for Arc<S> {
    async fn get_image_list(&self, tags: Option<&str>) -> Result<ImageListResponse> {
        (**self).get_image_list(tags).await
    }
}
