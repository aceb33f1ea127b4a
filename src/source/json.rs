//! File-backed image source.
//!
//! This module provides [`JsonFeedSource`], which serves a public feed document
//! stored on disk with the same tag semantics as the remote service: the filter
//! is a comma-separated tag list and an item matches only when it carries every
//! requested tag. An optional artificial latency makes the asynchronous loading
//! path observable from the terminal front-end.

use crate::domain::error::{FeedError, Result};
use crate::source::backend::RemoteImageSource;
use crate::source::models::ImageListResponse;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;

/// Feed source reading a JSON feed document from disk.
///
/// The file is re-read on every request, so edits to it show up on the next
/// search or sort change.
///
/// # File Format
///
/// ```json
/// {
///   "title": "Uploads from everyone",
///   "items": [
///     {
///       "title": "Sunset",
///       "link": "https://example.com/photos/1",
///       "media": { "m": "https://example.com/1_m.jpg" },
///       "date_taken": "2022-05-30T04:45:21-08:00",
///       "published": "2022-05-30T12:45:23Z",
///       "author": "nobody@example.com (\"someone\")",
///       "tags": "sunset beach"
///     }
///   ]
/// }
/// ```
#[derive(Debug, Clone)]
pub struct JsonFeedSource {
    file_path: PathBuf,
    latency: Duration,
}

impl JsonFeedSource {
    /// Creates a source for the feed document at `file_path`.
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            latency: Duration::ZERO,
        }
    }

    /// Delays every response by `latency`.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn load(&self) -> Result<ImageListResponse> {
        let contents = tokio::fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| {
                FeedError::Retrieval(format!("cannot read {}: {e}", self.file_path.display()))
            })?;

        serde_json::from_str(&contents)
            .map_err(|e| FeedError::Retrieval(format!("malformed feed document: {e}")))
    }
}

#[async_trait]
impl RemoteImageSource for JsonFeedSource {
    async fn get_image_list(&self, tags: Option<&str>) -> Result<ImageListResponse> {
        tracing::debug!(path = ?self.file_path, tags = ?tags, "reading feed document");

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let mut response = self.load().await?;

        if let (Some(filter), Some(items)) = (tags, response.items.as_mut()) {
            let before = items.len();
            items.retain(|item| item.has_all_tags(filter));
            tracing::debug!(before, after = items.len(), filter = %filter, "applied tag filter");
        }

        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FEED: &str = r#"{
        "title": "Uploads from everyone",
        "items": [
            { "title": "one", "tags": "cats dogs", "published": "2022-05-30T12:45:23Z" },
            { "title": "two", "tags": "cats", "published": "2022-05-30T12:40:00Z" },
            { "title": "three", "tags": "birds", "date_taken": "2022-05-29T08:00:00-08:00" }
        ]
    }"#;

    fn feed_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn returns_every_item_without_filter() {
        let file = feed_file(FEED);
        let source = JsonFeedSource::new(file.path());

        let response = source.get_image_list(None).await.unwrap();
        assert_eq!(response.title.as_deref(), Some("Uploads from everyone"));
        assert_eq!(response.into_items().len(), 3);
    }

    #[tokio::test]
    async fn filter_keeps_items_with_all_tags() {
        let file = feed_file(FEED);
        let source = JsonFeedSource::new(file.path());

        let cats = source.get_image_list(Some("cats")).await.unwrap().into_items();
        assert_eq!(cats.len(), 2);

        let both = source.get_image_list(Some("cats,dogs")).await.unwrap().into_items();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title.as_deref(), Some("one"));
    }

    #[tokio::test]
    async fn offsets_are_normalized_to_utc() {
        let file = feed_file(FEED);
        let source = JsonFeedSource::new(file.path());

        let birds = source.get_image_list(Some("birds")).await.unwrap().into_items();
        let taken = birds[0].date_taken.unwrap();
        assert_eq!(taken.to_rfc3339(), "2022-05-29T16:00:00+00:00");
    }

    #[tokio::test]
    async fn missing_items_is_not_an_error() {
        let file = feed_file(r#"{ "title": "empty" }"#);
        let source = JsonFeedSource::new(file.path());

        let response = source.get_image_list(Some("cats")).await.unwrap();
        assert!(response.items.is_none());
        assert!(response.into_items().is_empty());
    }

    #[tokio::test]
    async fn unreadable_feed_is_a_retrieval_failure() {
        let source = JsonFeedSource::new("/nonexistent/photofeed/feed.json");
        let err = source.get_image_list(None).await.unwrap_err();
        assert!(matches!(err, FeedError::Retrieval(_)));

        let file = feed_file("{ not json");
        let source = JsonFeedSource::new(file.path());
        let err = source.get_image_list(None).await.unwrap_err();
        assert!(matches!(err, FeedError::Retrieval(_)));
    }
}
