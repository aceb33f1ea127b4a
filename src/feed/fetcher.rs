//! Fetch-and-sort pipeline feeding the reducer.
//!
//! [`ImageFeedFetcher`] retrieves the feed from a [`RemoteImageSource`], sorts
//! it by the requested criterion, and publishes the sorted list on a
//! [`ReplayChannel`]. Callers never receive the list directly; they observe it
//! through a [`Subscription`].
//!
//! # Pipeline
//!
//! ```text
//! fetch(tags, criterion)
//!   │ take ticket
//!   ▼
//! source.get_image_list(tags) ──error──► Err(FeedError::Retrieval)
//!   │ items (absent = empty)
//!   ▼
//! sort_images(items, criterion)
//!   │ ticket still newest?
//!   ├── no ──► FetchStatus::Superseded
//!   ▼
//! channel.publish(list) ──► FetchStatus::Published
//! ```

use crate::domain::error::Result;
use crate::domain::{sort_images, ImageItem, SortCriterion};
use crate::feed::channel::{ReplayChannel, Subscription};
use crate::source::RemoteImageSource;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A sorted image list as published by the fetcher.
pub type ImageList = Arc<Vec<ImageItem>>;

/// Result of a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// The sorted list was published.
    Published {
        /// Number of items in the published list.
        count: usize,
        /// Channel version assigned to the publication.
        version: u64,
    },
    /// A newer fetch started while this one was in flight; its list was discarded.
    Superseded,
}

/// Retrieves, sorts, and publishes the photo feed.
///
/// The fetcher is the single writer of its channel. When fetches overlap, only
/// the most recently started one publishes, so a slow stale response can never
/// replace a newer list.
pub struct ImageFeedFetcher<S> {
    source: S,
    channel: ReplayChannel<ImageList>,
    requests: AtomicU64,
}

impl<S: RemoteImageSource> ImageFeedFetcher<S> {
    /// Creates a fetcher over `source` with an empty channel.
    pub fn new(source: S) -> Self {
        Self {
            source,
            channel: ReplayChannel::new(),
            requests: AtomicU64::new(0),
        }
    }

    /// Opens a subscription to the published lists.
    ///
    /// The subscription replays the most recent list, if one was published.
    #[must_use]
    pub fn subscribe(&self) -> Subscription<ImageList> {
        self.channel.subscribe()
    }

    /// Returns the most recently published list.
    #[must_use]
    pub fn latest(&self) -> Option<ImageList> {
        self.channel.latest()
    }

    /// Returns the underlying source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetches the feed filtered by `tags`, sorts it by `criterion`, and
    /// publishes the result.
    ///
    /// `tags` is passed to the source untouched; `None` means no filter. An
    /// absent item list is published as an empty list.
    ///
    /// # Errors
    ///
    /// Returns the source's error when retrieval fails. Nothing is published in
    /// that case.
    pub async fn fetch(&self, tags: Option<&str>, criterion: SortCriterion) -> Result<FetchStatus> {
        let ticket = self.requests.fetch_add(1, Ordering::SeqCst) + 1;

        tracing::debug!(ticket, tags = ?tags, criterion = ?criterion, "fetching image list");

        let response = match self.source.get_image_list(tags).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(ticket, error = %e, "image list retrieval failed");
                return Err(e);
            }
        };

        let sorted = sort_images(response.into_items(), criterion);
        let count = sorted.len();

        if self.requests.load(Ordering::SeqCst) != ticket {
            tracing::debug!(ticket, "newer fetch started, discarding result");
            return Ok(FetchStatus::Superseded);
        }

        let version = self.channel.publish(Arc::new(sorted));
        tracing::debug!(ticket, count, version, "published sorted image list");

        Ok(FetchStatus::Published { count, version })
    }
}

impl<S> std::fmt::Debug for ImageFeedFetcher<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFeedFetcher")
            .field("requests", &self.requests)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FeedError;
    use crate::source::ImageListResponse;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use std::time::Duration;

    struct StubSource {
        response: Option<ImageListResponse>,
        calls: Mutex<Vec<Option<String>>>,
        delay_for: Option<(String, Duration)>,
    }

    impl StubSource {
        fn new(response: Option<ImageListResponse>) -> Self {
            Self {
                response,
                calls: Mutex::new(Vec::new()),
                delay_for: None,
            }
        }
    }

    #[async_trait]
    impl RemoteImageSource for StubSource {
        async fn get_image_list(&self, tags: Option<&str>) -> Result<ImageListResponse> {
            self.calls.lock().unwrap().push(tags.map(String::from));
            if let Some((slow_tags, delay)) = &self.delay_for {
                if tags == Some(slow_tags.as_str()) {
                    tokio::time::sleep(*delay).await;
                }
            }
            self.response
                .clone()
                .ok_or_else(|| FeedError::Retrieval("connection refused".to_string()))
        }
    }

    fn dated(title: &str, published: i64, taken: i64) -> ImageItem {
        ImageItem {
            title: Some(title.to_string()),
            published: Some(Utc.timestamp_opt(published, 0).unwrap()),
            date_taken: Some(Utc.timestamp_opt(taken, 0).unwrap()),
            ..Default::default()
        }
    }

    fn titles(list: &ImageList) -> Vec<String> {
        list.iter().filter_map(|i| i.title.clone()).collect()
    }

    #[tokio::test]
    async fn publishes_list_sorted_by_criterion() {
        let response = ImageListResponse::with_items(vec![
            dated("late", 300, 100),
            dated("early", 100, 300),
            dated("middle", 200, 200),
        ]);
        let fetcher = ImageFeedFetcher::new(StubSource::new(Some(response)));
        let mut sub = fetcher.subscribe();

        let status = fetcher.fetch(None, SortCriterion::Published).await.unwrap();
        assert_eq!(status, FetchStatus::Published { count: 3, version: 1 });
        assert_eq!(titles(&sub.recv().await.unwrap()), vec!["early", "middle", "late"]);

        fetcher.fetch(None, SortCriterion::Taken).await.unwrap();
        assert_eq!(titles(&sub.recv().await.unwrap()), vec!["late", "middle", "early"]);
    }

    #[tokio::test]
    async fn passes_filter_through_untouched() {
        let fetcher = ImageFeedFetcher::new(StubSource::new(Some(ImageListResponse::default())));

        fetcher.fetch(Some("cats,dogs"), SortCriterion::Published).await.unwrap();
        fetcher.fetch(None, SortCriterion::Published).await.unwrap();

        let calls = fetcher.source().calls.lock().unwrap().clone();
        assert_eq!(calls, vec![Some("cats,dogs".to_string()), None]);
    }

    #[tokio::test]
    async fn absent_items_publish_empty_list() {
        let fetcher = ImageFeedFetcher::new(StubSource::new(Some(ImageListResponse::default())));

        let status = fetcher.fetch(None, SortCriterion::Taken).await.unwrap();
        assert!(matches!(status, FetchStatus::Published { count: 0, .. }));
        assert_eq!(fetcher.latest().map(|l| l.len()), Some(0));
    }

    #[tokio::test]
    async fn retrieval_failure_propagates_without_publishing() {
        let fetcher = ImageFeedFetcher::new(StubSource::new(None));

        let err = fetcher.fetch(None, SortCriterion::Published).await.unwrap_err();
        assert!(matches!(err, FeedError::Retrieval(_)));
        assert!(fetcher.latest().is_none());
    }

    #[tokio::test]
    async fn late_subscriber_gets_latest_list() {
        let response = ImageListResponse::with_items(vec![dated("only", 1, 1)]);
        let fetcher = ImageFeedFetcher::new(StubSource::new(Some(response)));
        fetcher.fetch(None, SortCriterion::Published).await.unwrap();

        let mut late = fetcher.subscribe();
        assert_eq!(titles(&late.try_recv().unwrap()), vec!["only"]);
    }

    #[tokio::test(start_paused = true)]
    async fn stale_fetch_does_not_overwrite_newer_list() {
        let response = ImageListResponse::with_items(vec![dated("item", 1, 1)]);
        let mut source = StubSource::new(Some(response));
        source.delay_for = Some(("slow".to_string(), Duration::from_secs(5)));
        let fetcher = Arc::new(ImageFeedFetcher::new(source));

        let slow = {
            let fetcher = Arc::clone(&fetcher);
            tokio::spawn(async move { fetcher.fetch(Some("slow"), SortCriterion::Published).await })
        };
        tokio::task::yield_now().await;

        let fast = fetcher.fetch(Some("fast"), SortCriterion::Published).await.unwrap();
        assert_eq!(fast, FetchStatus::Published { count: 1, version: 1 });

        let stale = slow.await.unwrap().unwrap();
        assert_eq!(stale, FetchStatus::Superseded);
        assert_eq!(fetcher.channel.version(), 1);
    }
}
