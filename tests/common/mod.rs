//! Shared helpers for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use photofeed::app::FeedReducer;
use photofeed::domain::{FeedError, ImageItem, MediaLink, Result};
use photofeed::source::{ImageListResponse, RemoteImageSource};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory source that records every request and answers from a fixed list.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    items: Vec<ImageItem>,
    failure: Option<String>,
    slow_tag: Option<(String, Duration)>,
    calls: Mutex<Vec<Option<String>>>,
}

impl ScriptedSource {
    pub fn new(items: Vec<ImageItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }

    /// Delays requests whose filter is exactly `tags`.
    pub fn slow_for(mut self, tags: &str, delay: Duration) -> Self {
        self.slow_tag = Some((tags.to_string(), delay));
        self
    }

    pub fn calls(&self) -> Vec<Option<String>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RemoteImageSource for ScriptedSource {
    async fn get_image_list(&self, tags: Option<&str>) -> Result<ImageListResponse> {
        self.calls.lock().unwrap().push(tags.map(str::to_string));

        if let Some((slow, delay)) = &self.slow_tag {
            if tags == Some(slow.as_str()) {
                tokio::time::sleep(*delay).await;
            }
        }

        if let Some(message) = &self.failure {
            return Err(FeedError::Retrieval(message.clone()));
        }

        let items = self
            .items
            .iter()
            .filter(|item| tags.map_or(true, |filter| item.has_all_tags(filter)))
            .cloned()
            .collect();
        Ok(ImageListResponse::with_items(items))
    }
}

/// Builds an item with the given title, tags, and minute offsets for the
/// published and taken timestamps.
pub fn item(title: &str, tags: &str, published: Option<u32>, taken: Option<u32>) -> ImageItem {
    let at = |minute: u32| Utc.with_ymd_and_hms(2022, 5, 30, 12, minute, 0).unwrap();
    ImageItem {
        title: Some(title.to_string()),
        link: Some(format!("https://example.com/photos/{title}")),
        media: Some(MediaLink::new(format!("https://example.com/{title}_m.jpg"))),
        published: published.map(at),
        date_taken: taken.map(at),
        author: None,
        tags: Some(tags.to_string()),
    }
}

pub fn titles(items: &[ImageItem]) -> Vec<&str> {
    items.iter().filter_map(|i| i.title.as_deref()).collect()
}

/// Applies pending updates until the reducer is no longer loading.
pub async fn settle<S: RemoteImageSource + 'static>(reducer: &mut FeedReducer<S>) {
    while reducer.state().loading {
        reducer.next_update().await;
    }
}

pub fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("feed.json")
}
