//! Feed item model and ordering.
//!
//! This module defines [`ImageItem`], one entry of the public photo feed, and
//! [`SortCriterion`], which selects the timestamp used to order a fetched list.
//! Field names follow the public feed's JSON document so items deserialize
//! directly from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Media links attached to a feed item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaLink {
    /// URL of the medium-sized rendition of the photo.
    #[serde(default)]
    pub m: Option<String>,
}

impl MediaLink {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { m: Some(url.into()) }
    }
}

/// One photo in the feed.
///
/// Every field is optional because the remote feed omits fields freely. Items
/// are immutable once fetched and are shared read-only between the fetcher,
/// the reducer, and the presentation layer.
///
/// # Fields
///
/// - `title`: Photo title
/// - `link`: Page URL, opened by the browse action
/// - `media`: Image URLs, used for thumbnails, saving, and sharing
/// - `date_taken`: When the photo was taken
/// - `published`: When the photo was published to the feed
/// - `author`: Author display string
/// - `tags`: Space-separated tag list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageItem {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub media: Option<MediaLink>,
    #[serde(default)]
    pub date_taken: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published: Option<DateTime<Utc>>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

impl ImageItem {
    /// Returns the media URL, if the item has one.
    #[must_use]
    pub fn media_url(&self) -> Option<&str> {
        self.media.as_ref().and_then(|m| m.m.as_deref())
    }

    /// Returns the timestamp selected by `criterion`.
    #[must_use]
    pub fn timestamp(&self, criterion: SortCriterion) -> Option<DateTime<Utc>> {
        match criterion {
            SortCriterion::Published => self.published,
            SortCriterion::Taken => self.date_taken,
        }
    }

    /// Returns true when every tag in `wanted` appears in the item's tag list.
    ///
    /// `wanted` uses the remote feed's comma-separated filter convention.
    #[must_use]
    pub fn has_all_tags(&self, wanted: &str) -> bool {
        let own: Vec<&str> = self
            .tags
            .as_deref()
            .map(|t| t.split_whitespace().collect())
            .unwrap_or_default();

        wanted
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .all(|tag| own.iter().any(|o| o.eq_ignore_ascii_case(tag)))
    }
}

/// Timestamp used to order the fetched list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortCriterion {
    /// Order by the date the photo was published to the feed.
    #[default]
    Published,
    /// Order by the date the photo was taken.
    Taken,
}

impl SortCriterion {
    /// Parses a user-facing criterion name (`published` or `taken`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "published" | "date published" => Some(Self::Published),
            "taken" | "date taken" => Some(Self::Taken),
            _ => None,
        }
    }

    /// Returns the label shown in the sort dialog.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Published => "Date Published",
            Self::Taken => "Date Taken",
        }
    }
}

/// Sorts items ascending by the timestamp selected by `criterion`.
///
/// The sort is stable, so items with equal timestamps keep their fetch order.
/// Items missing the selected timestamp sort before every dated item.
///
/// # Examples
///
/// ```
/// use photofeed::domain::{sort_images, ImageItem, SortCriterion};
///
/// let items = vec![ImageItem::default(), ImageItem::default()];
/// let sorted = sort_images(items.clone(), SortCriterion::Taken);
/// assert_eq!(sorted, items);
/// ```
#[must_use]
pub fn sort_images(mut items: Vec<ImageItem>, criterion: SortCriterion) -> Vec<ImageItem> {
    items.sort_by_key(|item| item.timestamp(criterion));
    items
}
