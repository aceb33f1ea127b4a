//! Gallery record models.

use crate::domain::ImageItem;
use serde::{Deserialize, Serialize};

/// One saved photo in the gallery index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedImage {
    /// Image URL that was saved.
    pub url: String,

    /// Title stored with the image.
    pub title: String,

    /// Description stored with the image (the item's tags).
    pub description: String,

    /// Unix timestamp of the save.
    pub saved_at: i64,
}

impl SavedImage {
    /// Builds a record from a feed item.
    ///
    /// Returns `None` when the item has no media URL. Missing titles and tags
    /// fall back to placeholder text.
    ///
    /// # Examples
    ///
    /// ```
    /// use photofeed::domain::{ImageItem, MediaLink};
    /// use photofeed::storage::SavedImage;
    ///
    /// let item = ImageItem {
    ///     media: Some(MediaLink::new("https://example.com/1_m.jpg")),
    ///     ..Default::default()
    /// };
    /// let saved = SavedImage::from_item(&item).unwrap();
    /// assert_eq!(saved.title, "Default title");
    /// assert!(SavedImage::from_item(&ImageItem::default()).is_none());
    /// ```
    #[must_use]
    pub fn from_item(item: &ImageItem) -> Option<Self> {
        let url = item.media_url()?;
        Some(Self {
            url: url.to_string(),
            title: item.title.clone().unwrap_or_else(|| "Default title".to_string()),
            description: item
                .tags
                .clone()
                .unwrap_or_else(|| "Default Description".to_string()),
            saved_at: chrono::Utc::now().timestamp(),
        })
    }
}
