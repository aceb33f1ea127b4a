//! Response models for the remote image source.
//!
//! These types mirror the public photo feed document. They are separate from
//! the domain [`ImageItem`] list handling so metadata the client does not use
//! stays at the source boundary.

use crate::domain::ImageItem;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One page of the public photo feed.
///
/// Only `items` is consumed by the fetch pipeline. An absent item list is
/// treated as an empty feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageListResponse {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub link: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub modified: Option<DateTime<Utc>>,

    #[serde(default)]
    pub generator: Option<String>,

    #[serde(default)]
    pub items: Option<Vec<ImageItem>>,
}

impl ImageListResponse {
    /// Creates a response carrying only `items`.
    #[must_use]
    pub fn with_items(items: Vec<ImageItem>) -> Self {
        Self {
            items: Some(items),
            ..Default::default()
        }
    }

    /// Consumes the response and returns its items, empty when absent.
    #[must_use]
    pub fn into_items(self) -> Vec<ImageItem> {
        self.items.unwrap_or_default()
    }
}
